//! New-regime liability worksheet for the annual income tax return.
//!
//! This module implements the FY 2025-26 new-regime computation: a slab-wise
//! breakdown of taxable income, the low-income rebate, the marginal relief
//! adjustment near the rebate threshold, the health and education cess, and
//! the final settlement against tax already paid.
//!
//! # Computation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable amount and tax for each slab of the schedule |
//! | 2    | Rebate: income below ₹12,00,000 owes nothing |
//! | 3    | Marginal relief: near the threshold, tax is recomputed from the excess over it |
//! | 4    | Health and education cess (4%) on the post-relief tax |
//! | 5    | Settlement: payable or refundable against tax already paid |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itr_core::calculations::{LiabilityInput, LiabilityWorksheet, RegimeConfig};
//! use itr_core::models::new_regime_slabs;
//!
//! let slabs = new_regime_slabs();
//! let worksheet = LiabilityWorksheet::new(&slabs, RegimeConfig::fy_2025_26());
//!
//! let result = worksheet
//!     .calculate(&LiabilityInput {
//!         taxable_income: dec!(2000000),
//!         tax_paid: dec!(150000),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.tax_before_cess, dec!(200000));
//! assert_eq!(result.cess, dec!(8000));
//! assert_eq!(result.total_tax, dec!(208000));
//! assert_eq!(result.payable_tax, dec!(58000));
//! assert_eq!(result.refundable_tax, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{max, round_rupee};
use crate::models::{FORM_SLAB_COUNT, FormFields, TaxSlab};

/// Errors that can occur during liability worksheet calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiabilityError {
    /// No tax slabs were provided for the calculation.
    #[error("no tax slabs provided")]
    NoTaxSlabs,

    /// The schedule does not begin at income zero.
    #[error("first slab must start at zero, got {0}")]
    FirstSlabNotZero(Decimal),

    /// A slab does not start where the previous slab ends.
    #[error("slab {index} starts at {found} but the previous slab ends at {expected}")]
    NonContiguousSlabs {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A slab's upper bound is at or below its lower bound.
    #[error("slab {index} upper bound {upper} does not exceed its lower bound {lower}")]
    EmptySlab {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    /// An unbounded slab appears before the end of the schedule.
    #[error("slab {0} is unbounded but is not the last slab")]
    UnboundedInnerSlab(usize),

    /// The schedule ends with a bounded slab.
    #[error("the last slab must be unbounded")]
    BoundedTopSlab,

    /// A slab rate is outside [0, 1].
    #[error("slab {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    /// A slab rate is lower than the rate of the slab before it.
    #[error("slab {index} rate {rate} is lower than the preceding slab's rate")]
    DecreasingRate { index: usize, rate: Decimal },

    /// The cess rate is outside [0, 1].
    #[error("cess rate must be between 0 and 1, got {0}")]
    InvalidCessRate(Decimal),

    /// The rebate threshold is negative.
    #[error("rebate threshold must be non-negative, got {0}")]
    NegativeRebateThreshold(Decimal),

    /// The schedule does not match the slab count of the form template.
    #[error("form template expects {expected} slabs, the schedule has {found}")]
    SlabCountMismatch { expected: usize, found: usize },
}

/// Regime-level parameters for the liability computation.
///
/// These are fixed per financial year by the Finance Act and sit outside the
/// slab schedule itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Taxable income below this owes nothing (full rebate under 87A).
    pub rebate_threshold: Decimal,

    /// Health and education cess rate applied on the computed tax.
    pub cess_rate: Decimal,
}

impl RegimeConfig {
    /// Parameters for FY 2025-26 (AY 2026-27): ₹12,00,000 rebate threshold,
    /// 4% cess.
    pub fn fy_2025_26() -> Self {
        Self {
            rebate_threshold: Decimal::from(1_200_000),
            cess_rate: Decimal::new(4, 2),
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`LiabilityError`] if the rebate threshold is negative or the
    /// cess rate is outside [0, 1].
    pub fn validate(&self) -> Result<(), LiabilityError> {
        if self.rebate_threshold < Decimal::ZERO {
            return Err(LiabilityError::NegativeRebateThreshold(
                self.rebate_threshold,
            ));
        }
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE {
            return Err(LiabilityError::InvalidCessRate(self.cess_rate));
        }
        Ok(())
    }
}

/// Input values for the liability worksheet.
///
/// Taxable income is expected to already be net of the standard deduction;
/// deriving it from salary components is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityInput {
    /// Taxable income for the year. Negative values are treated as zero.
    pub taxable_income: Decimal,

    /// Tax already deducted or paid during the year. May exceed the computed
    /// liability, in which case the difference is refundable.
    pub tax_paid: Decimal,
}

/// Taxable amount and tax owed within a single slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabLine {
    pub income: Decimal,
    pub tax: Decimal,
}

impl SlabLine {
    fn nil() -> Self {
        Self {
            income: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }
}

/// Result of the liability worksheet.
///
/// Created fresh per computation and never mutated afterwards; when marginal
/// relief applies, the breakdown is a full recomputation at the adjusted
/// income rather than an in-place edit of the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityResult {
    /// Taxable income the computation started from (after clamping at zero).
    pub taxable_income: Decimal,

    /// Income the breakdown was computed at. Equal to `taxable_income`
    /// unless marginal relief applied, in which case it is the excess over
    /// the rebate threshold.
    pub adjusted_income: Decimal,

    /// Per-slab taxable amounts and taxes, in schedule order.
    pub slab_lines: Vec<SlabLine>,

    /// Sum of the per-slab taxes, before cess.
    pub tax_before_cess: Decimal,

    /// Health and education cess on `tax_before_cess`.
    pub cess: Decimal,

    /// Total tax due: `tax_before_cess + cess`.
    pub total_tax: Decimal,

    /// Amount still owed after netting against tax paid.
    pub payable_tax: Decimal,

    /// Amount refundable after netting against tax paid.
    pub refundable_tax: Decimal,

    /// Whether the low-income rebate wiped the liability.
    pub rebate_applied: bool,

    /// Whether marginal relief replaced the breakdown.
    pub marginal_relief_applied: bool,
}

impl LiabilityResult {
    /// Flattens the result into the field mapping the document renderer
    /// substitutes into the form template.
    ///
    /// # Errors
    ///
    /// Returns [`LiabilityError::SlabCountMismatch`] when the result was
    /// computed from a schedule without exactly [`FORM_SLAB_COUNT`] slabs —
    /// the template has a fixed row per slab.
    pub fn form_fields(&self) -> Result<FormFields, LiabilityError> {
        if self.slab_lines.len() != FORM_SLAB_COUNT {
            return Err(LiabilityError::SlabCountMismatch {
                expected: FORM_SLAB_COUNT,
                found: self.slab_lines.len(),
            });
        }

        Ok(FormFields {
            tax: self.tax_before_cess,
            educess: self.cess,
            total_tax: self.total_tax,
            payable_tax: self.payable_tax,
            refundable_tax: self.refundable_tax,
            marginal_benefit_applied: self.marginal_relief_applied,
            rebate_applied: self.rebate_applied,
            original_income: self.taxable_income,
            adjusted_income: self.adjusted_income,
            slab1_income: self.slab_lines[0].income,
            slab2_income: self.slab_lines[1].income,
            slab3_income: self.slab_lines[2].income,
            slab4_income: self.slab_lines[3].income,
            slab5_income: self.slab_lines[4].income,
            slab6_income: self.slab_lines[5].income,
            slab7_income: self.slab_lines[6].income,
            slab1_tax: self.slab_lines[0].tax,
            slab2_tax: self.slab_lines[1].tax,
            slab3_tax: self.slab_lines[2].tax,
            slab4_tax: self.slab_lines[3].tax,
            slab5_tax: self.slab_lines[4].tax,
            slab6_tax: self.slab_lines[5].tax,
            slab7_tax: self.slab_lines[6].tax,
        })
    }
}

/// Calculator for the new-regime liability worksheet.
///
/// This struct encapsulates the slab schedule and regime parameters and
/// provides the full computation as a single entry point. The computation is
/// pure and invocation-local: no state survives between calls.
#[derive(Debug, Clone)]
pub struct LiabilityWorksheet<'a> {
    slabs: &'a [TaxSlab],
    config: RegimeConfig,
}

impl<'a> LiabilityWorksheet<'a> {
    /// Creates a new liability worksheet over the given slab schedule.
    ///
    /// Slabs must be sorted by `lower_bound` in ascending order, start at
    /// zero, be contiguous, and end with an unbounded slab; this is checked
    /// by [`calculate`](Self::calculate).
    pub fn new(
        slabs: &'a [TaxSlab],
        config: RegimeConfig,
    ) -> Self {
        Self { slabs, config }
    }

    /// Calculates the complete liability worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`LiabilityError`] if the slab schedule or the regime
    /// configuration is malformed. Well-formed non-negative input never
    /// fails.
    pub fn calculate(
        &self,
        input: &LiabilityInput,
    ) -> Result<LiabilityResult, LiabilityError> {
        self.validate_schedule()?;
        self.config.validate()?;

        let income = max(input.taxable_income, Decimal::ZERO);

        if income < self.config.rebate_threshold {
            debug!(%income, "rebate applies, liability is nil");
            return Ok(self.rebate_result(income, input.tax_paid));
        }

        let mut slab_lines = self.slab_lines(income);
        let mut tax_before_cess = self.total_slab_tax(&slab_lines);
        let mut adjusted_income = income;
        let mut marginal_relief_applied = false;

        // Liability just past the rebate threshold must not exceed the
        // excess over it. With zero excess the recomputed breakdown is nil,
        // which keeps total tax continuous across the threshold.
        let excess = income - self.config.rebate_threshold;
        if tax_before_cess > excess {
            marginal_relief_applied = true;
            adjusted_income = excess;
            slab_lines = self.relief_lines(adjusted_income);
            tax_before_cess = self.total_slab_tax(&slab_lines);
            debug!(%income, %adjusted_income, %tax_before_cess, "marginal relief applied");
        }

        let cess = self.cess(tax_before_cess);
        let total_tax = tax_before_cess + cess;
        let (payable_tax, refundable_tax) = self.settle(total_tax, input.tax_paid);

        Ok(LiabilityResult {
            taxable_income: income,
            adjusted_income,
            slab_lines,
            tax_before_cess,
            cess,
            total_tax,
            payable_tax,
            refundable_tax,
            rebate_applied: false,
            marginal_relief_applied,
        })
    }

    /// Checks the structural invariants of the slab schedule.
    fn validate_schedule(&self) -> Result<(), LiabilityError> {
        let first = self.slabs.first().ok_or(LiabilityError::NoTaxSlabs)?;
        if !first.lower_bound.is_zero() {
            return Err(LiabilityError::FirstSlabNotZero(first.lower_bound));
        }

        let mut previous_rate = Decimal::ZERO;
        for (index, slab) in self.slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
                return Err(LiabilityError::InvalidRate {
                    index,
                    rate: slab.rate,
                });
            }
            if slab.rate < previous_rate {
                return Err(LiabilityError::DecreasingRate {
                    index,
                    rate: slab.rate,
                });
            }
            previous_rate = slab.rate;

            match (slab.upper_bound, self.slabs.get(index + 1)) {
                (Some(upper), _) if upper <= slab.lower_bound => {
                    return Err(LiabilityError::EmptySlab {
                        index,
                        lower: slab.lower_bound,
                        upper,
                    });
                }
                (Some(upper), Some(next)) if next.lower_bound != upper => {
                    return Err(LiabilityError::NonContiguousSlabs {
                        index: index + 1,
                        expected: upper,
                        found: next.lower_bound,
                    });
                }
                (Some(_), None) => return Err(LiabilityError::BoundedTopSlab),
                (None, Some(_)) => return Err(LiabilityError::UnboundedInnerSlab(index)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Computes the per-slab breakdown of `income`.
    ///
    /// Each bounded slab `[lo, hi)` taxes `clamp(income - lo, 0, hi - lo)`;
    /// the unbounded top slab taxes everything above its lower bound. Each
    /// line is rounded to a whole rupee individually.
    fn slab_lines(
        &self,
        income: Decimal,
    ) -> Vec<SlabLine> {
        self.slabs
            .iter()
            .map(|slab| {
                let above = max(income - slab.lower_bound, Decimal::ZERO);
                let income_in_slab = match slab.width() {
                    Some(width) => above.min(width),
                    None => above,
                };
                SlabLine {
                    income: income_in_slab,
                    tax: round_rupee(income_in_slab * slab.rate),
                }
            })
            .collect()
    }

    /// Recomputes the breakdown for marginal relief.
    ///
    /// The relieved excess fills the taxable bands in schedule order; the
    /// zero-rate band is skipped since the rebate threshold has already
    /// absorbed the tax-free amount.
    fn relief_lines(
        &self,
        adjusted_income: Decimal,
    ) -> Vec<SlabLine> {
        let mut remaining = adjusted_income;
        self.slabs
            .iter()
            .map(|slab| {
                if slab.rate.is_zero() {
                    return SlabLine::nil();
                }
                let income_in_slab = match slab.width() {
                    Some(width) => remaining.min(width),
                    None => remaining,
                };
                remaining -= income_in_slab;
                SlabLine {
                    income: income_in_slab,
                    tax: round_rupee(income_in_slab * slab.rate),
                }
            })
            .collect()
    }

    /// Sums the already-rounded per-slab taxes.
    fn total_slab_tax(
        &self,
        lines: &[SlabLine],
    ) -> Decimal {
        lines.iter().map(|line| line.tax).sum()
    }

    /// Health and education cess on the computed tax.
    fn cess(
        &self,
        tax: Decimal,
    ) -> Decimal {
        round_rupee(tax * self.config.cess_rate)
    }

    /// Nets total tax against tax already paid.
    ///
    /// Exactly one of the returned (payable, refundable) amounts is
    /// non-zero, or both are zero when they match exactly.
    fn settle(
        &self,
        total_tax: Decimal,
        tax_paid: Decimal,
    ) -> (Decimal, Decimal) {
        if tax_paid >= total_tax {
            (Decimal::ZERO, round_rupee(tax_paid - total_tax))
        } else {
            (round_rupee(total_tax - tax_paid), Decimal::ZERO)
        }
    }

    /// Builds the nil-liability result for income under the rebate
    /// threshold. The slab income column still shows how the income spreads
    /// across the bands; only the tax column is nil.
    fn rebate_result(
        &self,
        income: Decimal,
        tax_paid: Decimal,
    ) -> LiabilityResult {
        let slab_lines = self
            .slab_lines(income)
            .into_iter()
            .map(|line| SlabLine {
                income: line.income,
                tax: Decimal::ZERO,
            })
            .collect();
        let (payable_tax, refundable_tax) = self.settle(Decimal::ZERO, tax_paid);

        LiabilityResult {
            taxable_income: income,
            adjusted_income: income,
            slab_lines,
            tax_before_cess: Decimal::ZERO,
            cess: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            payable_tax,
            refundable_tax,
            rebate_applied: true,
            marginal_relief_applied: false,
        }
    }
}
