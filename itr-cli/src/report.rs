//! Text report for the terminal.
//!
//! Mirrors the on-screen summary of the return: income details, the tax
//! computation, the settlement, and a slab-by-slab breakdown table. Amounts
//! are grouped the Indian way (`12,50,000`).

use std::fmt;

use itr_core::calculations::LiabilityResult;
use itr_core::models::TaxSlab;
use rust_decimal::Decimal;

/// Groups the digits of an amount in the Indian style: the last three
/// digits, then groups of two (`1,23,45,678`). Fractional part and sign are
/// preserved untouched.
pub fn format_amount(amount: Decimal) -> String {
    let text = amount.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let grouped = group_indian(int_part);
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// An amount with the rupee sign, for the money columns of the report.
pub fn format_inr(amount: Decimal) -> String {
    format!("₹{}", format_amount(amount))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut i = head.len();
    while i > 2 {
        groups.push(&head[i - 2..i]);
        i -= 2;
    }
    groups.push(&head[..i]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn slab_label(slab: &TaxSlab) -> String {
    match slab.upper_bound {
        Some(upper) => format!(
            "{}-{}",
            format_amount(slab.lower_bound),
            format_amount(upper)
        ),
        None => format!("Above {}", format_amount(slab.lower_bound)),
    }
}

fn rate_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Renderable report over a computed liability.
///
/// Presentation is plain request/response: everything the report needs is
/// carried here, nothing is read from process-wide state.
pub struct Report<'a> {
    pub result: &'a LiabilityResult,
    pub slabs: &'a [TaxSlab],
    pub tax_paid: Decimal,
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;

        writeln!(f, "Income Details")?;
        writeln!(
            f,
            "  {:<30}{:>16}",
            "Taxable income",
            format_inr(r.taxable_income)
        )?;
        if r.marginal_relief_applied {
            writeln!(
                f,
                "  {:<30}{:>16}",
                "Adjusted income (relief)",
                format_inr(r.adjusted_income)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Tax Calculation")?;
        writeln!(
            f,
            "  {:<30}{:>16}",
            "Tax before cess",
            format_inr(r.tax_before_cess)
        )?;
        writeln!(
            f,
            "  {:<30}{:>16}",
            "Health and education cess",
            format_inr(r.cess)
        )?;
        writeln!(f, "  {:<30}{:>16}", "Total tax", format_inr(r.total_tax))?;
        writeln!(f, "  {:<30}{:>16}", "Tax paid", format_inr(self.tax_paid))?;
        if !r.payable_tax.is_zero() {
            writeln!(
                f,
                "  {:<30}{:>16}",
                "Tax payable",
                format_inr(r.payable_tax)
            )?;
        }
        if !r.refundable_tax.is_zero() {
            writeln!(
                f,
                "  {:<30}{:>16}",
                "Tax refundable",
                format_inr(r.refundable_tax)
            )?;
        }
        if r.rebate_applied {
            writeln!(f, "  Rebate applied: no tax below the rebate threshold")?;
        }
        if r.marginal_relief_applied {
            writeln!(
                f,
                "  Marginal relief applied: tax computed on the excess over the threshold"
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Slab Breakdown")?;
        writeln!(
            f,
            "  {:<24}{:>6}{:>18}{:>14}",
            "Slab", "Rate", "Taxable Amount", "Tax"
        )?;
        for (slab, line) in self.slabs.iter().zip(r.slab_lines.iter()) {
            writeln!(
                f,
                "  {:<24}{:>6}{:>18}{:>14}",
                slab_label(slab),
                rate_percent(slab.rate),
                format_inr(line.income),
                format_inr(line.tax)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itr_core::calculations::{LiabilityInput, LiabilityWorksheet, RegimeConfig};
    use itr_core::models::new_regime_slabs;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn render(
        taxable_income: Decimal,
        tax_paid: Decimal,
    ) -> String {
        let slabs = new_regime_slabs();
        let worksheet = LiabilityWorksheet::new(&slabs, RegimeConfig::fy_2025_26());
        let result = worksheet
            .calculate(&LiabilityInput {
                taxable_income,
                tax_paid,
            })
            .unwrap();
        Report {
            result: &result,
            slabs: &slabs,
            tax_paid,
        }
        .to_string()
    }

    // =========================================================================
    // amount formatting tests
    // =========================================================================

    #[test]
    fn format_amount_leaves_small_numbers_alone() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(99999)), "99,999");
    }

    #[test]
    fn format_amount_groups_lakhs_and_crores() {
        assert_eq!(format_amount(dec!(100000)), "1,00,000");
        assert_eq!(format_amount(dec!(1250000)), "12,50,000");
        assert_eq!(format_amount(dec!(24000000)), "2,40,00,000");
    }

    #[test]
    fn format_amount_preserves_fraction_and_sign() {
        assert_eq!(format_amount(dec!(1850015.50)), "18,50,015.50");
        assert_eq!(format_amount(dec!(-500.25)), "-500.25");
    }

    #[test]
    fn rate_percent_drops_trailing_zeros() {
        assert_eq!(rate_percent(dec!(0.05)), "5%");
        assert_eq!(rate_percent(dec!(0.30)), "30%");
        assert_eq!(rate_percent(dec!(0)), "0%");
    }

    #[test]
    fn slab_label_shows_band_or_open_end() {
        let slabs = new_regime_slabs();

        assert_eq!(slab_label(&slabs[1]), "4,00,000-8,00,000");
        assert_eq!(slab_label(&slabs[6]), "Above 24,00,000");
    }

    // =========================================================================
    // report rendering tests
    // =========================================================================

    #[test]
    fn report_shows_payable_settlement() {
        let report = render(dec!(2000000), dec!(150000));

        assert!(report.contains("Taxable income"));
        assert!(report.contains("₹20,00,000"));
        assert!(report.contains("Total tax"));
        assert!(report.contains("₹2,08,000"));
        assert!(report.contains("Tax payable"));
        assert!(report.contains("₹58,000"));
        assert!(!report.contains("Tax refundable"));
    }

    #[test]
    fn report_shows_refund_and_rebate() {
        let report = render(dec!(1000000), dec!(30000));

        assert!(report.contains("Rebate applied"));
        assert!(report.contains("Tax refundable"));
        assert!(report.contains("₹30,000"));
        assert!(!report.contains("Tax payable"));
    }

    #[test]
    fn report_shows_marginal_relief_adjustment() {
        let report = render(dec!(1250000), dec!(0));

        assert!(report.contains("Adjusted income (relief)"));
        assert!(report.contains("₹50,000"));
        assert!(report.contains("Marginal relief applied"));
        assert!(report.contains("₹2,600"));
    }

    #[test]
    fn report_lists_every_slab() {
        let report = render(dec!(2000000), dec!(0));

        assert!(report.contains("0-4,00,000"));
        assert!(report.contains("20,00,000-24,00,000"));
        assert!(report.contains("Above 24,00,000"));
        assert!(report.contains("30%"));
    }
}
