use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of slab rows in the ITR form template.
pub const FORM_SLAB_COUNT: usize = 7;

/// Flat field mapping consumed by the document renderer.
///
/// The renderer merges these with identity fields (name, PAN, employee id,
/// dates, place) it collects itself and substitutes the lot into the form
/// template, so the field names here are a contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    /// Tax on the slab breakdown, before cess.
    pub tax: Decimal,
    /// Health and education cess.
    pub educess: Decimal,
    pub total_tax: Decimal,
    pub payable_tax: Decimal,
    pub refundable_tax: Decimal,
    pub marginal_benefit_applied: bool,
    pub rebate_applied: bool,
    pub original_income: Decimal,
    /// Equal to `original_income` unless marginal relief applied.
    pub adjusted_income: Decimal,
    pub slab1_income: Decimal,
    pub slab2_income: Decimal,
    pub slab3_income: Decimal,
    pub slab4_income: Decimal,
    pub slab5_income: Decimal,
    pub slab6_income: Decimal,
    pub slab7_income: Decimal,
    pub slab1_tax: Decimal,
    pub slab2_tax: Decimal,
    pub slab3_tax: Decimal,
    pub slab4_tax: Decimal,
    pub slab5_tax: Decimal,
    pub slab6_tax: Decimal,
    pub slab7_tax: Decimal,
}
