use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous income band taxed at a fixed marginal rate.
///
/// `upper_bound` is `None` for the open-ended top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    /// Width of the band, or `None` for the unbounded top slab.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }
}

/// The new-regime slab schedule for FY 2025-26 (AY 2026-27).
///
/// Seven slabs in ₹4,00,000 steps, 0% on the first band up to 30% above
/// ₹24,00,000.
pub fn new_regime_slabs() -> Vec<TaxSlab> {
    let step = Decimal::from(400_000);
    let rates = [
        Decimal::ZERO,
        Decimal::new(5, 2),
        Decimal::new(10, 2),
        Decimal::new(15, 2),
        Decimal::new(20, 2),
        Decimal::new(25, 2),
        Decimal::new(30, 2),
    ];

    rates
        .iter()
        .enumerate()
        .map(|(i, &rate)| {
            let lower_bound = step * Decimal::from(i as u32);
            let upper_bound = (i + 1 < rates.len()).then(|| lower_bound + step);
            TaxSlab {
                lower_bound,
                upper_bound,
                rate,
            }
        })
        .collect()
}
