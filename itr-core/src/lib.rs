pub mod calculations;
pub mod models;

pub use calculations::{
    LiabilityError, LiabilityInput, LiabilityResult, LiabilityWorksheet, RegimeConfig, SlabLine,
};
pub use models::*;
