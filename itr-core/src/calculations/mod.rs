//! Tax calculation modules for the new-regime liability computation.
//!
//! This module provides the calculation logic for the annual income tax
//! return: the slab-wise liability worksheet and its shared helpers.

pub mod common;
pub mod liability;

pub use liability::{
    LiabilityError, LiabilityInput, LiabilityResult, LiabilityWorksheet, RegimeConfig, SlabLine,
};
