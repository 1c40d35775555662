//! Core contract and error types.
//!
//! This module provides:
//! - `contract`: The validated [`Contract`] and [`OptionSide`]
//! - `error`: [`ValidationError`], [`PricingError`] and validation helpers
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod contract;
pub mod error;

pub use contract::{Contract, OptionSide};
pub use error::{
    require_barrier, require_count, require_finite, require_non_negative_jump, require_positive,
    PricingError, ValidationError,
};
