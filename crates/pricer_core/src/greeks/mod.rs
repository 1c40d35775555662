//! Greeks types and the shared finite-difference machinery.
//!
//! - [`result`]: [`Greek`], [`Greeks`] and [`Valuation`]
//! - [`finite_difference`]: [`Revaluable`] and [`BumpSizes`]

pub mod finite_difference;
pub mod result;

pub use finite_difference::{BumpSizes, Revaluable, DAYS_PER_YEAR};
pub use result::{Greek, Greeks, Valuation};
