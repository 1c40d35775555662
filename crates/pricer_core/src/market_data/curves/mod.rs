//! Curve abstractions for discounting.
//!
//! - [`YieldCurve`]: Discount factor and forward rate by year fraction
//! - [`FlatCurve`]: Constant rate implementation

mod flat;
mod traits;

pub use flat::FlatCurve;
pub use traits::YieldCurve;
