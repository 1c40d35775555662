//! Rate curve interface consumed by curve-based instruments.
//!
//! Bond and swap pricing live outside this workspace; they only need a
//! discount factor and a forward rate per year fraction. The option models
//! take their rate from the [`Contract`](crate::types::Contract) and do not
//! consume this interface.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//! ```

pub mod curves;
pub mod error;

pub use curves::{FlatCurve, YieldCurve};
pub use error::MarketDataError;
