//! Flat yield curve implementation.

use super::traits::check_maturity;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Flat yield curve with a constant continuously compounded rate.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
///
/// // Discount factor at t=1: exp(-0.05 * 1) ≈ 0.9512
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// // Forward rate is constant
/// assert_eq!(curve.forward_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given constant rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok((-self.rate * t).exp())
    }

    fn forward_rate(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok(self.rate)
    }
}
