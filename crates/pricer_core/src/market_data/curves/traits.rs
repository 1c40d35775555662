//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve capability required by curve-based instruments.
///
/// Generic over `T: Float` so curves can be evaluated on plain `f64` or on
/// any other float-like type.
///
/// # Contract
///
/// - `discount_factor(t)` returns D(t) for a year fraction t >= 0
/// - `forward_rate(t)` returns the instantaneous forward rate at t
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
pub trait YieldCurve<T: Float> {
    /// Return the discount factor for year fraction `t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if t < 0 or t is not finite.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the instantaneous forward rate at year fraction `t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if t < 0 or t is not finite.
    fn forward_rate(&self, t: T) -> Result<T, MarketDataError>;
}

/// Rejects negative or non-finite year fractions.
pub(crate) fn check_maturity<T: Float>(t: T) -> Result<(), MarketDataError> {
    if t < T::zero() || !t.is_finite() {
        return Err(MarketDataError::InvalidMaturity {
            t: t.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}
