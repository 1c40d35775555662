//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: Rejected contract or model parameters
//! - `PricingError`: Errors from pricing operations

use thiserror::Error;

/// Parameter validation errors.
///
/// Raised at construction time of a [`Contract`](super::Contract) or of a
/// model's discretisation parameters. A value that fails validation never
/// produces a usable object.
///
/// # Variants
/// - `NonPositive`: Spot, strike, maturity, volatility or barrier <= 0
/// - `NonFinite`: NaN or infinite input
/// - `InvalidCount`: Zero step or path count
/// - `NegativeJumpParameter`: Negative jump intensity or jump volatility
///
/// # Examples
/// ```
/// use pricer_core::types::ValidationError;
///
/// let err = ValidationError::NonPositive { name: "spot", value: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid spot: -1 (must be strictly positive)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter must be strictly positive.
    #[error("Invalid {name}: {value} (must be strictly positive)")]
    NonPositive {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Parameter must be finite.
    #[error("Invalid {name}: {value} (must be finite)")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Step or path count must be at least one.
    #[error("Invalid {name}: {value} (must be at least 1)")]
    InvalidCount {
        /// Parameter name
        name: &'static str,
        /// The rejected count
        value: usize,
    },

    /// Jump intensity and jump volatility must be non-negative.
    #[error("Invalid jump parameter {name}: {value} (must be non-negative)")]
    NegativeJumpParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}

impl ValidationError {
    /// Returns the name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::NonPositive { name, .. }
            | Self::NonFinite { name, .. }
            | Self::InvalidCount { name, .. }
            | Self::NegativeJumpParameter { name, .. } => name,
        }
    }
}

/// Checks that `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { name, value });
    }
    Ok(value)
}

/// Checks that `value` is finite.
pub fn require_finite(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { name, value });
    }
    Ok(value)
}

/// Checks that a step or path count is at least one.
///
/// # Examples
/// ```
/// use pricer_core::types::{require_count, ValidationError};
///
/// assert_eq!(require_count("steps", 100), Ok(100));
/// assert!(matches!(
///     require_count("steps", 0),
///     Err(ValidationError::InvalidCount { name: "steps", value: 0 })
/// ));
/// ```
pub fn require_count(name: &'static str, value: usize) -> Result<usize, ValidationError> {
    if value == 0 {
        return Err(ValidationError::InvalidCount { name, value });
    }
    Ok(value)
}

/// Checks that a jump parameter is finite and non-negative.
pub fn require_non_negative_jump(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { name, value });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeJumpParameter { name, value });
    }
    Ok(value)
}

/// Validates a barrier level, which must be finite and strictly positive.
pub fn require_barrier(value: f64) -> Result<f64, ValidationError> {
    require_positive("barrier", value)
}

/// Categorised pricing errors.
///
/// # Variants
/// - `Validation`: A contract or bumped sibling failed validation
/// - `NumericalInstability`: The pricing algorithm produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::{PricingError, ValidationError};
///
/// let err: PricingError = ValidationError::InvalidCount { name: "steps", value: 0 }.into();
/// assert!(format!("{}", err).contains("steps"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid parameters.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Wraps a pricing output, rejecting NaN and infinite values.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// assert_eq!(PricingError::check_finite("binomial", 1.5), Ok(1.5));
    /// assert!(PricingError::check_finite("binomial", f64::NAN).is_err());
    /// ```
    pub fn check_finite(context: &str, value: f64) -> Result<f64, PricingError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NumericalInstability(format!(
                "{} produced a non-finite value ({})",
                context, value
            )))
        }
    }
}
