//! Option contract shared by every pricing model.
//!
//! A [`Contract`] is a validated, immutable bundle of market and contract
//! parameters. Models never mutate it; finite-difference Greeks build a
//! sibling contract with one field overridden via the `with_*` methods,
//! which re-run the same validation.

use super::error::{require_finite, require_positive, ValidationError};

/// Call or put.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionSide {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionSide {
    /// Intrinsic (exercise) value at the given spot.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionSide;
    ///
    /// assert_eq!(OptionSide::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionSide::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionSide::Call => (spot - strike).max(0.0),
            OptionSide::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Lowercase name of the side.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated option contract.
///
/// # Invariants
/// - spot, strike, maturity and volatility are finite and strictly positive
/// - rate and dividend yield are finite (any sign)
///
/// # Examples
/// ```
/// use pricer_core::types::{Contract, OptionSide};
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// assert_eq!(contract.spot(), 100.0);
///
/// // Bumped sibling, base contract untouched
/// let bumped = contract.with_spot(100.01).unwrap();
/// assert_eq!(bumped.spot(), 100.01);
/// assert_eq!(contract.spot(), 100.0);
///
/// assert!(Contract::new(100.0, 100.0, 0.0, 0.2, 0.05, 0.0, OptionSide::Put).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contract {
    spot: f64,
    strike: f64,
    maturity: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    side: OptionSide,
}

impl Contract {
    /// Creates a validated contract.
    ///
    /// # Arguments
    /// * `spot` - Underlying price (S > 0)
    /// * `strike` - Strike price (K > 0)
    /// * `maturity` - Time to maturity in years (T > 0)
    /// * `volatility` - Annualised volatility (σ > 0)
    /// * `rate` - Continuously compounded risk-free rate
    /// * `dividend_yield` - Continuous dividend or foreign yield
    /// * `side` - Call or put
    ///
    /// # Errors
    /// `ValidationError` naming the first offending parameter.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        volatility: f64,
        rate: f64,
        dividend_yield: f64,
        side: OptionSide,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            spot: require_positive("spot", spot)?,
            strike: require_positive("strike", strike)?,
            maturity: require_positive("maturity", maturity)?,
            volatility: require_positive("volatility", volatility)?,
            rate: require_finite("rate", rate)?,
            dividend_yield: require_finite("dividend_yield", dividend_yield)?,
            side,
        })
    }

    /// Spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years (T).
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Annualised volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Dividend or foreign yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Call or put.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Intrinsic value of this contract at an arbitrary spot.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.side.intrinsic(spot, self.strike)
    }

    /// Returns a sibling contract with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            spot: require_positive("spot", spot)?,
            ..*self
        })
    }

    /// Returns a sibling contract with a different maturity.
    pub fn with_maturity(&self, maturity: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            maturity: require_positive("maturity", maturity)?,
            ..*self
        })
    }

    /// Returns a sibling contract with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            volatility: require_positive("volatility", volatility)?,
            ..*self
        })
    }

    /// Returns a sibling contract with a different rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            rate: require_finite("rate", rate)?,
            ..*self
        })
    }

    /// Returns a sibling contract on the other side (call <-> put).
    pub fn with_side(&self, side: OptionSide) -> Self {
        Self { side, ..*self }
    }
}
