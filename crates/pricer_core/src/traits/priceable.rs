//! Pricing capability shared by every model.
//!
//! Each model implements [`OptionPricer`] directly; the models have no
//! shared base state. Dispatch over the model family is done by a
//! `match` on an enum in the pricing layer, not by trait objects.

use crate::greeks::{Greeks, Valuation};
use crate::types::{Contract, PricingError};

/// Trait for option models that produce a price and Greeks.
///
/// # Invariants
/// - `price` and `greeks` are pure: the same model yields the same result
///   (simulation models only when seeded)
/// - The contract is never mutated
///
/// # Examples
/// ```
/// use pricer_core::greeks::Greeks;
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{Contract, OptionSide, PricingError};
///
/// struct Intrinsic(Contract);
///
/// impl OptionPricer for Intrinsic {
///     fn contract(&self) -> &Contract {
///         &self.0
///     }
///     fn price(&self) -> Result<f64, PricingError> {
///         Ok(self.0.intrinsic(self.0.spot()))
///     }
///     fn greeks(&self) -> Result<Greeks, PricingError> {
///         Ok(Greeks::default())
///     }
/// }
///
/// let c = Contract::new(110.0, 100.0, 1.0, 0.2, 0.0, 0.0, OptionSide::Call).unwrap();
/// let v = Intrinsic(c).valuation().unwrap();
/// assert_eq!(v.price, 10.0);
/// assert!(v.std_error.is_none());
/// ```
pub trait OptionPricer {
    /// The contract being priced.
    fn contract(&self) -> &Contract;

    /// Present value of the contract.
    fn price(&self) -> Result<f64, PricingError>;

    /// Sensitivities of the price.
    fn greeks(&self) -> Result<Greeks, PricingError>;

    /// Price and Greeks together.
    ///
    /// Simulation models override this to attach a standard error.
    fn valuation(&self) -> Result<Valuation, PricingError> {
        Ok(Valuation {
            price: self.price()?,
            std_error: None,
            greeks: self.greeks()?,
        })
    }
}
