//! Bump-and-revalue Greeks.
//!
//! Lattice and simulation models have no closed-form derivatives. Their
//! Greeks are obtained by building a sibling model on a contract with one
//! field perturbed, re-running the full pricing algorithm and differencing
//! the two prices.
//!
//! | Greek | Perturbation | Scheme |
//! |-------|--------------|--------|
//! | delta, gamma | spot ± h | central |
//! | vega | σ + h | forward, / 100 |
//! | rho | r + h | forward, / 100 |
//! | theta | T − days / 365 | backward, per day |
//!
//! Simulation models must reuse the same seed for the base and bumped runs
//! (common random numbers), otherwise the difference is dominated by noise.

use serde::Deserialize;

use crate::types::{Contract, PricingError};

/// Days per year used to convert the theta bump into a maturity shift.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// A model that can be re-priced on a sibling contract.
///
/// Implementors keep every discretisation parameter (steps, barrier, seed,
/// ...) and swap only the contract.
pub trait Revaluable {
    /// The contract being priced.
    fn contract(&self) -> &Contract;

    /// Prices the same model on a different contract.
    fn revalue(&self, contract: Contract) -> Result<f64, PricingError>;
}

/// Perturbation sizes for bump-and-revalue.
///
/// # Examples
///
/// ```rust
/// use pricer_core::greeks::BumpSizes;
///
/// let bumps = BumpSizes::default();
/// assert_eq!(bumps.spot, 0.01);
/// assert_eq!(bumps.volatility, 1e-4);
/// assert_eq!(bumps.rate, 1e-4);
/// assert_eq!(bumps.maturity_days, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BumpSizes {
    /// Absolute spot bump.
    pub spot: f64,
    /// Absolute volatility bump.
    pub volatility: f64,
    /// Absolute rate bump.
    pub rate: f64,
    /// Maturity reduction in calendar days.
    pub maturity_days: f64,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            spot: 1e-2,
            volatility: 1e-4,
            rate: 1e-4,
            maturity_days: 1.0,
        }
    }
}

impl BumpSizes {
    /// Maturity reduction in years.
    #[inline]
    pub fn maturity_shift(&self) -> f64 {
        self.maturity_days / DAYS_PER_YEAR
    }

    /// Central-difference delta and gamma from spot ± h.
    pub fn spot_central<M: Revaluable + ?Sized>(
        &self,
        model: &M,
        base_price: f64,
    ) -> Result<(f64, f64), PricingError> {
        let h = self.spot;
        let contract = model.contract();
        let up = model.revalue(contract.with_spot(contract.spot() + h)?)?;
        let down = model.revalue(contract.with_spot(contract.spot() - h)?)?;

        let delta = (up - down) / (2.0 * h);
        let gamma = (up - 2.0 * base_price + down) / (h * h);
        Ok((delta, gamma))
    }

    /// Forward-difference delta from spot + h.
    pub fn spot_forward<M: Revaluable + ?Sized>(
        &self,
        model: &M,
        base_price: f64,
    ) -> Result<f64, PricingError> {
        let h = self.spot;
        let contract = model.contract();
        let up = model.revalue(contract.with_spot(contract.spot() + h)?)?;
        Ok((up - base_price) / h)
    }

    /// Forward-difference vega per volatility point.
    pub fn vega<M: Revaluable + ?Sized>(
        &self,
        model: &M,
        base_price: f64,
    ) -> Result<f64, PricingError> {
        let h = self.volatility;
        let contract = model.contract();
        let up = model.revalue(contract.with_volatility(contract.volatility() + h)?)?;
        Ok((up - base_price) / h / 100.0)
    }

    /// Forward-difference rho per rate point.
    pub fn rho<M: Revaluable + ?Sized>(
        &self,
        model: &M,
        base_price: f64,
    ) -> Result<f64, PricingError> {
        let h = self.rate;
        let contract = model.contract();
        let up = model.revalue(contract.with_rate(contract.rate() + h)?)?;
        Ok((up - base_price) / h / 100.0)
    }

    /// Theta per calendar day from a shortened maturity.
    ///
    /// The annualised derivative `(V(T − δ) − V(T)) / δ` is reported per
    /// day, so a long option usually shows a negative theta.
    ///
    /// # Errors
    /// `PricingError::Validation` when the maturity is not longer than the
    /// shift.
    pub fn theta<M: Revaluable + ?Sized>(
        &self,
        model: &M,
        base_price: f64,
    ) -> Result<f64, PricingError> {
        let shift = self.maturity_shift();
        let contract = model.contract();
        let reduced = model.revalue(contract.with_maturity(contract.maturity() - shift)?)?;
        let annualised = (reduced - base_price) / shift;
        Ok(annualised / DAYS_PER_YEAR)
    }
}
