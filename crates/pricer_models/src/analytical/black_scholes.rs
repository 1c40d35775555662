//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! All Greeks are closed-form. Vega and rho are reported per volatility or
//! rate point (raw derivative / 100), theta per calendar day.

use pricer_core::greeks::{Greeks, DAYS_PER_YEAR};
use pricer_core::traits::OptionPricer;
use pricer_core::types::{Contract, OptionSide, PricingError};
use tracing::debug;

use super::distributions::{norm_cdf, norm_pdf};

/// Black-Scholes model for European option pricing.
///
/// Holds only the contract; the contract invariants (T > 0, σ > 0)
/// guarantee that σ√T is a valid denominator, so pricing cannot fail.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_core::types::{Contract, OptionSide};
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// let bs = BlackScholes::new(contract);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = bs.price_call() - bs.price_put() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    contract: Contract,
}

impl BlackScholes {
    /// Creates a Black-Scholes model for a contract.
    #[inline]
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    /// σ√T
    #[inline]
    fn vol_sqrt_t(&self) -> f64 {
        self.contract.volatility() * self.contract.maturity().sqrt()
    }

    /// e^(-rT)
    #[inline]
    fn rate_discount(&self) -> f64 {
        (-self.contract.rate() * self.contract.maturity()).exp()
    }

    /// e^(-qT)
    #[inline]
    fn yield_discount(&self) -> f64 {
        (-self.contract.dividend_yield() * self.contract.maturity()).exp()
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        let c = &self.contract;
        let log_moneyness = (c.spot() / c.strike()).ln();
        let drift = (c.rate() - c.dividend_yield() + 0.5 * c.volatility() * c.volatility())
            * c.maturity();
        (log_moneyness + drift) / self.vol_sqrt_t()
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.vol_sqrt_t()
    }

    /// European call price, regardless of the contract side.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_core::types::{Contract, OptionSide};
    ///
    /// let c = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
    /// assert!((BlackScholes::new(c).price_call() - 10.4506).abs() < 1e-4);
    /// ```
    pub fn price_call(&self) -> f64 {
        let c = &self.contract;
        c.spot() * self.yield_discount() * norm_cdf(self.d1())
            - c.strike() * self.rate_discount() * norm_cdf(self.d2())
    }

    /// European put price, regardless of the contract side.
    pub fn price_put(&self) -> f64 {
        let c = &self.contract;
        c.strike() * self.rate_discount() * norm_cdf(-self.d2())
            - c.spot() * self.yield_discount() * norm_cdf(-self.d1())
    }

    /// Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    pub fn delta(&self) -> f64 {
        let n_d1 = norm_cdf(self.d1());
        match self.contract.side() {
            OptionSide::Call => self.yield_discount() * n_d1,
            OptionSide::Put => self.yield_discount() * (n_d1 - 1.0),
        }
    }

    /// Gamma (∂²V/∂S²), identical for calls and puts.
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T)
    pub fn gamma(&self) -> f64 {
        self.yield_discount() * norm_pdf(self.d1()) / (self.contract.spot() * self.vol_sqrt_t())
    }

    /// Vega per volatility point, identical for calls and puts.
    ///
    /// Vega = S·e^(-qT)·φ(d₁)·√T / 100
    pub fn vega(&self) -> f64 {
        let c = &self.contract;
        c.spot() * self.yield_discount() * norm_pdf(self.d1()) * c.maturity().sqrt() / 100.0
    }

    /// Theta per calendar day, usually negative.
    ///
    /// - Call: [-S·e^(-qT)·φ(d₁)·σ/(2√T) + q·S·e^(-qT)·N(d₁) - r·K·e^(-rT)·N(d₂)] / 365
    /// - Put: [-S·e^(-qT)·φ(d₁)·σ/(2√T) - q·S·e^(-qT)·N(-d₁) + r·K·e^(-rT)·N(-d₂)] / 365
    pub fn theta(&self) -> f64 {
        let c = &self.contract;
        let (d1, d2) = (self.d1(), self.d2());
        let spot_disc = c.spot() * self.yield_discount();
        let strike_disc = c.strike() * self.rate_discount();

        let decay = -spot_disc * norm_pdf(d1) * c.volatility() / (2.0 * c.maturity().sqrt());
        let carry = match c.side() {
            OptionSide::Call => {
                c.dividend_yield() * spot_disc * norm_cdf(d1)
                    - c.rate() * strike_disc * norm_cdf(d2)
            }
            OptionSide::Put => {
                -c.dividend_yield() * spot_disc * norm_cdf(-d1)
                    + c.rate() * strike_disc * norm_cdf(-d2)
            }
        };
        (decay + carry) / DAYS_PER_YEAR
    }

    /// Rho per rate point.
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂) / 100
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂) / 100
    pub fn rho(&self) -> f64 {
        let c = &self.contract;
        let scale = c.strike() * c.maturity() * self.rate_discount() / 100.0;
        match c.side() {
            OptionSide::Call => scale * norm_cdf(self.d2()),
            OptionSide::Put => -scale * norm_cdf(-self.d2()),
        }
    }
}

impl OptionPricer for BlackScholes {
    fn contract(&self) -> &Contract {
        &self.contract
    }

    fn price(&self) -> Result<f64, PricingError> {
        debug!(side = %self.contract.side(), "Pricing with Black-Scholes");
        let price = match self.contract.side() {
            OptionSide::Call => self.price_call(),
            OptionSide::Put => self.price_put(),
        };
        PricingError::check_finite("black_scholes", price)
    }

    fn greeks(&self) -> Result<Greeks, PricingError> {
        Ok(Greeks {
            delta: Some(self.delta()),
            gamma: Some(self.gamma()),
            vega: Some(self.vega()),
            theta: Some(self.theta()),
            rho: Some(self.rho()),
        })
    }
}
