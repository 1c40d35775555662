//! Path-simulation option model.
//!
//! Wraps a [`MonteCarloEngine`] and a [`PathPayoff`] behind
//! [`OptionPricer`]. Greeks are bump-and-revalue with common random
//! numbers: the base run and every bumped run share one base seed, which
//! is the configured seed or, when none is set, one entropy draw per
//! `greeks()`/`valuation()` call.
//!
//! | Payoff | Greeks |
//! |--------|--------|
//! | Terminal | delta, gamma, vega, theta, rho |
//! | ArithmeticAverage | delta (forward), vega |

use pricer_core::config::EngineConfig;
use pricer_core::greeks::{BumpSizes, Greeks, Revaluable, Valuation};
use pricer_core::traits::OptionPricer;
use pricer_core::types::{Contract, PricingError, ValidationError};

use super::config::MonteCarloConfig;
use super::engine::{Estimate, MonteCarloEngine};
use super::payoff::PathPayoff;

/// Monte Carlo option model.
///
/// # Examples
///
/// ```rust
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_pricing::mc::{MonteCarloConfig, PathSimulation};
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// let config = MonteCarloConfig::builder().n_paths(5_000).n_steps(10).seed(7).build().unwrap();
///
/// let asian = PathSimulation::asian(contract, config);
/// let valuation = asian.valuation().unwrap();
/// assert!(valuation.std_error.unwrap() > 0.0);
/// assert_eq!(valuation.greeks.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSimulation {
    engine: MonteCarloEngine,
    payoff: PathPayoff,
    bumps: BumpSizes,
}

impl PathSimulation {
    /// Creates a model for an arbitrary payoff.
    pub fn new(contract: Contract, config: MonteCarloConfig, payoff: PathPayoff) -> Self {
        Self {
            engine: MonteCarloEngine::new(contract, config),
            payoff,
            bumps: BumpSizes::default(),
        }
    }

    /// European (terminal payoff) model.
    pub fn european(contract: Contract, config: MonteCarloConfig) -> Self {
        Self::new(contract, config, PathPayoff::Terminal)
    }

    /// Asian (arithmetic-average payoff) model.
    pub fn asian(contract: Contract, config: MonteCarloConfig) -> Self {
        Self::new(contract, config, PathPayoff::ArithmeticAverage)
    }

    /// European model using the `[monte_carlo]` section and bump sizes.
    pub fn european_from_config(
        contract: Contract,
        config: &EngineConfig,
    ) -> Result<Self, ValidationError> {
        let mc = MonteCarloConfig::from_section(&config.monte_carlo)?;
        Ok(Self::european(contract, mc).with_bumps(config.bumps))
    }

    /// Asian model using the `[asian]` section and bump sizes.
    pub fn asian_from_config(
        contract: Contract,
        config: &EngineConfig,
    ) -> Result<Self, ValidationError> {
        let mc = MonteCarloConfig::from_asian(&config.asian)?;
        Ok(Self::asian(contract, mc).with_bumps(config.bumps))
    }

    /// Replaces the finite-difference bump sizes.
    pub fn with_bumps(mut self, bumps: BumpSizes) -> Self {
        self.bumps = bumps;
        self
    }

    /// The payoff being simulated.
    #[inline]
    pub fn payoff(&self) -> PathPayoff {
        self.payoff
    }

    /// The simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        self.engine.config()
    }

    /// The underlying engine.
    #[inline]
    pub fn engine(&self) -> &MonteCarloEngine {
        &self.engine
    }

    /// Price and standard error in one run.
    pub fn estimate(&self) -> Result<Estimate, PricingError> {
        self.estimate_with_seed(self.engine.base_seed())
    }

    fn estimate_with_seed(&self, seed: u64) -> Result<Estimate, PricingError> {
        self.engine.simulate(self.engine.contract(), self.payoff, seed)
    }

    fn greeks_with_seed(&self, seed: u64, base_price: f64) -> Result<Greeks, PricingError> {
        let crn = CommonRandomNumbers { model: self, seed };
        match self.payoff {
            PathPayoff::Terminal => {
                let (delta, gamma) = self.bumps.spot_central(&crn, base_price)?;
                Ok(Greeks {
                    delta: Some(delta),
                    gamma: Some(gamma),
                    vega: Some(self.bumps.vega(&crn, base_price)?),
                    theta: Some(self.bumps.theta(&crn, base_price)?),
                    rho: Some(self.bumps.rho(&crn, base_price)?),
                })
            }
            PathPayoff::ArithmeticAverage => Ok(Greeks {
                delta: Some(self.bumps.spot_forward(&crn, base_price)?),
                vega: Some(self.bumps.vega(&crn, base_price)?),
                ..Greeks::default()
            }),
        }
    }
}

/// Revalues a model with a pinned base seed.
struct CommonRandomNumbers<'a> {
    model: &'a PathSimulation,
    seed: u64,
}

impl Revaluable for CommonRandomNumbers<'_> {
    fn contract(&self) -> &Contract {
        self.model.engine.contract()
    }

    fn revalue(&self, contract: Contract) -> Result<f64, PricingError> {
        self.model
            .engine
            .simulate(&contract, self.model.payoff, self.seed)
            .map(|e| e.price)
    }
}

/// Revaluation for external bump-and-revalue.
///
/// Each call reuses the configured seed, so differences between calls are
/// free of sampling noise.
///
/// # Errors
/// `PricingError::NumericalInstability` when no seed is configured: fresh
/// draws per call would make any finite difference pure noise.
impl Revaluable for PathSimulation {
    fn contract(&self) -> &Contract {
        self.engine.contract()
    }

    fn revalue(&self, contract: Contract) -> Result<f64, PricingError> {
        let seed = self.config().seed().ok_or_else(|| {
            PricingError::NumericalInstability(
                "revaluing an unseeded simulation draws independent paths; configure a seed"
                    .to_string(),
            )
        })?;
        self.engine
            .simulate(&contract, self.payoff, seed)
            .map(|e| e.price)
    }
}

impl OptionPricer for PathSimulation {
    fn contract(&self) -> &Contract {
        self.engine.contract()
    }

    fn price(&self) -> Result<f64, PricingError> {
        self.estimate().map(|e| e.price)
    }

    fn greeks(&self) -> Result<Greeks, PricingError> {
        let seed = self.engine.base_seed();
        let base = self.estimate_with_seed(seed)?;
        self.greeks_with_seed(seed, base.price)
    }

    fn valuation(&self) -> Result<Valuation, PricingError> {
        let seed = self.engine.base_seed();
        let base = self.estimate_with_seed(seed)?;
        Ok(Valuation {
            price: base.price,
            std_error: Some(base.std_error),
            greeks: self.greeks_with_seed(seed, base.price)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::greeks::Greek;
    use pricer_core::types::OptionSide;
    use pricer_models::analytical::BlackScholes;

    fn atm(side: OptionSide) -> Contract {
        Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, side).unwrap()
    }

    fn seeded(n_paths: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(4)
            .seed(2024)
            .build()
            .unwrap()
    }

    #[test]
    fn test_terminal_greeks_close_to_black_scholes() {
        let model = PathSimulation::european(atm(OptionSide::Call), seeded(100_000));
        let greeks = model.greeks().unwrap();
        let bs = BlackScholes::new(atm(OptionSide::Call));

        assert_eq!(greeks.len(), 5);
        assert_relative_eq!(greeks.delta.unwrap(), bs.delta(), epsilon = 2e-2);
        assert_relative_eq!(greeks.vega.unwrap(), bs.vega(), epsilon = 2e-2);
        assert_relative_eq!(greeks.rho.unwrap(), bs.rho(), epsilon = 2e-2);
        assert!(greeks.theta.unwrap() < 0.0);
    }

    #[test]
    fn test_asian_greeks_are_delta_and_vega() {
        let model = PathSimulation::asian(atm(OptionSide::Call), seeded(2_000));
        let greeks = model.greeks().unwrap();
        let names: Vec<_> = greeks.iter().map(|(g, _)| g).collect();
        assert_eq!(names, vec![Greek::Delta, Greek::Vega]);
        assert!(greeks.delta.unwrap() > 0.0);
        assert!(greeks.vega.unwrap() > 0.0);
    }

    #[test]
    fn test_valuation_carries_std_error() {
        let model = PathSimulation::european(atm(OptionSide::Put), seeded(5_000));
        let valuation = model.valuation().unwrap();
        let estimate = model.estimate().unwrap();
        assert_eq!(valuation.price, estimate.price);
        assert_eq!(valuation.std_error, Some(estimate.std_error));
    }

    #[test]
    fn test_unseeded_greeks_still_use_common_numbers() {
        let config = MonteCarloConfig::builder().n_paths(20_000).n_steps(4).build().unwrap();
        let model = PathSimulation::european(atm(OptionSide::Call), config);
        let delta = model.greeks().unwrap().delta.unwrap();
        assert!((delta - 0.6368).abs() < 0.1, "delta {}", delta);
    }

    #[test]
    fn test_external_bumps_share_configured_seed() {
        let model = PathSimulation::european(atm(OptionSide::Call), seeded(20_000));
        let base = model.price().unwrap();
        let (delta, _) = BumpSizes::default().spot_central(&model, base).unwrap();
        assert_relative_eq!(delta, BlackScholes::new(atm(OptionSide::Call)).delta(), epsilon = 3e-2);
    }

    #[test]
    fn test_external_bumps_reject_unseeded_model() {
        let config = MonteCarloConfig::builder().n_paths(1_000).n_steps(4).build().unwrap();
        let model = PathSimulation::european(atm(OptionSide::Call), config);
        let base = model.price().unwrap();
        let result = BumpSizes::default().spot_central(&model, base);
        assert!(matches!(result, Err(PricingError::NumericalInstability(_))));
        // Internal Greeks still pin one seed per call
        assert!(model.greeks().is_ok());
    }

    #[test]
    fn test_from_config_uses_sections() {
        let engine = EngineConfig::default();
        let asian = PathSimulation::asian_from_config(atm(OptionSide::Call), &engine).unwrap();
        assert_eq!(asian.config().n_paths(), 500);
        assert_eq!(asian.config().seed(), Some(42));
        assert_eq!(asian.payoff(), PathPayoff::ArithmeticAverage);

        let european = PathSimulation::european_from_config(atm(OptionSide::Call), &engine).unwrap();
        assert_eq!(european.config().n_steps(), 100);
        assert_eq!(european.payoff(), PathPayoff::Terminal);
    }

    #[test]
    fn test_seeded_price_is_reproducible() {
        let model = PathSimulation::asian(atm(OptionSide::Call), seeded(3_000));
        assert_eq!(model.price().unwrap(), model.price().unwrap());
    }
}
