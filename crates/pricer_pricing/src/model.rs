//! Tagged union over every pricing model.
//!
//! [`PricingModel`] dispatches [`OptionPricer`] by `match`, so callers can
//! hold any model without boxing.

use pricer_core::config::EngineConfig;
use pricer_core::greeks::{Greeks, Valuation};
use pricer_core::traits::OptionPricer;
use pricer_core::types::{Contract, PricingError, ValidationError};
use pricer_models::analytical::BlackScholes;
use pricer_models::lattice::{BinomialTree, TrinomialBarrier};

use crate::mc::PathSimulation;

/// One of the four pricing models.
///
/// # Examples
///
/// ```rust
/// use pricer_core::config::EngineConfig;
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_pricing::PricingModel;
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Put).unwrap();
/// let config = EngineConfig::default();
///
/// let models = [
///     PricingModel::analytic(contract),
///     PricingModel::binomial(contract, &config).unwrap(),
///     PricingModel::trinomial(contract, 150.0, &config).unwrap(),
/// ];
/// for model in &models {
///     let price = model.price().unwrap();
///     assert!(price > 5.0 && price < 7.0, "{}: {}", model.name(), price);
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PricingModel {
    /// Closed-form Black–Scholes.
    Analytic(BlackScholes),
    /// CRR binomial tree with early exercise.
    Binomial(BinomialTree),
    /// Trinomial knock-out barrier lattice.
    Trinomial(TrinomialBarrier),
    /// Monte Carlo path simulation.
    PathSimulation(PathSimulation),
}

impl PricingModel {
    /// Black–Scholes model.
    pub fn analytic(contract: Contract) -> Self {
        Self::Analytic(BlackScholes::new(contract))
    }

    /// Binomial model with the configured step count.
    pub fn binomial(contract: Contract, config: &EngineConfig) -> Result<Self, ValidationError> {
        BinomialTree::from_config(contract, config).map(Self::Binomial)
    }

    /// Trinomial barrier model with the configured step count.
    pub fn trinomial(
        contract: Contract,
        barrier: f64,
        config: &EngineConfig,
    ) -> Result<Self, ValidationError> {
        TrinomialBarrier::from_config(contract, barrier, config).map(Self::Trinomial)
    }

    /// European Monte Carlo model from the `[monte_carlo]` section.
    pub fn european_simulation(
        contract: Contract,
        config: &EngineConfig,
    ) -> Result<Self, ValidationError> {
        PathSimulation::european_from_config(contract, config).map(Self::PathSimulation)
    }

    /// Asian Monte Carlo model from the `[asian]` section.
    pub fn asian_simulation(
        contract: Contract,
        config: &EngineConfig,
    ) -> Result<Self, ValidationError> {
        PathSimulation::asian_from_config(contract, config).map(Self::PathSimulation)
    }

    /// Short model name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analytic(_) => "analytic",
            Self::Binomial(_) => "binomial",
            Self::Trinomial(_) => "trinomial",
            Self::PathSimulation(_) => "path_simulation",
        }
    }
}

impl From<BlackScholes> for PricingModel {
    fn from(model: BlackScholes) -> Self {
        Self::Analytic(model)
    }
}

impl From<BinomialTree> for PricingModel {
    fn from(model: BinomialTree) -> Self {
        Self::Binomial(model)
    }
}

impl From<TrinomialBarrier> for PricingModel {
    fn from(model: TrinomialBarrier) -> Self {
        Self::Trinomial(model)
    }
}

impl From<PathSimulation> for PricingModel {
    fn from(model: PathSimulation) -> Self {
        Self::PathSimulation(model)
    }
}

impl OptionPricer for PricingModel {
    fn contract(&self) -> &Contract {
        match self {
            Self::Analytic(m) => m.contract(),
            Self::Binomial(m) => OptionPricer::contract(m),
            Self::Trinomial(m) => OptionPricer::contract(m),
            Self::PathSimulation(m) => OptionPricer::contract(m),
        }
    }

    fn price(&self) -> Result<f64, PricingError> {
        match self {
            Self::Analytic(m) => m.price(),
            Self::Binomial(m) => m.price(),
            Self::Trinomial(m) => m.price(),
            Self::PathSimulation(m) => m.price(),
        }
    }

    fn greeks(&self) -> Result<Greeks, PricingError> {
        match self {
            Self::Analytic(m) => m.greeks(),
            Self::Binomial(m) => m.greeks(),
            Self::Trinomial(m) => m.greeks(),
            Self::PathSimulation(m) => m.greeks(),
        }
    }

    fn valuation(&self) -> Result<Valuation, PricingError> {
        match self {
            Self::Analytic(m) => m.valuation(),
            Self::Binomial(m) => m.valuation(),
            Self::Trinomial(m) => m.valuation(),
            Self::PathSimulation(m) => m.valuation(),
        }
    }
}
