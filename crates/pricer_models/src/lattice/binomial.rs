//! Cox-Ross-Rubinstein binomial lattice with American exercise.
//!
//! ## Parameters
//!
//! With `n` steps and `dt = T/n`:
//! - up = e^(σ√dt), down = 1/up
//! - growth = e^((r-q)dt), p = (growth - down) / (up - down)
//! - each step is discounted at e^(-r·dt)
//!
//! When the step is too coarse for the drift, `p` leaves [0, 1]; the tree
//! is still priced and a warning is logged.
//!
//! Backward induction runs in a single index-addressed buffer of `n + 1`
//! node values; node `j` at step `i` sits at spot S·down^i·(up/down)^j.
//! Every node takes `max(continuation, intrinsic)`, which prices early
//! exercise.
//!
//! Greeks are bump-and-revalue on sibling trees with the same step count.

use pricer_core::config::EngineConfig;
use pricer_core::greeks::{BumpSizes, Greeks, Revaluable};
use pricer_core::traits::OptionPricer;
use pricer_core::types::{require_count, Contract, PricingError, ValidationError};
use tracing::{debug, warn};

/// American option priced on a CRR binomial tree.
///
/// # Examples
/// ```
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_models::lattice::BinomialTree;
///
/// let put = Contract::new(90.0, 100.0, 1.0, 0.2, 0.08, 0.0, OptionSide::Put).unwrap();
/// let tree = BinomialTree::new(put, 200).unwrap();
///
/// // Deep in the money: worth at least immediate exercise
/// assert!(tree.price().unwrap() >= 10.0);
///
/// assert!(BinomialTree::new(put, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialTree {
    contract: Contract,
    steps: usize,
    bumps: BumpSizes,
}

impl BinomialTree {
    /// Creates a tree with `steps` time steps.
    ///
    /// # Errors
    /// `ValidationError::InvalidCount` if `steps` is zero.
    pub fn new(contract: Contract, steps: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            contract,
            steps: require_count("steps", steps)?,
            bumps: BumpSizes::default(),
        })
    }

    /// Creates a tree using the configured step count and bump sizes.
    pub fn from_config(contract: Contract, config: &EngineConfig) -> Result<Self, ValidationError> {
        Ok(Self::new(contract, config.binomial.steps)?.with_bumps(config.bumps))
    }

    /// Replaces the finite-difference bump sizes.
    pub fn with_bumps(mut self, bumps: BumpSizes) -> Self {
        self.bumps = bumps;
        self
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Runs the backward induction for an arbitrary contract.
    fn induce(&self, contract: &Contract) -> Result<f64, PricingError> {
        let n = self.steps;
        let dt = contract.maturity() / n as f64;
        let up = (contract.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((contract.rate() - contract.dividend_yield()) * dt).exp();
        let p = (growth - down) / (up - down);
        if !(0.0..=1.0).contains(&p) {
            warn!(p, steps = n, "Risk-neutral probability outside [0, 1]; steps too coarse");
        }
        let disc = (-contract.rate() * dt).exp();
        let disc_p = disc * p;
        let disc_1mp = disc * (1.0 - p);
        let ratio = up / down;

        debug!(steps = n, up, p, side = %contract.side(), "Pricing on binomial tree");

        let mut values = vec![0.0_f64; n + 1];
        let mut st = contract.spot() * down.powi(n as i32);
        for value in values.iter_mut() {
            *value = contract.intrinsic(st);
            st *= ratio;
        }

        let mut base = contract.spot() * down.powi(n as i32 - 1);
        for i in (0..n).rev() {
            let mut st = base;
            for j in 0..=i {
                let continuation = disc_p * values[j + 1] + disc_1mp * values[j];
                values[j] = continuation.max(contract.intrinsic(st));
                st *= ratio;
            }
            base *= up;
        }

        PricingError::check_finite("binomial", values[0])
    }
}

impl Revaluable for BinomialTree {
    fn contract(&self) -> &Contract {
        &self.contract
    }

    fn revalue(&self, contract: Contract) -> Result<f64, PricingError> {
        self.induce(&contract)
    }
}

impl OptionPricer for BinomialTree {
    fn contract(&self) -> &Contract {
        &self.contract
    }

    fn price(&self) -> Result<f64, PricingError> {
        self.induce(&self.contract)
    }

    fn greeks(&self) -> Result<Greeks, PricingError> {
        let base = self.price()?;
        let (delta, gamma) = self.bumps.spot_central(self, base)?;
        Ok(Greeks {
            delta: Some(delta),
            gamma: Some(gamma),
            vega: Some(self.bumps.vega(self, base)?),
            theta: Some(self.bumps.theta(self, base)?),
            rho: Some(self.bumps.rho(self, base)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionSide;

    fn atm(side: OptionSide) -> Contract {
        Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, side).unwrap()
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = BinomialTree::new(atm(OptionSide::Call), 0).unwrap_err();
        assert_eq!(err.parameter(), "steps");
    }

    #[test]
    fn test_single_step_by_hand() {
        let c = atm(OptionSide::Call);
        let up = 0.2_f64.exp();
        let down = 1.0 / up;
        let p = (0.05_f64.exp() - down) / (up - down);
        let expected = (-0.05_f64).exp() * p * (100.0 * up - 100.0);
        let price = BinomialTree::new(c, 1).unwrap().price().unwrap();
        assert_relative_eq!(price, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_call_without_dividend_converges_to_black_scholes() {
        // Early exercise is never optimal for a call with q = 0
        let c = atm(OptionSide::Call);
        let price = BinomialTree::new(c, 2000).unwrap().price().unwrap();
        assert_relative_eq!(price, BlackScholes::new(c).price_call(), epsilon = 1e-2);
    }

    #[test]
    fn test_american_put_premium() {
        let c = Contract::new(80.0, 100.0, 1.0, 0.25, 0.10, 0.0, OptionSide::Put).unwrap();
        let american = BinomialTree::new(c, 500).unwrap().price().unwrap();
        let european = BlackScholes::new(c).price_put();
        assert!(american > european);
        assert!(american >= 20.0);
    }

    #[test]
    fn test_dividend_call_premium() {
        let c = Contract::new(130.0, 100.0, 1.0, 0.2, 0.01, 0.08, OptionSide::Call).unwrap();
        let american = BinomialTree::new(c, 500).unwrap().price().unwrap();
        assert!(american >= BlackScholes::new(c).price_call());
    }

    #[test]
    fn test_probability_out_of_range_still_prices() {
        // High yield, low vol: p < 0 on coarse trees
        let c = Contract::new(100.0, 100.0, 1.0, 0.1, 0.0, 0.5, OptionSide::Put).unwrap();
        for steps in [1, 5, 10] {
            let price = BinomialTree::new(c, steps).unwrap().price().unwrap();
            assert!(price.is_finite(), "steps {}: {}", steps, price);
        }
        // Fine enough for p in [0, 1]; no early exercise at r = 0
        let fine = BinomialTree::new(c, 100).unwrap().price().unwrap();
        assert_relative_eq!(fine, BlackScholes::new(c).price_put(), epsilon = 5e-2);
    }

    #[test]
    fn test_greeks_close_to_black_scholes() {
        let c = atm(OptionSide::Call);
        let greeks = BinomialTree::new(c, 1000).unwrap().greeks().unwrap();
        let bs = BlackScholes::new(c);
        assert_eq!(greeks.len(), 5);
        assert_relative_eq!(greeks.delta.unwrap(), bs.delta(), epsilon = 1e-2);
        assert_relative_eq!(greeks.vega.unwrap(), bs.vega(), epsilon = 1e-2);
        assert_relative_eq!(greeks.rho.unwrap(), bs.rho(), epsilon = 1e-2);
        assert!(greeks.theta.unwrap() < 0.0);
    }

    #[test]
    fn test_theta_fails_inside_last_day() {
        let c = Contract::new(100.0, 100.0, 0.5 / 365.0, 0.2, 0.05, 0.0, OptionSide::Put).unwrap();
        let result = BinomialTree::new(c, 10).unwrap().greeks();
        assert!(matches!(result, Err(PricingError::Validation(_))));
    }

    #[test]
    fn test_from_config() {
        let mut config = EngineConfig::default();
        config.binomial.steps = 42;
        let tree = BinomialTree::from_config(atm(OptionSide::Put), &config).unwrap();
        assert_eq!(tree.steps(), 42);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_american_put_not_below_european(
                moneyness in 0.7..1.0_f64,
                maturity in 0.25..2.0_f64,
                volatility in 0.1..0.5_f64,
                rate in 0.05..0.15_f64,
            ) {
                let c = Contract::new(100.0 * moneyness, 100.0, maturity, volatility, rate, 0.0, OptionSide::Put).unwrap();
                let american = BinomialTree::new(c, 500).unwrap().price().unwrap();
                prop_assert!(american >= BlackScholes::new(c).price_put() - 1e-2);
                prop_assert!(american >= c.intrinsic(c.spot()) - 1e-9);
            }
        }
    }
}
