//! Path generation for Monte Carlo simulation.
//!
//! Paths are simulated in log space:
//! ```text
//! S(t+dt) = S(t) × exp((r - q - σ²/2)dt + σ√dt × Z + J)
//! ```
//! where `J` is zero under plain GBM and, under Merton dynamics, the sum of
//! `k ~ Poisson(λ·dt)` normal log-jumps. The drift carries no jump
//! compensator.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `paths[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.

use pricer_core::types::{Contract, PricingError};
use rand_distr::Poisson;

use super::config::{JumpParams, MonteCarloConfig};
use crate::rng::PricerRng;

/// Compound Poisson-normal jump sampler for one time step.
#[derive(Clone, Copy, Debug)]
struct JumpSampler {
    counts: Poisson<f64>,
    mean: f64,
    volatility: f64,
}

impl JumpSampler {
    fn new(jumps: JumpParams, dt: f64) -> Result<Self, PricingError> {
        let counts = Poisson::new(jumps.intensity() * dt).map_err(|e| {
            PricingError::NumericalInstability(format!(
                "jump intensity {} over dt {} is not a valid Poisson rate: {}",
                jumps.intensity(),
                dt,
                e
            ))
        })?;
        Ok(Self {
            counts,
            mean: jumps.mean(),
            volatility: jumps.volatility(),
        })
    }

    /// Total log-jump over one step.
    #[inline]
    fn sample(&self, rng: &mut PricerRng) -> f64 {
        let k = rng.sample(&self.counts);
        if k > 0.0 {
            k * self.mean + self.volatility * k.sqrt() * rng.gen_normal()
        } else {
            0.0
        }
    }
}

/// Per-step dynamics derived from a contract and a configuration.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_pricing::mc::{MonteCarloConfig, PathDynamics};
/// use pricer_pricing::rng::PricerRng;
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// let config = MonteCarloConfig::builder().n_steps(12).build().unwrap();
/// let dynamics = PathDynamics::new(&contract, &config).unwrap();
///
/// let mut path = vec![0.0; 13];
/// dynamics.simulate_into(&mut PricerRng::from_seed(1), &mut path);
/// assert_eq!(path[0], 100.0);
/// assert!(path.iter().all(|s| *s > 0.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PathDynamics {
    spot: f64,
    dt: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
    jumps: Option<JumpSampler>,
}

impl PathDynamics {
    /// Derives the step constants.
    ///
    /// # Errors
    /// `PricingError::NumericalInstability` if the jump rate over one step
    /// cannot parameterise a Poisson distribution.
    pub fn new(contract: &Contract, config: &MonteCarloConfig) -> Result<Self, PricingError> {
        let dt = contract.maturity() / config.n_steps() as f64;
        let vol = contract.volatility();
        let jumps = match config.jumps() {
            Some(j) if j.is_active() => Some(JumpSampler::new(j, dt)?),
            _ => None,
        };
        Ok(Self {
            spot: contract.spot(),
            dt,
            drift_dt: (contract.rate() - contract.dividend_yield() - 0.5 * vol * vol) * dt,
            vol_sqrt_dt: vol * dt.sqrt(),
            jumps,
        })
    }

    /// Time step in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns `true` when the dynamics include jumps.
    #[inline]
    pub fn has_jumps(&self) -> bool {
        self.jumps.is_some()
    }

    /// Simulates one trajectory into `path`.
    ///
    /// `path[0]` is the spot and each following entry one time step; the
    /// slice length fixes the step count.
    pub fn simulate_into(&self, rng: &mut PricerRng, path: &mut [f64]) {
        let Some((first, rest)) = path.split_first_mut() else {
            return;
        };
        *first = self.spot;
        let mut s = self.spot;
        for slot in rest {
            let jump = match &self.jumps {
                Some(sampler) => sampler.sample(rng),
                None => 0.0,
            };
            let z = rng.gen_normal();
            s *= (self.drift_dt + self.vol_sqrt_dt * z + jump).exp();
            *slot = s;
        }
    }
}

/// Every simulated trajectory, stored row-major.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// let config = MonteCarloConfig::builder().n_paths(8).n_steps(4).seed(3).build().unwrap();
/// let paths = MonteCarloEngine::new(contract, config).generate_paths().unwrap();
///
/// assert_eq!(paths.n_paths(), 8);
/// assert_eq!(paths.path(0).len(), 5);
/// assert!(paths.iter().all(|p| p[0] == 100.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedPaths {
    values: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl SimulatedPaths {
    pub(crate) fn new(values: Vec<f64>, n_paths: usize, n_steps: usize) -> Self {
        debug_assert_eq!(values.len(), n_paths * (n_steps + 1));
        Self {
            values,
            n_paths,
            n_steps,
        }
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps (each path has `n_steps + 1` points).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns one trajectory.
    ///
    /// # Panics
    /// Panics if `index >= n_paths`.
    #[inline]
    pub fn path(&self, index: usize) -> &[f64] {
        let width = self.n_steps + 1;
        &self.values[index * width..(index + 1) * width]
    }

    /// Iterates over all trajectories.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.n_steps + 1)
    }

    /// Flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
