//! Monte Carlo engine.
//!
//! Paths are split into fixed-size chunks. Chunk `i` owns an RNG seeded
//! with `stream_seed(base, i)` and folds its discounted payoffs into a
//! [`PayoffAccumulator`]; chunks are merged in index order. The chunk
//! layout depends only on the configuration, so a seeded run gives the
//! same bits on the rayon pool as on the calling thread.

use pricer_core::types::{Contract, OptionSide, PricingError};
use rayon::prelude::*;
use tracing::{debug, trace};

use super::accumulator::PayoffAccumulator;
use super::config::MonteCarloConfig;
use super::paths::{PathDynamics, SimulatedPaths};
use super::payoff::PathPayoff;
use crate::rng::{entropy_seed, PricerRng};

/// Discounted Monte Carlo estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    /// Mean discounted payoff.
    pub price: f64,
    /// Standard error of the mean.
    pub std_error: f64,
}

impl Estimate {
    /// Splits into `(price, std_error)`.
    #[inline]
    pub fn into_pair(self) -> (f64, f64) {
        (self.price, self.std_error)
    }
}

/// Generic path-simulation engine under GBM or Merton dynamics.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
///
/// let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(10)
///     .seed(42)
///     .build()
///     .unwrap();
/// let engine = MonteCarloEngine::new(contract, config);
///
/// let (price, std_error) = engine.price_european(OptionSide::Call).unwrap();
/// assert!((price - 10.4506).abs() < 4.0 * std_error);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonteCarloEngine {
    contract: Contract,
    config: MonteCarloConfig,
}

impl MonteCarloEngine {
    /// Creates an engine for a contract.
    pub fn new(contract: Contract, config: MonteCarloConfig) -> Self {
        Self { contract, config }
    }

    /// The simulated contract.
    #[inline]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// The simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Discounted price and standard error of a terminal payoff.
    pub fn price_european(&self, side: OptionSide) -> Result<(f64, f64), PricingError> {
        self.simulate(&self.contract.with_side(side), PathPayoff::Terminal, self.base_seed())
            .map(Estimate::into_pair)
    }

    /// Discounted price and standard error of an arithmetic-average payoff.
    pub fn price_asian(&self, side: OptionSide) -> Result<(f64, f64), PricingError> {
        self.simulate(
            &self.contract.with_side(side),
            PathPayoff::ArithmeticAverage,
            self.base_seed(),
        )
        .map(Estimate::into_pair)
    }

    /// Simulates every trajectory and returns them all.
    ///
    /// Uses the same chunk streams as pricing, so a seeded call returns the
    /// exact paths behind [`price_european`](Self::price_european).
    pub fn generate_paths(&self) -> Result<SimulatedPaths, PricingError> {
        let dynamics = PathDynamics::new(&self.contract, &self.config)?;
        let base = self.base_seed();
        let width = self.config.n_steps() + 1;
        let chunk_len = self.config.chunk_size() * width;
        let mut values = vec![0.0_f64; self.config.n_paths() * width];

        let fill = |(chunk, block): (usize, &mut [f64])| {
            let mut rng = PricerRng::for_stream(base, chunk as u64);
            for path in block.chunks_exact_mut(width) {
                dynamics.simulate_into(&mut rng, path);
            }
        };
        if self.config.parallel() {
            values.par_chunks_mut(chunk_len).enumerate().for_each(fill);
        } else {
            values.chunks_mut(chunk_len).enumerate().for_each(fill);
        }

        Ok(SimulatedPaths::new(values, self.config.n_paths(), self.config.n_steps()))
    }

    /// Seed for this run: the configured one, or fresh entropy.
    pub(crate) fn base_seed(&self) -> u64 {
        self.config.seed().unwrap_or_else(entropy_seed)
    }

    /// Runs the simulation for `contract` under this engine's configuration.
    ///
    /// The base seed is passed explicitly so that bumped siblings can share
    /// random numbers with the base run.
    pub(crate) fn simulate(
        &self,
        contract: &Contract,
        payoff: PathPayoff,
        base_seed: u64,
    ) -> Result<Estimate, PricingError> {
        let config = &self.config;
        let dynamics = PathDynamics::new(contract, config)?;
        let n_chunks = config.n_chunks();

        debug!(
            n_paths = config.n_paths(),
            n_steps = config.n_steps(),
            n_chunks,
            jumps = dynamics.has_jumps(),
            payoff = %payoff,
            side = %contract.side(),
            parallel = config.parallel(),
            "Running Monte Carlo simulation"
        );

        let run_chunk = |chunk: usize| -> PayoffAccumulator {
            let start = chunk * config.chunk_size();
            let len = config.chunk_size().min(config.n_paths() - start);
            let mut rng = PricerRng::for_stream(base_seed, chunk as u64);
            let mut path = vec![0.0_f64; config.n_steps() + 1];
            let mut acc = PayoffAccumulator::new();
            for _ in 0..len {
                dynamics.simulate_into(&mut rng, &mut path);
                acc.push(payoff.evaluate(&path, contract.strike(), contract.side()));
            }
            trace!(chunk, paths = len, mean = acc.mean(), "Chunk complete");
            acc
        };

        let chunks: Vec<PayoffAccumulator> = if config.parallel() {
            (0..n_chunks).into_par_iter().map(run_chunk).collect()
        } else {
            (0..n_chunks).map(run_chunk).collect()
        };
        let total = chunks.iter().fold(PayoffAccumulator::new(), |mut total, acc| {
            total.merge(acc);
            total
        });

        let discount = (-contract.rate() * contract.maturity()).exp();
        Ok(Estimate {
            price: PricingError::check_finite("monte carlo", discount * total.mean())?,
            std_error: PricingError::check_finite("monte carlo", discount * total.std_error())?,
        })
    }
}
