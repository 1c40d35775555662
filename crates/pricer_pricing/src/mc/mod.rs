//! Monte Carlo simulation.
//!
//! # Architecture
//!
//! ```text
//! PathSimulation            (OptionPricer, bump-and-revalue Greeks)
//! └── MonteCarloEngine
//!     ├── MonteCarloConfig  (paths, steps, seed, jumps, chunking)
//!     ├── PathDynamics      (GBM / Merton step in log space)
//!     ├── PathPayoff        (terminal or arithmetic average)
//!     └── PayoffAccumulator (per-chunk Welford, merged in order)
//! ```
//!
//! # Examples
//!
//! ## Merton jump-diffusion
//!
//! ```rust
//! use pricer_core::types::{Contract, OptionSide};
//! use pricer_pricing::mc::{JumpParams, MonteCarloConfig, MonteCarloEngine};
//!
//! let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Put).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(50)
//!     .seed(42)
//!     .jumps(JumpParams::new(0.5, -0.1, 0.15).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let engine = MonteCarloEngine::new(contract, config);
//! let (price, std_error) = engine.price_european(OptionSide::Put).unwrap();
//! assert!(price > 0.0);
//! assert!(std_error > 0.0);
//!
//! // Seeded runs are reproducible
//! assert_eq!(engine.price_european(OptionSide::Put).unwrap(), (price, std_error));
//! ```

mod accumulator;
mod config;
mod engine;
mod paths;
mod payoff;
mod pricer;

pub use accumulator::PayoffAccumulator;
pub use config::{
    JumpParams, MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_N_PATHS,
    DEFAULT_N_STEPS,
};
pub use engine::{Estimate, MonteCarloEngine};
pub use paths::{PathDynamics, SimulatedPaths};
pub use payoff::PathPayoff;
pub use pricer::PathSimulation;
