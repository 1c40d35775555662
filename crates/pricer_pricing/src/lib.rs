//! # Pricer Pricing (Layer 3: Simulation and Dispatch)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing sits on top of the deterministic models:
//! - Seedable random number generation with deterministic per-chunk streams
//! - Monte Carlo engine under GBM or Merton jump-diffusion dynamics
//! - The path-simulation model (terminal and arithmetic-average payoffs)
//! - [`PricingModel`], the tagged union over all four models
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::config::EngineConfig;
//! use pricer_core::traits::OptionPricer;
//! use pricer_core::types::{Contract, OptionSide};
//! use pricer_pricing::PricingModel;
//!
//! let contract = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
//! let config = EngineConfig::from_toml_str("[asian]\nn_paths = 2000").unwrap();
//!
//! let asian = PricingModel::asian_simulation(contract, &config).unwrap();
//! let valuation = asian.valuation().unwrap();
//!
//! assert!(valuation.price < PricingModel::analytic(contract).price().unwrap());
//! assert!(valuation.std_error.is_some());
//! ```
//!
//! ## Parallelism
//!
//! Paths are simulated in chunks on the rayon global pool unless the
//! configuration disables it. Seeded results do not depend on the number
//! of worker threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod model;
pub mod rng;

pub use mc::{MonteCarloConfig, MonteCarloEngine, PathSimulation};
pub use model::PricingModel;
