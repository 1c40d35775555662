//! # pricer_core: Foundation layer of the option pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-layer architecture, providing:
//! - Validated option contracts: `Contract`, `OptionSide` (`types::contract`)
//! - Error taxonomy: `ValidationError`, `PricingError` (`types::error`)
//! - Greeks containers and bump-and-revalue helpers (`greeks`)
//! - The `OptionPricer` capability implemented by every model (`traits`)
//! - TOML engine configuration (`config`)
//! - The yield curve interface for curve-based instruments (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error enums
//! - serde + toml: Configuration loading
//! - tracing: Structured logging
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::greeks::Greek;
//! use pricer_core::types::{Contract, OptionSide};
//!
//! let contract = Contract::new(100.0, 95.0, 0.5, 0.25, 0.03, 0.01, OptionSide::Put).unwrap();
//! assert_eq!(contract.strike(), 95.0);
//!
//! let err = Contract::new(-1.0, 95.0, 0.5, 0.25, 0.03, 0.01, OptionSide::Put).unwrap_err();
//! assert_eq!(err.parameter(), "spot");
//!
//! assert_eq!(Greek::Vega.name(), "vega");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod greeks;
pub mod market_data;
pub mod traits;
pub mod types;
