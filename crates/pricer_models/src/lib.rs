//! # Pricer Models (L2: Deterministic Models)
//!
//! Closed-form and lattice option models over a shared
//! [`Contract`](pricer_core::types::Contract).
//!
//! This crate provides:
//! - Standard normal distribution functions
//! - Black-Scholes price and analytical Greeks
//! - CRR binomial tree with American exercise
//! - Trinomial knock-out barrier lattice
//!
//! ## Design Principles
//!
//! - **No shared base state**: each model is a small `Copy` struct holding
//!   its contract and discretisation parameters
//! - **Sibling revaluation**: finite-difference Greeks re-price the same
//!   model on a bumped contract via [`Revaluable`](pricer_core::greeks::Revaluable)
//! - **Validated construction**: step counts and barriers are checked once,
//!   in the constructor

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
