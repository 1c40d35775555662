//! # Random Number Generation
//!
//! - **Reproducibility**: every generator is seeded; the seed is retained
//! - **Streams**: [`stream_seed`] derives disjoint, deterministic sub-seeds
//!   so parallel chunks never share a generator
//! - **Static dispatch**: no `Box<dyn Trait>` in hot paths
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::for_stream(12345, 0);
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//! ```

pub mod prng;

pub use prng::{entropy_seed, stream_seed, PricerRng};
