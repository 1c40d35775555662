//! Lattice models.
//!
//! - [`binomial`]: CRR tree with American exercise, all five Greeks
//! - [`trinomial`]: Knock-out barrier tree, delta and gamma
//!
//! Both run backward induction over index-addressed buffers owned by the
//! pricing call and compute Greeks by bump-and-revalue.

pub mod binomial;
pub mod trinomial;

pub use binomial::BinomialTree;
pub use trinomial::{BarrierDirection, BranchParameters, TrinomialBarrier};
