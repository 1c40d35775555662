//! Core traits for pricing models.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait)
//! - Price and Greeks calculation (`OptionPricer` trait)
//!
//! Model dispatch is enum-based; these traits are implemented by each
//! concrete model and are not intended for `Box<dyn Trait>` use in hot
//! paths.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::OptionPricer;
