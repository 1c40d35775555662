//! Closed-form pricing for European options.
//!
//! - [`distributions`]: Standard normal CDF and PDF
//! - [`black_scholes`]: Black-Scholes price and analytical Greeks
//!   (Delta, Gamma, Vega, Theta, Rho)

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
