//! Engine configuration.
//!
//! Default discretisation and simulation parameters for every model, loaded
//! from TOML. Every field is optional in the file; missing fields fall back
//! to the defaults below.
//!
//! ```toml
//! [binomial]
//! steps = 500
//!
//! [trinomial]
//! steps = 200
//!
//! [monte_carlo]
//! n_steps = 252
//! n_paths = 50000
//! seed = 42
//! parallel = true
//! chunk_size = 4096
//!
//! [asian]
//! n_steps = 50
//! n_paths = 500
//! seed = 42
//!
//! [bumps]
//! spot = 0.01
//! volatility = 0.0001
//! rate = 0.0001
//! maturity_days = 1.0
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::greeks::BumpSizes;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Configuration file error: {0}")]
    Io(#[from] std::io::Error),

    /// A value is out of range.
    #[error("Invalid configuration value {field}: {reason}")]
    InvalidValue {
        /// Dotted field path
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Binomial lattice defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BinomialConfig {
    /// Number of time steps.
    pub steps: usize,
}

impl Default for BinomialConfig {
    fn default() -> Self {
        Self { steps: 100 }
    }
}

/// Trinomial barrier lattice defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrinomialConfig {
    /// Number of time steps.
    pub steps: usize,
}

impl Default for TrinomialConfig {
    fn default() -> Self {
        Self { steps: 100 }
    }
}

/// Monte Carlo engine defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonteCarloSection {
    /// Time steps per path.
    pub n_steps: usize,
    /// Number of paths.
    pub n_paths: usize,
    /// Seed; `None` draws fresh entropy on every run.
    pub seed: Option<u64>,
    /// Simulate path chunks on the rayon pool.
    pub parallel: bool,
    /// Paths per chunk (each chunk owns one RNG stream).
    pub chunk_size: usize,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            n_steps: 100,
            n_paths: 10_000,
            seed: None,
            parallel: true,
            chunk_size: 4096,
        }
    }
}

/// Asian (path-average) option defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AsianConfig {
    /// Averaging steps per path.
    pub n_steps: usize,
    /// Number of paths.
    pub n_paths: usize,
    /// Seed.
    pub seed: Option<u64>,
}

impl Default for AsianConfig {
    fn default() -> Self {
        Self {
            n_steps: 50,
            n_paths: 500,
            seed: Some(42),
        }
    }
}

/// Engine configuration.
///
/// # Examples
///
/// ```rust
/// use pricer_core::config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(
///     r#"
///     [binomial]
///     steps = 500
///
///     [monte_carlo]
///     seed = 7
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.binomial.steps, 500);
/// assert_eq!(config.trinomial.steps, 100);
/// assert_eq!(config.monte_carlo.seed, Some(7));
/// assert_eq!(config.monte_carlo.n_paths, 10_000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Binomial lattice section.
    pub binomial: BinomialConfig,
    /// Trinomial lattice section.
    pub trinomial: TrinomialConfig,
    /// Generic Monte Carlo section.
    pub monte_carlo: MonteCarloSection,
    /// Asian option section.
    pub asian: AsianConfig,
    /// Finite-difference bump sizes.
    pub bumps: BumpSizes,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "Engine configuration loaded");
        Ok(config)
    }

    /// Validates counts and bump sizes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any count is zero or any bump
    /// size is not finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("binomial.steps", self.binomial.steps),
            ("trinomial.steps", self.trinomial.steps),
            ("monte_carlo.n_steps", self.monte_carlo.n_steps),
            ("monte_carlo.n_paths", self.monte_carlo.n_paths),
            ("monte_carlo.chunk_size", self.monte_carlo.chunk_size),
            ("asian.n_steps", self.asian.n_steps),
            ("asian.n_paths", self.asian.n_paths),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        let bumps = [
            ("bumps.spot", self.bumps.spot),
            ("bumps.volatility", self.bumps.volatility),
            ("bumps.rate", self.bumps.rate),
            ("bumps.maturity_days", self.bumps.maturity_days),
        ];
        for (field, value) in bumps {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{} must be finite and strictly positive", value),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.binomial.steps, 100);
        assert_eq!(config.trinomial.steps, 100);
        assert_eq!(config.monte_carlo.n_steps, 100);
        assert_eq!(config.monte_carlo.n_paths, 10_000);
        assert_eq!(config.monte_carlo.seed, None);
        assert!(config.monte_carlo.parallel);
        assert_eq!(config.asian.n_steps, 50);
        assert_eq!(config.asian.n_paths, 500);
        assert_eq!(config.asian.seed, Some(42));
        assert_eq!(config.bumps, BumpSizes::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_bumps_section() {
        let config = EngineConfig::from_toml_str(
            r#"
            [bumps]
            spot = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(config.bumps.spot, 0.05);
        assert_eq!(config.bumps.volatility, 1e-4);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [binomial]
            steps = 0
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "binomial.steps"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_bump_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [bumps]
            rate = -0.0001
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("bumps.rate"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("[binomial\nsteps = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/engine.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
