//! Monte Carlo simulation configuration.
//!
//! [`MonteCarloConfig`] is built with [`MonteCarloConfigBuilder`] and
//! validated once at build time; [`JumpParams`] carries the optional
//! Merton jump component.

use pricer_core::config::{AsianConfig, MonteCarloSection};
use pricer_core::types::{require_count, require_finite, require_non_negative_jump, ValidationError};

/// Default number of time steps per path.
pub const DEFAULT_N_STEPS: usize = 100;

/// Default number of simulated paths.
pub const DEFAULT_N_PATHS: usize = 10_000;

/// Default number of paths per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Merton jump-diffusion parameters.
///
/// Jumps arrive as a Poisson process of intensity λ; each jump adds a
/// `Normal(mean, volatility)` increment to the log-spot.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::JumpParams;
///
/// let jumps = JumpParams::new(0.5, -0.1, 0.15).unwrap();
/// assert!(jumps.is_active());
///
/// assert!(JumpParams::new(-0.5, 0.0, 0.1).is_err());
/// assert!(!JumpParams::new(0.0, 0.0, 0.0).unwrap().is_active());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JumpParams {
    intensity: f64,
    mean: f64,
    volatility: f64,
}

impl JumpParams {
    /// Creates validated jump parameters.
    ///
    /// # Errors
    ///
    /// - `ValidationError::NegativeJumpParameter` if λ < 0 or jump vol < 0
    /// - `ValidationError::NonFinite` for NaN or infinite inputs
    pub fn new(intensity: f64, mean: f64, volatility: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            intensity: require_non_negative_jump("jump_intensity", intensity)?,
            mean: require_finite("jump_mean", mean)?,
            volatility: require_non_negative_jump("jump_vol", volatility)?,
        })
    }

    /// Jump intensity λ (expected jumps per year).
    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Mean of a single log-jump.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of a single log-jump.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns `true` when jumps can occur (λ > 0).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }
}

/// Monte Carlo simulation configuration.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert_eq!(config.seed(), Some(42));
/// assert!(config.jumps().is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    seed: Option<u64>,
    jumps: Option<JumpParams>,
    parallel: bool,
    chunk_size: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_N_PATHS,
            n_steps: DEFAULT_N_STEPS,
            seed: None,
            jumps: None,
            parallel: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Builds the generic engine configuration from its TOML section.
    pub fn from_section(section: &MonteCarloSection) -> Result<Self, ValidationError> {
        let mut builder = Self::builder()
            .n_steps(section.n_steps)
            .n_paths(section.n_paths)
            .parallel(section.parallel)
            .chunk_size(section.chunk_size);
        if let Some(seed) = section.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    /// Builds the Asian option configuration from its TOML section.
    pub fn from_asian(section: &AsianConfig) -> Result<Self, ValidationError> {
        let mut builder = Self::builder()
            .n_steps(section.n_steps)
            .n_paths(section.n_paths);
        if let Some(seed) = section.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the jump parameters, if any.
    #[inline]
    pub fn jumps(&self) -> Option<JumpParams> {
        self.jumps
    }

    /// Whether chunks run on the rayon pool.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Paths per chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns a copy with the given seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of chunks the paths are split into.
    #[inline]
    pub fn n_chunks(&self) -> usize {
        self.n_paths.div_ceil(self.chunk_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidCount` if `n_paths`, `n_steps` or
    /// `chunk_size` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_count("n_paths", self.n_paths)?;
        require_count("n_steps", self.n_steps)?;
        require_count("chunk_size", self.chunk_size)?;
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields take the defaults: 100 steps, 10 000 paths, no seed, no
/// jumps, parallel execution in chunks of 4096 paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    jumps: Option<JumpParams>,
    parallel: Option<bool>,
    chunk_size: Option<usize>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables Merton jumps.
    #[inline]
    pub fn jumps(mut self, jumps: JumpParams) -> Self {
        self.jumps = Some(jumps);
        self
    }

    /// Enables or disables parallel chunk execution.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Sets the number of paths per chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidCount` for a zero path, step or chunk count.
    pub fn build(self) -> Result<MonteCarloConfig, ValidationError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            n_steps: self.n_steps.unwrap_or(defaults.n_steps),
            seed: self.seed,
            jumps: self.jumps,
            parallel: self.parallel.unwrap_or(defaults.parallel),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
        };
        config.validate()?;
        Ok(config)
    }
}
