//! Trinomial lattice for knock-out barrier options.
//!
//! ## Branch geometry
//!
//! With `dt = T/steps`, the raw branch width is
//! `n = ln(B/S) / (σ√dt)`. When `|n| > 2` it is normalised by its own
//! truncation, `n / trunc(n)`, so that the barrier falls on a node
//! `trunc(n)` levels away from the spot. When `|n| <= 2` the raw value is
//! kept. Then `pm = 1 - 1/n²` is negative and the outer branch weights
//! exceed one, so the induction is unstable: a barrier within a few σ√dt
//! of the spot yields prices of astronomically large magnitude (either
//! sign), or a non-finite value reported as `NumericalInstability`. The
//! rule is kept as is and logged with `warn!`.
//!
//! - dx = n·σ√dt
//! - pu = 0.5/n² + ν√dt / (2nσ), pd = 0.5/n² - ν√dt / (2nσ), pm = 1 - 1/n²
//! - ν = r - q - σ²/2, each step discounted at e^(-r·dt)
//!
//! ## Knock-out rule
//!
//! A node is worth zero whenever its spot is at or above the barrier, at
//! maturity and at every interior step. The test is the same single
//! inequality for up and down barriers, so a barrier below the spot
//! knocks out the root itself and the price is zero.

use pricer_core::config::EngineConfig;
use pricer_core::greeks::{BumpSizes, Greeks, Revaluable};
use pricer_core::traits::OptionPricer;
use pricer_core::types::{require_barrier, require_count, Contract, PricingError, ValidationError};
use tracing::{debug, warn};

/// Side of the spot the barrier sits on.
///
/// Derived from the sign of ln(barrier/spot). The knock-out test does not
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierDirection {
    /// Barrier at or above the spot.
    Up,
    /// Barrier below the spot.
    Down,
}

/// Derived lattice parameters, exposed for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchParameters {
    /// ln(B/S) / (σ√dt) before normalisation.
    pub raw_width: f64,
    /// Branch width actually used.
    pub width: f64,
    /// Whether `width` was normalised by `trunc(raw_width)`.
    pub normalised: bool,
    /// Log-spot spacing between adjacent nodes.
    pub dx: f64,
    /// Up-branch probability.
    pub pu: f64,
    /// Middle-branch probability.
    pub pm: f64,
    /// Down-branch probability.
    pub pd: f64,
    /// Per-step discount factor.
    pub discount: f64,
}

impl BranchParameters {
    fn derive(contract: &Contract, barrier: f64, steps: usize) -> Self {
        let dt = contract.maturity() / steps as f64;
        let sigma = contract.volatility();
        let sig_sqrt_dt = sigma * dt.sqrt();

        let raw_width = (barrier / contract.spot()).ln() / sig_sqrt_dt;
        let normalised = raw_width.abs() > 2.0;
        let width = if normalised {
            raw_width / raw_width.trunc()
        } else {
            raw_width
        };

        let nu = contract.rate() - contract.dividend_yield() - 0.5 * sigma * sigma;
        let drift_term = nu * dt.sqrt() / (2.0 * width * sigma);
        let inv_sq = 1.0 / (width * width);

        Self {
            raw_width,
            width,
            normalised,
            dx: width * sig_sqrt_dt,
            pu: 0.5 * inv_sq + drift_term,
            pm: 1.0 - inv_sq,
            pd: 0.5 * inv_sq - drift_term,
            discount: (-contract.rate() * dt).exp(),
        }
    }
}

/// Knock-out barrier option priced on a trinomial lattice.
///
/// # Examples
/// ```
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{Contract, OptionSide};
/// use pricer_models::lattice::{BarrierDirection, TrinomialBarrier};
///
/// let call = Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
/// let up_and_out = TrinomialBarrier::new(call, 130.0, 100).unwrap();
///
/// assert_eq!(up_and_out.direction(), BarrierDirection::Up);
/// let price = up_and_out.price().unwrap();
/// assert!(price > 0.0 && price < 10.45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrinomialBarrier {
    contract: Contract,
    barrier: f64,
    steps: usize,
    bumps: BumpSizes,
}

impl TrinomialBarrier {
    /// Creates a barrier lattice.
    ///
    /// # Errors
    /// - `ValidationError::NonPositive` / `NonFinite` for an invalid barrier
    /// - `ValidationError::InvalidCount` if `steps` is zero
    pub fn new(contract: Contract, barrier: f64, steps: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            contract,
            barrier: require_barrier(barrier)?,
            steps: require_count("steps", steps)?,
            bumps: BumpSizes::default(),
        })
    }

    /// Creates a barrier lattice using the configured step count and bumps.
    pub fn from_config(
        contract: Contract,
        barrier: f64,
        config: &EngineConfig,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(contract, barrier, config.trinomial.steps)?.with_bumps(config.bumps))
    }

    /// Replaces the finite-difference bump sizes.
    pub fn with_bumps(mut self, bumps: BumpSizes) -> Self {
        self.bumps = bumps;
        self
    }

    /// Barrier level.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Side of the spot the barrier sits on.
    pub fn direction(&self) -> BarrierDirection {
        if (self.barrier / self.contract.spot()).ln() >= 0.0 {
            BarrierDirection::Up
        } else {
            BarrierDirection::Down
        }
    }

    /// Lattice parameters for the current contract.
    pub fn branch_parameters(&self) -> BranchParameters {
        BranchParameters::derive(&self.contract, self.barrier, self.steps)
    }

    fn induce(&self, contract: &Contract) -> Result<f64, PricingError> {
        let steps = self.steps;
        let barrier = self.barrier;
        let params = BranchParameters::derive(contract, barrier, steps);

        debug!(
            steps,
            barrier,
            width = params.width,
            dx = params.dx,
            side = %contract.side(),
            "Pricing on trinomial barrier lattice"
        );
        if !params.normalised {
            warn!(
                raw_width = params.raw_width,
                "Branch width |n| <= 2, normalisation skipped; node spacing is coarse"
            );
        }
        if params.pm < 0.0 {
            warn!(pm = params.pm, "Negative middle-branch probability");
        }

        let disc_pu = params.discount * params.pu;
        let disc_pm = params.discount * params.pm;
        let disc_pd = params.discount * params.pd;

        let width = 2 * steps + 1;
        let mut spots = vec![0.0_f64; width];
        spots[0] = contract.spot() * (-(steps as f64) * params.dx).exp();
        let growth = params.dx.exp();
        for i in 1..width {
            spots[i] = spots[i - 1] * growth;
        }

        let mut values: Vec<f64> = spots
            .iter()
            .map(|&s| if s >= barrier { 0.0 } else { contract.intrinsic(s) })
            .collect();
        let mut scratch = vec![0.0_f64; width];

        for t in (0..steps).rev() {
            for i in (steps - t)..=(steps + t) {
                scratch[i] = if spots[i] >= barrier {
                    0.0
                } else {
                    disc_pd * values[i - 1] + disc_pm * values[i] + disc_pu * values[i + 1]
                };
            }
            std::mem::swap(&mut values, &mut scratch);
        }

        PricingError::check_finite("trinomial", values[steps])
    }
}

impl Revaluable for TrinomialBarrier {
    fn contract(&self) -> &Contract {
        &self.contract
    }

    fn revalue(&self, contract: Contract) -> Result<f64, PricingError> {
        self.induce(&contract)
    }
}

impl OptionPricer for TrinomialBarrier {
    fn contract(&self) -> &Contract {
        &self.contract
    }

    fn price(&self) -> Result<f64, PricingError> {
        self.induce(&self.contract)
    }

    /// Delta and gamma only.
    fn greeks(&self) -> Result<Greeks, PricingError> {
        let base = self.price()?;
        let (delta, gamma) = self.bumps.spot_central(self, base)?;
        Ok(Greeks {
            delta: Some(delta),
            gamma: Some(gamma),
            ..Greeks::default()
        })
    }
}
