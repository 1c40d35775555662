//! Valuation result types.
//!
//! Provides [`Greeks`], a sparse set of sensitivities keyed by [`Greek`],
//! and [`Valuation`], which bundles the price, an optional Monte Carlo
//! standard error and the Greeks.

/// Greek selector.
///
/// # Conventions
///
/// - `Delta`: ∂V/∂S
/// - `Gamma`: ∂²V/∂S²
/// - `Vega`: ∂V/∂σ per 1 volatility point (raw derivative / 100)
/// - `Theta`: ∂V/∂t per calendar day, negative for time decay
/// - `Rho`: ∂V/∂r per 1 rate point (raw derivative / 100)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Greek {
    /// Delta: ∂V/∂S.
    Delta,
    /// Gamma: ∂²V/∂S².
    Gamma,
    /// Vega: ∂V/∂σ.
    Vega,
    /// Theta: time decay.
    Theta,
    /// Rho: ∂V/∂r.
    Rho,
}

impl Greek {
    /// All Greeks in reporting order.
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];

    /// Lowercase name used as the mapping key.
    pub fn name(self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        }
    }
}

impl std::fmt::Display for Greek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sensitivities produced by a model.
///
/// Not every model produces every Greek; absent ones are `None`.
///
/// # Examples
///
/// ```rust
/// use pricer_core::greeks::{Greek, Greeks};
///
/// let greeks = Greeks {
///     delta: Some(0.55),
///     gamma: Some(0.02),
///     ..Default::default()
/// };
///
/// assert_eq!(greeks.get(Greek::Delta), Some(0.55));
/// assert_eq!(greeks.get(Greek::Rho), None);
///
/// let names: Vec<&str> = greeks.iter().map(|(g, _)| g.name()).collect();
/// assert_eq!(names, vec!["delta", "gamma"]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Greeks {
    /// Delta: ∂V/∂S.
    pub delta: Option<f64>,
    /// Gamma: ∂²V/∂S².
    pub gamma: Option<f64>,
    /// Vega per volatility point.
    pub vega: Option<f64>,
    /// Theta per calendar day.
    pub theta: Option<f64>,
    /// Rho per rate point.
    pub rho: Option<f64>,
}

impl Greeks {
    /// Looks up a single Greek.
    #[inline]
    pub fn get(&self, greek: Greek) -> Option<f64> {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    /// Iterates over the Greeks that are present, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Greek, f64)> + '_ {
        Greek::ALL
            .into_iter()
            .filter_map(move |greek| self.get(greek).map(|value| (greek, value)))
    }

    /// Number of Greeks present.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no Greek is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Price, optional standard error and Greeks of one pricing call.
///
/// `std_error` is only set by simulation models, whose result is an
/// estimate rather than an exact value.
///
/// # Examples
///
/// ```rust
/// use pricer_core::greeks::{Greeks, Valuation};
///
/// let valuation = Valuation {
///     price: 10.0,
///     std_error: Some(0.1),
///     greeks: Greeks::default(),
/// };
///
/// assert!((valuation.confidence_95().unwrap() - 0.196).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Valuation {
    /// Present value.
    pub price: f64,
    /// Standard error of a Monte Carlo estimate.
    pub std_error: Option<f64>,
    /// Sensitivities.
    pub greeks: Greeks,
}

impl Valuation {
    /// Returns the 95% confidence interval half-width, if an estimate.
    #[inline]
    pub fn confidence_95(&self) -> Option<f64> {
        self.std_error.map(|se| 1.96 * se)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_names() {
        let names: Vec<&str> = Greek::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["delta", "gamma", "vega", "theta", "rho"]);
        assert_eq!(Greek::Vega.to_string(), "vega");
    }

    #[test]
    fn test_empty_greeks() {
        let greeks = Greeks::default();
        assert!(greeks.is_empty());
        assert_eq!(greeks.iter().count(), 0);
    }

    #[test]
    fn test_full_greeks_order() {
        let greeks = Greeks {
            delta: Some(1.0),
            gamma: Some(2.0),
            vega: Some(3.0),
            theta: Some(4.0),
            rho: Some(5.0),
        };
        let values: Vec<f64> = greeks.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(greeks.len(), 5);
    }

    #[test]
    fn test_confidence_without_std_error() {
        let valuation = Valuation {
            price: 10.0,
            ..Default::default()
        };
        assert_eq!(valuation.confidence_95(), None);
    }
}
