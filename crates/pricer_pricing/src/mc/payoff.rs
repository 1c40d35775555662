//! Path payoffs.

use pricer_core::types::OptionSide;

/// Payoff evaluated on a single simulated trajectory.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionSide;
/// use pricer_pricing::mc::PathPayoff;
///
/// let path = [100.0, 110.0, 120.0];
/// assert_eq!(PathPayoff::Terminal.evaluate(&path, 100.0, OptionSide::Call), 20.0);
/// assert_eq!(PathPayoff::ArithmeticAverage.evaluate(&path, 100.0, OptionSide::Call), 10.0);
/// assert_eq!(PathPayoff::ArithmeticAverage.evaluate(&path, 100.0, OptionSide::Put), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathPayoff {
    /// Vanilla payoff on the final spot.
    Terminal,
    /// Asian payoff on the arithmetic mean of every point, spot included.
    ArithmeticAverage,
}

impl PathPayoff {
    /// Evaluates the undiscounted payoff.
    ///
    /// An empty path pays nothing.
    #[inline]
    pub fn evaluate(self, path: &[f64], strike: f64, side: OptionSide) -> f64 {
        let underlying = match self {
            PathPayoff::Terminal => match path.last() {
                Some(s) => *s,
                None => return 0.0,
            },
            PathPayoff::ArithmeticAverage => {
                if path.is_empty() {
                    return 0.0;
                }
                path.iter().sum::<f64>() / path.len() as f64
            }
        };
        side.intrinsic(underlying, strike)
    }

    /// Lowercase name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            PathPayoff::Terminal => "terminal",
            PathPayoff::ArithmeticAverage => "arithmetic_average",
        }
    }
}

impl std::fmt::Display for PathPayoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
