//! Streaming payoff statistics.
//!
//! Each chunk of paths folds its payoffs into a [`PayoffAccumulator`]
//! (Welford's update); chunk accumulators are then merged pairwise with
//! Chan's formula. Merging in a fixed order makes the result independent
//! of how chunks were scheduled across threads.

/// Running count, mean and sum of squared deviations.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PayoffAccumulator;
///
/// let mut acc = PayoffAccumulator::new();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     acc.push(x);
/// }
/// assert_eq!(acc.count(), 4);
/// assert_eq!(acc.mean(), 2.5);
/// assert!((acc.sample_variance() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffAccumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl PayoffAccumulator {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one payoff.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &PayoffAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    /// Number of payoffs seen.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean (zero when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance (zero with fewer than two samples).
    #[inline]
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard error of the mean, `s / √n`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.sample_variance() / self.count as f64).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn from_slice(values: &[f64]) -> PayoffAccumulator {
        let mut acc = PayoffAccumulator::new();
        values.iter().for_each(|v| acc.push(*v));
        acc
    }

    #[test]
    fn test_empty() {
        let acc = PayoffAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), 0.0);
        assert_eq!(acc.sample_variance(), 0.0);
        assert_eq!(acc.std_error(), 0.0);
    }

    #[test]
    fn test_single_value_has_no_spread() {
        let acc = from_slice(&[7.5]);
        assert_eq!(acc.mean(), 7.5);
        assert_eq!(acc.std_error(), 0.0);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let values: Vec<f64> = (0..100).map(|i| ((i * 37) % 23) as f64 * 0.5).collect();
        let whole = from_slice(&values);

        let mut merged = from_slice(&values[..30]);
        merged.merge(&from_slice(&values[30..71]));
        merged.merge(&from_slice(&values[71..]));

        assert_eq!(merged.count(), whole.count());
        assert_relative_eq!(merged.mean(), whole.mean(), epsilon = 1e-12);
        assert_relative_eq!(merged.sample_variance(), whole.sample_variance(), epsilon = 1e-10);
    }

    #[test]
    fn test_merge_with_empty() {
        let mut acc = from_slice(&[1.0, 3.0]);
        acc.merge(&PayoffAccumulator::new());
        assert_eq!(acc.count(), 2);

        let mut empty = PayoffAccumulator::new();
        empty.merge(&acc);
        assert_eq!(empty, acc);
    }

    #[test]
    fn test_std_error() {
        // Sample variance of {0, 2} is 2, so SE = √(2/2) = 1
        let acc = from_slice(&[0.0, 2.0]);
        assert_relative_eq!(acc.std_error(), 1.0, epsilon = 1e-15);
    }
}
