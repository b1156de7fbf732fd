//! Recorded iterates of a Robbins-Monro run.

/// Iterates z₀, z₁, …, z_n of a solver run.
///
/// Only the solver appends to it; once handed out it is read-only.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergenceHistory {
    iterates: Vec<f64>,
}

impl ConvergenceHistory {
    pub(crate) fn with_initial(z0: f64, capacity: usize) -> Self {
        let mut iterates = Vec::with_capacity(capacity);
        iterates.push(z0);
        Self { iterates }
    }

    pub(crate) fn push(&mut self, z: f64) {
        self.iterates.push(z);
    }

    /// All iterates, starting with the initial guess.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.iterates
    }

    /// Number of recorded iterates (iterations + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.iterates.len()
    }

    /// Whether nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.iterates.is_empty()
    }

    /// The last recorded iterate.
    #[inline]
    pub fn last(&self) -> Option<f64> {
        self.iterates.last().copied()
    }

    /// Iterates over `(iteration, z)` pairs, the data of a convergence plot.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.iterates.iter().copied().enumerate()
    }
}

impl AsRef<[f64]> for ConvergenceHistory {
    fn as_ref(&self) -> &[f64] {
        &self.iterates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_starts_with_initial_guess() {
        let mut h = ConvergenceHistory::with_initial(3.0, 4);
        assert_eq!(h.len(), 1);
        h.push(2.5);
        h.push(2.25);
        assert_eq!(h.as_slice(), &[3.0, 2.5, 2.25]);
        assert_eq!(h.last(), Some(2.25));
        assert_eq!(h.points().nth(1), Some((1, 2.5)));
    }

    #[test]
    fn test_default_is_empty() {
        let h = ConvergenceHistory::default();
        assert!(h.is_empty());
        assert_eq!(h.last(), None);
    }
}
