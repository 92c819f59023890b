/// Counters collected while running the step machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStatistics {
    /// Number of augmenting paths applied (each adds one starred zero).
    pub augmentations: usize,
    /// Number of zeros primed while searching for augmenting paths.
    pub primes: usize,
    /// Number of times the uncovered minimum was redistributed.
    pub adjustments: usize,
    /// Total step transitions taken, the initial step included.
    pub transitions: usize,
}

impl std::fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "augmentations={} primes={} adjustments={} transitions={}",
            self.augmentations, self.primes, self.adjustments, self.transitions
        )
    }
}
