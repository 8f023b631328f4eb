//! Aggregation of search-quality flags over a run.

use obr_solver::SolutionFlag;

/// Counts of each [`SolutionFlag`] over a simulated path.
///
/// Degraded periods are not errors; the tally lets callers turn them
/// into a penalty signal (for example during a likelihood evaluation)
/// or reject the run outright via [`is_clean`](FlagTally::is_clean).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlagTally {
    ok: usize,
    approx: usize,
    no_solution: usize,
}

impl FlagTally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tally from a sequence of flags.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = SolutionFlag>,
    {
        let mut tally = Self::new();
        for flag in flags {
            tally.record(flag);
        }
        tally
    }

    /// Counts one flag.
    pub fn record(&mut self, flag: SolutionFlag) {
        match flag {
            SolutionFlag::Ok => self.ok += 1,
            SolutionFlag::Approx => self.approx += 1,
            SolutionFlag::NoSolution => self.no_solution += 1,
        }
    }

    /// Periods solved exactly.
    pub fn ok(&self) -> usize {
        self.ok
    }

    /// Periods where only the corner candidate satisfied the conditions.
    pub fn approx(&self) -> usize {
        self.approx
    }

    /// Periods where no duration pair satisfied the conditions.
    pub fn no_solution(&self) -> usize {
        self.no_solution
    }

    /// Total number of recorded periods.
    pub fn total(&self) -> usize {
        self.ok + self.approx + self.no_solution
    }

    /// The worst flag recorded, or [`SolutionFlag::Ok`] for an empty tally.
    pub fn worst(&self) -> SolutionFlag {
        if self.no_solution > 0 {
            SolutionFlag::NoSolution
        } else if self.approx > 0 {
            SolutionFlag::Approx
        } else {
            SolutionFlag::Ok
        }
    }

    /// True when every recorded period was solved exactly.
    pub fn is_clean(&self) -> bool {
        self.approx == 0 && self.no_solution == 0
    }
}
