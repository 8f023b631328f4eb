//! Regime durations and solution-quality flags.

/// An expected constraint regime: `l` periods until the constraint starts
/// binding, then a binding episode of `k` periods.
///
/// `k = 0` means the constraint never binds; the canonical never-binding
/// pair is `(1, 0)` — `(0, 0)` and any other `(l, 0)` normalise to it via
/// [`RegimeDuration::canonicalized()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegimeDuration {
    l: usize,
    k: usize,
}

impl RegimeDuration {
    /// Creates a duration pair as-is, without canonicalisation.
    pub fn new(l: usize, k: usize) -> Self {
        Self { l, k }
    }

    /// The canonical never-binding pair `(1, 0)`.
    pub fn never_binding() -> Self {
        Self { l: 1, k: 0 }
    }

    /// Returns the number of periods until the constraint starts binding.
    pub fn l(&self) -> usize {
        self.l
    }

    /// Returns the episode length in periods.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns `true` if the constraint is expected to bind at all.
    pub fn is_binding(&self) -> bool {
        self.k > 0
    }

    /// Returns the pair with `k = 0` normalised to the canonical `(1, 0)`.
    pub fn canonicalized(self) -> Self {
        if self.k == 0 {
            Self::never_binding()
        } else {
            self
        }
    }
}

/// Quality of a regime-search outcome, attached per transition step.
///
/// Ordered by severity: `Ok < Approx < NoSolution`. Neither degraded
/// variant is an error — the returned state and duration pair are always
/// usable — but callers scoring parameter draws should penalise them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolutionFlag {
    /// An exact duration pair satisfying all boundary checks was found.
    Ok,
    /// No exact pair exists within bounds; the shortest episode that
    /// releases the constraint was substituted.
    Approx,
    /// Even the longest episode within bounds leaves the constraint
    /// violated at its end; `k_max` was used regardless.
    NoSolution,
}

impl SolutionFlag {
    /// Returns `true` for [`SolutionFlag::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, SolutionFlag::Ok)
    }
}

/// Result of a regime search: the duration pair to apply and its quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegimeSolution {
    duration: RegimeDuration,
    flag: SolutionFlag,
}

impl RegimeSolution {
    pub(crate) fn new(duration: RegimeDuration, flag: SolutionFlag) -> Self {
        Self {
            duration: duration.canonicalized(),
            flag,
        }
    }

    /// Returns the (canonicalised) duration pair.
    pub fn duration(&self) -> RegimeDuration {
        self.duration
    }

    /// Returns the solution-quality flag.
    pub fn flag(&self) -> SolutionFlag {
        self.flag
    }
}
