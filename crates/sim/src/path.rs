//! Simulated trajectories and the impulses that drive them.

use ndarray::{Array1, Array2, ArrayView1};
use obr_solver::{RegimeDuration, SolutionFlag};

use crate::flags::FlagTally;

/// A shock vector added to the external state at the start of a period,
/// before that period's transition is applied.
#[derive(Clone, Debug)]
pub struct Impulse {
    period: usize,
    vector: Array1<f64>,
}

impl Impulse {
    /// An impulse of `vector` applied at `period` (zero-based).
    pub fn new(period: usize, vector: Array1<f64>) -> Self {
        Self { period, vector }
    }

    /// The period the impulse is applied in.
    pub fn period(&self) -> usize {
        self.period
    }

    /// The shock vector, in external-state coordinates.
    pub fn vector(&self) -> &Array1<f64> {
        &self.vector
    }
}

/// A simulated path: the state at every period together with the duration
/// pair and search flag of every transition.
///
/// Row `t` of [`states`](SimPath::states) is the state at the *start* of
/// period `t`; row 0 is the initial state (with any period-0 impulse
/// already added), and the final row is the state after the last
/// transition. `durations` and `flags` have one entry per transition,
/// i.e. one fewer than the number of state rows.
#[derive(Clone, Debug)]
pub struct SimPath {
    states: Array2<f64>,
    durations: Vec<RegimeDuration>,
    flags: Vec<SolutionFlag>,
}

impl SimPath {
    pub(crate) fn new(
        states: Array2<f64>,
        durations: Vec<RegimeDuration>,
        flags: Vec<SolutionFlag>,
    ) -> Self {
        debug_assert_eq!(states.nrows(), durations.len() + 1);
        debug_assert_eq!(durations.len(), flags.len());
        Self {
            states,
            durations,
            flags,
        }
    }

    /// States as a `(horizon + 1) x n_ext` matrix.
    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    /// The state at the start of period `t`.
    pub fn state_at(&self, t: usize) -> ArrayView1<'_, f64> {
        self.states.row(t)
    }

    /// Number of transitions in the path.
    pub fn horizon(&self) -> usize {
        self.durations.len()
    }

    /// The duration pair applied at each transition.
    pub fn durations(&self) -> &[RegimeDuration] {
        &self.durations
    }

    /// The search flag of each transition.
    pub fn flags(&self) -> &[SolutionFlag] {
        &self.flags
    }

    /// Aggregates the per-transition flags into a [`FlagTally`].
    pub fn tally(&self) -> FlagTally {
        FlagTally::from_flags(self.flags.iter().copied())
    }
}
