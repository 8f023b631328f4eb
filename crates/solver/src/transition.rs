//! One-period transition under the piecewise-linear law of motion.

use ndarray::{s, Array1, ArrayView1};

use crate::error::SolverError;
use crate::regime::{RegimeDuration, SolutionFlag};
use crate::search::find_regime;
use crate::spec::SystemSpec;
use crate::tensor::PrecalcTensor;

/// Result of one transition step: the advanced external state, the
/// duration pair that was applied, and the search quality.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    state: Array1<f64>,
    duration: RegimeDuration,
    flag: SolutionFlag,
}

impl StepOutcome {
    /// The advanced state in the caller's external representation.
    pub fn state(&self) -> &Array1<f64> {
        &self.state
    }

    /// The duration pair that was applied.
    pub fn duration(&self) -> RegimeDuration {
        self.duration
    }

    /// Quality of the regime search ([`SolutionFlag::Ok`] when the pair
    /// was supplied by the caller).
    pub fn flag(&self) -> SolutionFlag {
        self.flag
    }

    /// Consumes the outcome, returning its parts.
    pub fn into_parts(self) -> (Array1<f64>, RegimeDuration, SolutionFlag) {
        (self.state, self.duration, self.flag)
    }
}

/// Advances `state` by one period.
///
/// The state is decomposed into jump and predetermined blocks via `aux`;
/// the duration pair is either taken from `requested` (canonicalised,
/// with [`SolutionFlag::Ok`]) or found by [`find_regime`]. The selected
/// solution yields the episode-start state `x(-1)` and the horizons
/// `x(0)` and `x(+1)`, which `s_out` reassembles into the caller's
/// representation as
/// `S * [x(+1) predetermined block, x(0), x(-1), p0]`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SolverError::DimensionMismatch`] | `state` length differs from `n_ext` |
/// | [`SolverError::DurationOutOfBounds`] | `requested` exceeds the tensor bounds |
pub fn step(
    tensor: &PrecalcTensor,
    spec: &SystemSpec,
    state: ArrayView1<f64>,
    requested: Option<RegimeDuration>,
) -> Result<StepOutcome, SolverError> {
    if state.len() != spec.n_ext() {
        return Err(SolverError::DimensionMismatch {
            what: "state",
            expected: format!("{}", spec.n_ext()),
            got: format!("{}", state.len()),
        });
    }

    let n_p = spec.n_p();
    let n = spec.n();
    let x = spec.aux().dot(&state);
    let p0 = x.slice(s![..n_p]);
    let q0 = x.slice(s![n_p..]);

    let (duration, flag) = match requested {
        Some(d) => {
            let d = d.canonicalized();
            if !tensor.contains(d.l(), d.k()) {
                return Err(SolverError::DurationOutOfBounds {
                    l: d.l(),
                    k: d.k(),
                    l_max: tensor.l_max(),
                    k_max: tensor.k_max(),
                });
            }
            (d, SolutionFlag::Ok)
        }
        None => {
            let sol = find_regime(tensor, spec, q0);
            (sol.duration(), sol.flag())
        }
    };
    let (l, k) = (duration.l(), duration.k());

    let x_start = tensor.start_state(l, k, q0);
    let x_now = tensor.mat(l, k, 1).dot(&x_start) + tensor.term(l, k, 1);
    let x_next = tensor.mat(l, k, 2).dot(&x_start) + tensor.term(l, k, 2);

    let mut stacked = Array1::zeros(spec.n_q() + 2 * n + n_p);
    stacked
        .slice_mut(s![..spec.n_q()])
        .assign(&x_next.slice(s![n_p..]));
    stacked.slice_mut(s![spec.n_q()..spec.n_q() + n]).assign(&x_now);
    stacked
        .slice_mut(s![spec.n_q() + n..spec.n_q() + 2 * n])
        .assign(&x_start);
    stacked.slice_mut(s![spec.n_q() + 2 * n..]).assign(&p0);

    Ok(StepOutcome {
        state: spec.s_out().dot(&stacked),
        duration,
        flag,
    })
}
