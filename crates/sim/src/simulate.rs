//! Iterating the one-period transition into full trajectories.

use ndarray::{Array1, Array2, ArrayView1};
use obr_solver::{step, PrecalcTensor, RegimeDuration, SystemSpec};
use tracing::{debug, trace};

use crate::error::SimError;
use crate::path::{Impulse, SimPath};

/// Simulates `horizon` transitions from `init`.
///
/// Each impulse is added to the external state at the start of its
/// period, before that period's transition. With `requested = None`
/// every period runs the regime search; with `Some(d)` the pair is
/// imposed instead, shrinking as periods elapse (first the delay `l`
/// counts down, then the episode length `k`) until it degenerates to
/// never-binding for the remainder of the path.
///
/// # Errors
///
/// Returns [`SimError::InitialStateLength`] or one of the impulse
/// validation variants; solver errors from the transitions pass through.
pub fn simulate_path(
    tensor: &PrecalcTensor,
    spec: &SystemSpec,
    init: ArrayView1<f64>,
    impulses: &[Impulse],
    horizon: usize,
    requested: Option<RegimeDuration>,
) -> Result<SimPath, SimError> {
    if init.len() != spec.n_ext() {
        return Err(SimError::InitialStateLength {
            expected: spec.n_ext(),
            got: init.len(),
        });
    }
    for imp in impulses {
        if imp.period() >= horizon {
            return Err(SimError::ImpulseBeyondHorizon {
                period: imp.period(),
                horizon,
            });
        }
        if imp.vector().len() != spec.n_ext() {
            return Err(SimError::ImpulseLength {
                period: imp.period(),
                expected: spec.n_ext(),
                got: imp.vector().len(),
            });
        }
    }
    debug!(horizon, impulses = impulses.len(), "simulating path");

    let mut states = Array2::zeros((horizon + 1, spec.n_ext()));
    let mut durations = Vec::with_capacity(horizon);
    let mut flags = Vec::with_capacity(horizon);

    let mut state = init.to_owned();
    for t in 0..horizon {
        for imp in impulses.iter().filter(|imp| imp.period() == t) {
            state += imp.vector();
        }
        states.row_mut(t).assign(&state);

        let imposed = requested.map(|d| remaining(d, t));
        let out = step(tensor, spec, state.view(), imposed)?;
        let (next, duration, flag) = out.into_parts();
        trace!(t, l = duration.l(), k = duration.k(), ?flag, "period solved");
        durations.push(duration);
        flags.push(flag);
        state = next;
    }
    states.row_mut(horizon).assign(&state);

    Ok(SimPath::new(states, durations, flags))
}

/// Impulse response: a path from the zero state driven by `impulses`.
///
/// The zero state is a rest point of the transition, so every recorded
/// deviation is attributable to the impulses alone.
pub fn irf(
    tensor: &PrecalcTensor,
    spec: &SystemSpec,
    impulses: &[Impulse],
    horizon: usize,
    requested: Option<RegimeDuration>,
) -> Result<SimPath, SimError> {
    let init = Array1::zeros(spec.n_ext());
    simulate_path(tensor, spec, init.view(), impulses, horizon, requested)
}

/// The portion of an imposed duration pair still ahead after `elapsed`
/// periods. The delay shrinks first; once inside the episode the
/// remaining length shrinks, and an exhausted pair canonicalizes to
/// never-binding.
fn remaining(d: RegimeDuration, elapsed: usize) -> RegimeDuration {
    let l = d.l().saturating_sub(elapsed);
    let into_episode = elapsed.saturating_sub(d.l());
    let k = d.k().saturating_sub(into_episode);
    RegimeDuration::new(l, k).canonicalized()
}
