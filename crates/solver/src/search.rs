//! Search for the minimal valid duration pair given a predetermined state.

use ndarray::ArrayView1;
use tracing::{debug, trace};

use crate::constraint::constraint_value;
use crate::regime::{RegimeDuration, RegimeSolution, SolutionFlag};
use crate::spec::SystemSpec;
use crate::tensor::PrecalcTensor;

/// Finds the expected constraint regime for predetermined block `q0`.
///
/// Comparison convention (used consistently here and in
/// [`constraint_value`]): a horizon is *satisfied* iff its constraint
/// value is at most `x_bar` (non-strict), and *binding* iff the value
/// exceeds `x_bar` strictly; a value exactly at the bound counts as
/// satisfied.
///
/// The search proceeds in three stages:
///
/// 1. **Screen.** Scan horizons of the never-binding solution for the
///    first violation. If none occurs up to `l_max`, the canonical
///    never-binding pair `(1, 0)` is exact and is returned with
///    [`SolutionFlag::Ok`].
/// 2. **Grid.** Exhaustive search over `l in [0, l_max]`,
///    `k in [1, k_max]` (outer `l`, inner `k`), returning the first pair
///    that is satisfied before the episode and after its release, binding
///    at the episode start and one period before release.
/// 3. **Fallback.** With `l = 0`, grow `k` until the release horizon is
///    satisfied ([`SolutionFlag::Approx`]); if `k_max` is reached first,
///    the capped episode is returned with [`SolutionFlag::NoSolution`].
///
/// The search never fails: a degraded pair is always preferred over an
/// abort, and quality is reported through the flag.
///
/// # Panics
///
/// Panics if `q0` does not have length `n_q`.
pub fn find_regime(
    tensor: &PrecalcTensor,
    spec: &SystemSpec,
    q0: ArrayView1<f64>,
) -> RegimeSolution {
    let l_max = tensor.l_max();
    let k_max = tensor.k_max();
    let x_bar = spec.x_bar();

    // Screen: first horizon at which the never-binding solution violates
    // the bound. Exhaustion means (1, 0) is self-consistent.
    let mut l = 0;
    while l < l_max && constraint_value(tensor, spec, l, l, 0, q0) <= x_bar {
        l += 1;
    }
    if l == l_max {
        return RegimeSolution::new(RegimeDuration::never_binding(), SolutionFlag::Ok);
    }
    trace!(first_violation = l, "never-binding solution violates the bound");

    if let Some(found) = grid_search(tensor, spec, q0) {
        return RegimeSolution::new(found, SolutionFlag::Ok);
    }

    // Fallback: no exact pair within bounds. Grow the episode from today
    // until its release horizon is satisfied, capped at k_max.
    debug!("grid search exhausted, approximating the episode length");
    let mut k = 0;
    let mut flag = SolutionFlag::Approx;
    while constraint_value(tensor, spec, k, 0, k, q0) > x_bar {
        k += 1;
        if k >= k_max {
            flag = SolutionFlag::NoSolution;
            debug!(k_max, "constraint still violated at the longest episode");
            break;
        }
    }
    RegimeSolution::new(RegimeDuration::new(0, k), flag)
}

/// Lexicographically first `(l, k)` satisfying all four boundary checks,
/// or `None` if no pair within bounds does.
fn grid_search(
    tensor: &PrecalcTensor,
    spec: &SystemSpec,
    q0: ArrayView1<f64>,
) -> Option<RegimeDuration> {
    let x_bar = spec.x_bar();
    for l in 0..=tensor.l_max() {
        for k in 1..=tensor.k_max() {
            if l > 0 {
                // Not yet binding before the episode.
                if constraint_value(tensor, spec, 0, l, k, q0) > x_bar {
                    continue;
                }
                if l > 1 && constraint_value(tensor, spec, l - 1, l, k, q0) > x_bar {
                    continue;
                }
            }
            // Released by the episode's end.
            if constraint_value(tensor, spec, l + k, l, k, q0) > x_bar {
                continue;
            }
            // Genuinely binding at the episode start...
            if constraint_value(tensor, spec, l, l, k, q0) <= x_bar {
                continue;
            }
            // ...and still binding one period before release.
            if k > 1 && constraint_value(tensor, spec, l + k - 1, l, k, q0) <= x_bar {
                continue;
            }
            return Some(RegimeDuration::new(l, k));
        }
    }
    None
}
