//! Constraint functional evaluation under an assumed duration pair.

use ndarray::{s, ArrayView1};

use crate::spec::SystemSpec;
use crate::tensor::PrecalcTensor;

/// Value of the constraint functional at horizon `s`, assuming the regime
/// `(l, k)` and starting from predetermined block `q0`.
///
/// The episode-start state is implied by `q0` alone (the jump variables
/// are pinned by the boundary solve baked into the tensor); the value
/// combines the one-step-ahead predetermined block with the full state at
/// horizon `s`. The constraint is *satisfied* at `s` iff the returned
/// value is at most [`SystemSpec::x_bar()`], and *binding* iff it exceeds
/// it strictly.
///
/// # Panics
///
/// Panics if `(l, k)` lies outside the tensor bounds or `s > l + k`.
pub fn constraint_value(
    tensor: &PrecalcTensor,
    spec: &SystemSpec,
    s: usize,
    l: usize,
    k: usize,
    q0: ArrayView1<f64>,
) -> f64 {
    let x = tensor.start_state(l, k, q0);
    let ahead = tensor.mat(l, k, s + 1).dot(&x) + tensor.term(l, k, s + 1);
    let q = ahead.slice(s![spec.n_p()..]);

    let ff_q = spec.ff_q().dot(&q);
    if s > 0 {
        let x_s = tensor.mat(l, k, s).dot(&x) + tensor.term(l, k, s);
        ff_q + spec.ff_x().dot(&x_s)
    } else {
        ff_q + spec.ff_x().dot(&x)
    }
}
