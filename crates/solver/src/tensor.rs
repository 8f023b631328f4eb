//! Duration-indexed solution tensor and its builder.
//!
//! For every duration pair `(l, k)` up to the configured bounds, the
//! builder solves the boundary-value problem that pins the jump variables
//! at the start of the binding episode and stores, per horizon
//! `s in [0, l+k+1]`, the affine law `x(s) = mat(l,k,s) * x(-1) + term(l,k,s)`.
//! Storage is ragged: only the valid horizon range per `(l, k)` is kept.
//!
//! Building is pure and deterministic; the tensor is read-only afterwards
//! and must be rebuilt from scratch for every new [`SystemSpec`].

use nalgebra::DMatrix;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use tracing::debug;

use crate::error::SolverError;
use crate::spec::SystemSpec;

/// One horizon of one duration pair: `x(s) = mat * x(-1) + term`.
#[derive(Clone, Debug)]
struct Stage {
    mat: Array2<f64>,
    term: Array1<f64>,
}

/// The precomputed solution tensor for one [`SystemSpec`].
///
/// Indexed by `(l, k, s)` with `l <= l_max`, `k <= k_max` and
/// `s <= l + k + 1`; the canonical never-binding pair `(1, 0)` is present
/// regardless of `l_max`. The stored matrices are `n x n` with the first `n_p`
/// columns identically zero (the boundary correction cancels them), so
/// only the predetermined-column block carries content.
#[derive(Clone, Debug)]
pub struct PrecalcTensor {
    n_p: usize,
    l_max: usize,
    k_max: usize,
    /// `entries[l][k][s]`, ragged in `s`.
    entries: Vec<Vec<Vec<Stage>>>,
}

impl PrecalcTensor {
    /// Bound on the periods-until-binding dimension.
    pub fn l_max(&self) -> usize {
        self.l_max
    }

    /// Bound on the episode-length dimension.
    pub fn k_max(&self) -> usize {
        self.k_max
    }

    /// Returns `true` if `(l, k)` lies within the built bounds.
    ///
    /// The canonical never-binding pair `(1, 0)` is always available,
    /// even with `l_max = 0`: canonicalisation can force it regardless
    /// of the bounds.
    pub fn contains(&self, l: usize, k: usize) -> bool {
        (l == 1 && k == 0) || (l <= self.l_max && k <= self.k_max)
    }

    /// The solution matrix for horizon `s` under duration pair `(l, k)`.
    ///
    /// # Panics
    ///
    /// Panics if `l > l_max`, `k > k_max`, or `s > l + k + 1`.
    pub fn mat(&self, l: usize, k: usize, s: usize) -> &Array2<f64> {
        &self.stage(l, k, s).mat
    }

    /// The solution constant for horizon `s` under duration pair `(l, k)`.
    ///
    /// # Panics
    ///
    /// Panics if `l > l_max`, `k > k_max`, or `s > l + k + 1`.
    pub fn term(&self, l: usize, k: usize, s: usize) -> &Array1<f64> {
        &self.stage(l, k, s).term
    }

    /// Episode-start state `x(-1)` implied by the predetermined block `q0`
    /// under duration pair `(l, k)`.
    ///
    /// This is the single code path shared by the constraint evaluator and
    /// the transition function.
    ///
    /// # Panics
    ///
    /// Panics if `(l, k)` lies outside the built bounds or `q0` has the
    /// wrong length.
    pub fn start_state(&self, l: usize, k: usize, q0: ArrayView1<f64>) -> Array1<f64> {
        let stage = self.stage(l, k, 0);
        stage.mat.slice(s![.., self.n_p..]).dot(&q0) + &stage.term
    }

    fn stage(&self, l: usize, k: usize, s: usize) -> &Stage {
        assert!(
            self.contains(l, k) && s <= l + k + 1,
            "tensor index out of range: (l={l}, k={k}, s={s}) with bounds (l_max={}, k_max={})",
            self.l_max,
            self.k_max
        );
        &self.entries[l][k][s]
    }
}

/// Builds the full solution tensor for `spec` up to `(l_max, k_max)`.
pub(crate) fn build(
    spec: &SystemSpec,
    l_max: usize,
    k_max: usize,
) -> Result<PrecalcTensor, SolverError> {
    let n = spec.n();
    let n_p = spec.n_p();
    let s_max = l_max + k_max + 2;
    // The assembly step left-applies one unconstrained step for the
    // post-episode horizon, and the canonical never-binding row (1, 0)
    // must exist even with l_max = 0, so at least one power is needed.
    let l_top = l_max.max(1);
    let cx = spec.cx();

    // Core recursion: core_mat[j][s] = m_con^s * m_unc^j (j unconstrained
    // steps, then s constrained steps), and core_term[s] accumulates the
    // peg constant over the constrained steps:
    // core_term[s] = (I + m_con + ... + m_con^{s-1}) * (cc * x_bar).
    let mut core_mat = vec![vec![Array2::<f64>::zeros((n, n)); s_max]; l_top + 1];
    let mut core_term = vec![Array1::<f64>::zeros(n); s_max];
    let mut acc = Array2::<f64>::zeros((n, n));

    core_mat[0][0] = Array2::eye(n);
    for s in 0..s_max {
        if s > 0 {
            core_mat[0][s] = core_mat[0][s - 1].dot(spec.m_con());
            acc += &core_mat[0][s - 1];
        }
        core_term[s] = acc.dot(&cx);
        for j in 1..=l_top {
            core_mat[j][s] = core_mat[j - 1][s].dot(spec.m_unc());
        }
    }

    let mut entries = Vec::with_capacity(l_top + 1);
    for l in 0..=l_top {
        let mut per_l = Vec::with_capacity(k_max + 1);
        for k in 0..=k_max {
            // Boundary solve: express the episode-start jump variables as
            // an affine function of the predetermined block by inverting
            // the jump-column block of J applied at the episode's end.
            let jn = spec.j().dot(&core_mat[l][k]);
            let sterm = spec.j().dot(&core_term[k]);
            let inv = invert(jn.slice(s![.., ..n_p]))
                .ok_or(SolverError::SingularBoundary { l, k })?;
            let ss_mat = -inv.dot(&jn);
            let ss_term = -inv.dot(&sterm);

            let mut per_k = Vec::with_capacity(l + k + 2);
            for s in 0..=l + k + 1 {
                // Select the core-recursion stage for this horizon:
                // before the episode, inside it, or one step past its end.
                let (l0, k0, s0) = if s <= l {
                    (s, 0, 0)
                } else if s == l + k + 1 {
                    (l, k, 1)
                } else {
                    (l, s - l, 0)
                };
                let m = &core_mat[l0][k0];
                let fin_mat = m.slice(s![.., ..n_p]).dot(&ss_mat) + m;
                let fin_term = m.slice(s![.., ..n_p]).dot(&ss_term) + &core_term[k0];
                per_k.push(Stage {
                    mat: core_mat[s0][0].dot(&fin_mat),
                    term: core_mat[s0][0].dot(&fin_term),
                });
            }
            per_l.push(per_k);
        }
        entries.push(per_l);
    }

    debug!(l_max, k_max, n, "solution tensor built");
    Ok(PrecalcTensor {
        n_p,
        l_max,
        k_max,
        entries,
    })
}

/// Dense LU inversion of the jump-column boundary block.
fn invert(block: ArrayView2<f64>) -> Option<Array2<f64>> {
    let p = block.nrows();
    let m = DMatrix::from_fn(p, p, |r, c| block[[r, c]]);
    let inv = m.lu().try_inverse()?;
    Some(Array2::from_shape_fn((p, p), |(r, c)| inv[(r, c)]))
}
