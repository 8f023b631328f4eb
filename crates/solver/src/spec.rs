//! Immutable bundle of model matrices for one parameter draw.

use ndarray::{Array1, Array2};

use crate::error::SolverError;
use crate::tensor::PrecalcTensor;

/// The linearised model for one parameter draw, split into a constrained
/// and an unconstrained regime.
///
/// The internal state vector `x` stacks `n_p` non-predetermined (jump)
/// variables on top of `n_q` predetermined (state) variables,
/// `n = n_p + n_q`. Callers hand states over in an external
/// representation of length `n_ext`; `aux` maps external to internal and
/// `s_out` reassembles the external state from the stacked transition
/// horizons (see [`step`](crate::step)).
///
/// Immutable once built: a new parameter draw means a new `SystemSpec`
/// and a full re-run of [`SystemSpec::precompute()`].
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["SystemSpec::new(...)?"] -->|".precompute(l_max, k_max)?"| B["PrecalcTensor"]
///     B --> C["find_regime — expected durations"]
///     B --> D["step — one-period transition"]
/// ```
#[derive(Clone, Debug)]
pub struct SystemSpec {
    n_p: usize,
    n_q: usize,
    /// Unconstrained-regime transition (n x n).
    m_unc: Array2<f64>,
    /// Constrained-regime transition (n x n); the peg constant `cc * x_bar`
    /// accrues along its powers.
    m_con: Array2<f64>,
    /// Boundary projection pinning the jump variables (n_p x n).
    j: Array2<f64>,
    /// Constraint-constant loading (length n).
    cc: Array1<f64>,
    /// Constraint bound. A horizon is satisfied iff the constraint value
    /// is at most `x_bar`.
    x_bar: f64,
    /// Constraint functional on the one-step-ahead predetermined block
    /// (length n_q).
    ff_q: Array1<f64>,
    /// Constraint functional on the current full state (length n).
    ff_x: Array1<f64>,
    /// External-to-internal basis change (n x n_ext).
    aux: Array2<f64>,
    /// Internal-horizons-to-external reassembly (n_ext x (n_q + 2n + n_p)).
    s_out: Array2<f64>,
}

impl SystemSpec {
    /// Creates and validates a system specification.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SolverError::InvalidDimensions`] | `n_p == 0` or `n_q == 0` |
    /// | [`SolverError::DimensionMismatch`] | any matrix/vector shape is off |
    /// | [`SolverError::NonFinite`] | any entry is NaN or infinite |
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n_p: usize,
        n_q: usize,
        m_unc: Array2<f64>,
        m_con: Array2<f64>,
        j: Array2<f64>,
        cc: Array1<f64>,
        x_bar: f64,
        ff_q: Array1<f64>,
        ff_x: Array1<f64>,
        aux: Array2<f64>,
        s_out: Array2<f64>,
    ) -> Result<Self, SolverError> {
        if n_p == 0 || n_q == 0 {
            return Err(SolverError::InvalidDimensions { n_p, n_q });
        }
        let n = n_p + n_q;
        let n_ext = aux.ncols();

        check_mat("m_unc", &m_unc, n, n)?;
        check_mat("m_con", &m_con, n, n)?;
        check_mat("j", &j, n_p, n)?;
        check_vec("cc", &cc, n)?;
        check_vec("ff_q", &ff_q, n_q)?;
        check_vec("ff_x", &ff_x, n)?;
        check_mat("aux", &aux, n, n_ext)?;
        // s_out must map the stacked horizons back onto a state of the same
        // external length, so that transitions can be chained.
        check_mat("s_out", &s_out, n_ext, n_q + 2 * n + n_p)?;
        if !x_bar.is_finite() {
            return Err(SolverError::NonFinite { what: "x_bar" });
        }

        Ok(Self {
            n_p,
            n_q,
            m_unc,
            m_con,
            j,
            cc,
            x_bar,
            ff_q,
            ff_x,
            aux,
            s_out,
        })
    }

    /// Builds the duration-indexed solution tensor for this system.
    ///
    /// `l_max` and `k_max` bound the searchable duration pairs; larger
    /// bounds widen search coverage at a preprocessing cost of
    /// `O(l_max * k_max * (l_max + k_max))` dense products.
    ///
    /// # Errors
    ///
    /// [`SolverError::SingularBoundary`] if the jump-variable block of the
    /// boundary system is singular for some `(l, k)` — fatal for this
    /// parameter draw.
    pub fn precompute(&self, l_max: usize, k_max: usize) -> Result<PrecalcTensor, SolverError> {
        crate::tensor::build(self, l_max, k_max)
    }

    /// Number of non-predetermined (jump) variables.
    pub fn n_p(&self) -> usize {
        self.n_p
    }

    /// Number of predetermined (state) variables.
    pub fn n_q(&self) -> usize {
        self.n_q
    }

    /// Internal state dimension `n = n_p + n_q`.
    pub fn n(&self) -> usize {
        self.n_p + self.n_q
    }

    /// External state dimension accepted by [`step`](crate::step).
    pub fn n_ext(&self) -> usize {
        self.aux.ncols()
    }

    /// Unconstrained-regime transition matrix.
    pub fn m_unc(&self) -> &Array2<f64> {
        &self.m_unc
    }

    /// Constrained-regime transition matrix.
    pub fn m_con(&self) -> &Array2<f64> {
        &self.m_con
    }

    /// Boundary projection (n_p x n).
    pub fn j(&self) -> &Array2<f64> {
        &self.j
    }

    /// Constraint-constant loading.
    pub fn cc(&self) -> &Array1<f64> {
        &self.cc
    }

    /// Constraint bound.
    pub fn x_bar(&self) -> f64 {
        self.x_bar
    }

    /// Constraint functional on the one-step-ahead predetermined block.
    pub fn ff_q(&self) -> &Array1<f64> {
        &self.ff_q
    }

    /// Constraint functional on the current full state.
    pub fn ff_x(&self) -> &Array1<f64> {
        &self.ff_x
    }

    /// External-to-internal basis change.
    pub fn aux(&self) -> &Array2<f64> {
        &self.aux
    }

    /// Internal-horizons-to-external reassembly matrix.
    pub fn s_out(&self) -> &Array2<f64> {
        &self.s_out
    }

    /// The per-period peg constant `cc * x_bar`.
    pub(crate) fn cx(&self) -> Array1<f64> {
        self.cc.mapv(|v| v * self.x_bar)
    }
}

fn check_mat(
    what: &'static str,
    m: &Array2<f64>,
    rows: usize,
    cols: usize,
) -> Result<(), SolverError> {
    if m.nrows() != rows || m.ncols() != cols {
        return Err(SolverError::DimensionMismatch {
            what,
            expected: format!("{rows}x{cols}"),
            got: format!("{}x{}", m.nrows(), m.ncols()),
        });
    }
    if m.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::NonFinite { what });
    }
    Ok(())
}

fn check_vec(what: &'static str, v: &Array1<f64>, len: usize) -> Result<(), SolverError> {
    if v.len() != len {
        return Err(SolverError::DimensionMismatch {
            what,
            expected: format!("{len}"),
            got: format!("{}", v.len()),
        });
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(SolverError::NonFinite { what });
    }
    Ok(())
}
