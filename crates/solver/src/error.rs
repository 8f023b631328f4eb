//! Error types for the obr-solver crate.

/// Error type for all fallible operations in the obr-solver crate.
///
/// Covers dimensional validation of a [`SystemSpec`](crate::SystemSpec),
/// the singular boundary block that can arise while precomputing the
/// solution tensor, and out-of-range regime requests. Degraded search
/// outcomes are *not* errors; they are reported through
/// [`SolutionFlag`](crate::SolutionFlag).
#[derive(Debug, Clone, thiserror::Error)]
pub enum SolverError {
    /// Returned when a system matrix or vector has the wrong shape.
    #[error("dimension mismatch for `{what}`: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the offending matrix or vector.
        what: &'static str,
        /// Expected shape, formatted as `rows x cols` or `len`.
        expected: String,
        /// Actual shape.
        got: String,
    },

    /// Returned when a system matrix or vector contains NaN or infinity.
    #[error("`{what}` contains non-finite values")]
    NonFinite {
        /// Name of the offending matrix or vector.
        what: &'static str,
    },

    /// Returned when the variable counts are unusable (`n_p` or `n_q` is zero).
    #[error("invalid dimensions: n_p={n_p}, n_q={n_q} (both must be positive)")]
    InvalidDimensions {
        /// Number of non-predetermined (jump) variables.
        n_p: usize,
        /// Number of predetermined (state) variables.
        n_q: usize,
    },

    /// Returned when the jump-variable block of the boundary system is
    /// singular for a duration pair. Fatal for the parameter draw that
    /// produced the system; callers should reject the draw.
    #[error("singular boundary block at duration pair (l={l}, k={k})")]
    SingularBoundary {
        /// Periods until the constraint starts binding.
        l: usize,
        /// Episode length.
        k: usize,
    },

    /// Returned when an explicitly requested duration pair lies outside
    /// the bounds the tensor was built for.
    #[error("requested duration (l={l}, k={k}) exceeds tensor bounds (l_max={l_max}, k_max={k_max})")]
    DurationOutOfBounds {
        /// Requested periods until binding.
        l: usize,
        /// Requested episode length.
        k: usize,
        /// Bound the tensor was built with.
        l_max: usize,
        /// Bound the tensor was built with.
        k_max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_dimension_mismatch() {
        let err = SolverError::DimensionMismatch {
            what: "j",
            expected: "1x2".to_string(),
            got: "2x2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch for `j`: expected 1x2, got 2x2"
        );
    }

    #[test]
    fn error_non_finite() {
        let err = SolverError::NonFinite { what: "cc" };
        assert_eq!(err.to_string(), "`cc` contains non-finite values");
    }

    #[test]
    fn error_invalid_dimensions() {
        let err = SolverError::InvalidDimensions { n_p: 0, n_q: 3 };
        assert_eq!(
            err.to_string(),
            "invalid dimensions: n_p=0, n_q=3 (both must be positive)"
        );
    }

    #[test]
    fn error_singular_boundary() {
        let err = SolverError::SingularBoundary { l: 2, k: 4 };
        assert_eq!(
            err.to_string(),
            "singular boundary block at duration pair (l=2, k=4)"
        );
    }

    #[test]
    fn error_duration_out_of_bounds() {
        let err = SolverError::DurationOutOfBounds {
            l: 5,
            k: 9,
            l_max: 3,
            k_max: 6,
        };
        assert_eq!(
            err.to_string(),
            "requested duration (l=5, k=9) exceeds tensor bounds (l_max=3, k_max=6)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SolverError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SolverError>();
    }
}
