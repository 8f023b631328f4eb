//! Error types for the obr-sim crate.

use obr_solver::SolverError;

/// Error type for simulation and impulse-response runs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimError {
    /// A one-period transition failed.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Returned when the initial state has the wrong length.
    #[error("initial state has length {got}, expected {expected}")]
    InitialStateLength {
        /// External state dimension of the system.
        expected: usize,
        /// Length of the supplied state.
        got: usize,
    },

    /// Returned when an impulse vector has the wrong length.
    #[error("impulse at period {period} has length {got}, expected {expected}")]
    ImpulseLength {
        /// Period the impulse was scheduled for.
        period: usize,
        /// External state dimension of the system.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },

    /// Returned when an impulse is scheduled past the simulation horizon.
    #[error("impulse at period {period} lies beyond horizon {horizon}")]
    ImpulseBeyondHorizon {
        /// Period the impulse was scheduled for.
        period: usize,
        /// Number of periods simulated.
        horizon: usize,
    },
}
