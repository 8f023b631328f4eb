//! Piecewise-linear rational-expectations solver for models with one
//! occasionally binding constraint.
//!
//! The model alternates between an unconstrained transition law and a
//! constrained one in which the bounded variable is pegged at its bound.
//! A trajectory is summarised by a duration pair `(l, k)`: the constraint
//! starts binding `l` periods from now and binds for `k` periods. For
//! every pair within precomputed bounds the crate assembles the affine
//! map from today's predetermined block to the state at any horizon of
//! the episode, then searches for the pair that is consistent with the
//! anticipated path of the constrained variable.
//!
//! # Workflow
//!
//! ```mermaid
//! flowchart LR
//!     A[SystemSpec::new] --> B[precompute]
//!     B --> C[PrecalcTensor]
//!     C --> D[find_regime]
//!     C --> E[step]
//!     D --> E
//! ```
//!
//! # Example
//!
//! ```
//! use ndarray::{arr1, arr2, Array2};
//! use obr_solver::{step, SystemSpec};
//!
//! # fn main() -> Result<(), obr_solver::SolverError> {
//! let spec = SystemSpec::new(
//!     1,
//!     1,
//!     arr2(&[[0.5, 1.0], [0.0, 0.8]]),
//!     arr2(&[[0.5, 0.0], [0.0, 0.8]]),
//!     arr2(&[[1.0, -0.5]]),
//!     arr1(&[1.0, 0.0]),
//!     1.0,
//!     arr1(&[0.0]),
//!     arr1(&[0.0, 1.0]),
//!     Array2::eye(2),
//!     arr2(&[[0.0, 1.0, 0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]]),
//! )?;
//! let tensor = spec.precompute(3, 6)?;
//! let out = step(&tensor, &spec, arr1(&[0.0, 0.5]).view(), None)?;
//! assert!(out.flag().is_ok());
//! # Ok(())
//! # }
//! ```

mod constraint;
mod error;
mod regime;
mod search;
mod spec;
mod tensor;
mod transition;

pub use constraint::constraint_value;
pub use error::SolverError;
pub use regime::{RegimeDuration, RegimeSolution, SolutionFlag};
pub use search::find_regime;
pub use spec::SystemSpec;
pub use tensor::PrecalcTensor;
pub use transition::{step, StepOutcome};
