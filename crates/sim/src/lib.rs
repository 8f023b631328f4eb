//! Trajectory simulation on top of the occasionally-binding-constraint
//! solver.
//!
//! The solver crate advances the state one period at a time; this crate
//! iterates that map into full paths, feeds shocks in as per-period
//! impulses, and aggregates the search-quality flags each transition
//! reports.
//!
//! # Workflow
//!
//! ```mermaid
//! flowchart LR
//!     A[SystemSpec + PrecalcTensor] --> B[simulate_path / irf]
//!     B --> C[SimPath]
//!     C --> D[FlagTally]
//! ```
//!
//! # Example
//!
//! ```
//! use ndarray::{arr1, arr2, Array2};
//! use obr_sim::{irf, Impulse};
//! use obr_solver::SystemSpec;
//!
//! # fn main() -> Result<(), obr_sim::SimError> {
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
//! let shock = Impulse::new(0, arr1(&[0.0, 0.5]));
//! let path = irf(&tensor, &spec, &[shock], 8, None)?;
//! assert!(path.tally().is_clean());
//! # Ok(())
//! # }
//! ```

mod error;
mod flags;
mod path;
mod simulate;

pub use error::SimError;
pub use flags::FlagTally;
pub use path::{Impulse, SimPath};
pub use simulate::{irf, simulate_path};
