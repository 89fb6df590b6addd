//! Reference models for the modsim workspace.
//!
//! Each model is a plain parameter record implementing
//! [`OdeProblem`](modsim_core::OdeProblem). Records are cheap to copy, so a
//! calibration can build a trial record with struct update syntax:
//!
//! ```
//! use modsim_models::FallingObject;
//!
//! let base = FallingObject::penny();
//! let trial = FallingObject { g: 1.62, ..base };
//! assert_eq!(base.g, 9.8);
//! assert_eq!(trial.height, base.height);
//! ```

mod falling;
mod glucose;
mod population;
mod projectile;

pub use falling::{Fall, FallingObject};
pub use glucose::{Glucose, GlucoseInsulin};
pub use population::{Population, Size};
pub use projectile::{Flight, Projectile};
