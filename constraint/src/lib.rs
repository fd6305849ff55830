//! Conic Constraint
//!
//! Relational and conic constraints over decision variables.
//!
//! Responsibilities:
//! - Wrap relations into constraints tagged with their structural kind
//! - Build cone constraints after checking their domain preconditions
//! - Check constraints against an assignment within a tolerance
//! - Produce meaningful violation messages

mod checker;
mod cone;
mod constraint;
mod error;
mod violation;

pub use checker::ConstraintChecker;
pub use cone::{ConePoint, Point3, QuadraticCone, RotatedQuadraticCone, SecondOrderCone};
pub use constraint::{Constraint, ConstraintKind};
pub use error::{ConstraintError, ConstraintResult};
pub use violation::{Violation, ViolationSeverity, Violations};
