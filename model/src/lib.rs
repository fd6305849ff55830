//! Conic Model
//!
//! The enclosing constraint system that variables and constraints register with.
//!
//! Responsibilities:
//! - Own decision variables and hand out `VarRef` handles
//! - Register constraints by name and track activation
//! - Define index sets and families of variables and constraints over them
//! - Load set and variable declarations from JSON
//! - Attach suffix data (duals, scaling factors) to components
//! - Check the current or a given point for feasibility

mod config;
mod data;
mod error;
mod indexed;
mod model;
mod set;
mod suffix;

pub use config::ModelConfig;
pub use data::{ModelData, SetDecl, VarDecl};
pub use error::{ModelError, ModelResult};
pub use indexed::{element_name, Indexed, IndexedConstraint, IndexedVar};
pub use model::{ConstraintData, Model};
pub use set::{IndexSet, Member, SetOrdering};
pub use suffix::{Suffix, SuffixDirection};
