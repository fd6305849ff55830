//! Shared fixtures for the conic integration tests.

mod fixture;

pub use fixture::ConeFixture;

pub mod prelude {
    pub use crate::ConeFixture;
    pub use conic_constraint::{
        ConePoint, Constraint, ConstraintError, ConstraintKind, Point3, QuadraticCone,
        RotatedQuadraticCone, SecondOrderCone, ViolationSeverity,
    };
    pub use conic_core::{Domain, VarRef};
    pub use conic_expr::{Assignment, Evaluator, RelOp, VarRefExt};
    pub use conic_model::{
        IndexSet, IndexedConstraint, Member, Model, ModelConfig, ModelData, ModelError,
        SuffixDirection, VarDecl,
    };
}
