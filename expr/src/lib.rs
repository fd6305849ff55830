//! Conic Expr
//!
//! Algebraic expressions over decision variables.
//!
//! Responsibilities:
//! - Build expression trees with ordinary arithmetic operators
//! - Report polynomial degree and referenced variables
//! - Evaluate expressions against a variable assignment
//! - Form relations (`<=`, `==`, `>=`) between expressions

mod error;
mod eval;
mod expr;
mod ops;
mod relation;

pub use error::{ExprError, ExprResult};
pub use eval::{Assignment, Evaluator};
pub use expr::Expr;
pub use ops::VarRefExt;
pub use relation::{RelOp, Relation};
