//! Conic Core Types
//!
//! This crate provides the foundational types used throughout the modeling layer:
//! - Identity types (VarId, ConstraintId)
//! - Domain tags (the Domain enum, including the non-negativity tag)
//! - Decision variables (Variable) and their lightweight handles (VarRef)
//! - Common error types

mod domain;
mod error;
mod id;
mod var;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use var::*;
