//! idmatrix Core Types
//!
//! This crate provides the foundational types used throughout idmatrix:
//! - Identity types (Identifier, IdentifierKind)
//! - Ordered, duplicate-free identifier collections (IdentifierSet)
//! - Configuration-time error types

mod error;
mod identifier;
mod set;

pub use error::*;
pub use identifier::*;
pub use set::*;
