//! Producer/consumer matrix.
//!
//! A class declaration names the identities that create a resource
//! (producers) and the identities that later act on it (consumers).
//! [`MatrixConfiguration`] validates the declaration once, and
//! [`MatrixExpander`] turns it into one [`MatrixCell`] per identity pair.

mod config;
mod declaration;
mod expand;

pub use config::{MatrixConfiguration, RunnerSelector};
pub use declaration::Declaration;
pub use expand::{MatrixCell, MatrixExpander};
