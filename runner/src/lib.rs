//! Matrix test runner.
//!
//! A [`TestClass`] pairs a validated matrix configuration with a fixture
//! factory and an ordered list of [`TestMethod`]s. [`MatrixRunner`] expands
//! the class into cells, decides per cell which methods apply, and runs each
//! applicable method against a fresh fixture:
//!
//! setup → log in as producer → body → teardown
//!
//! The outcome of every (cell, method) combination is collected into a
//! [`RunSummary`] that [`ReportGenerator`] renders as text or JSON.

mod config;
mod context;
mod error;
mod execution;
mod plan;
mod report;
mod suite;

pub use config::RunnerConfig;
pub use context::{Authenticator, CellContext, Login, LoginRole};
pub use error::{RunnerError, RunnerResult, TestFailure};
pub use execution::MatrixRunner;
pub use plan::{ClassDeclaration, Decision, Plan, PlannedCell, PlannedMethod};
pub use report::{CellReport, MethodReport, MethodStatus, ReportGenerator, RunSummary};
pub use suite::{TestClass, TestMethod};
