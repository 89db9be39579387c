//! Outcome expectations.
//!
//! A test body declares, per identifier, whether an operation must succeed or
//! must fail with a given failure kind, then runs the operation through an
//! [`ExpectationTable`]. The table checks the observed outcome for the
//! identifier of the active consumer.
//!
//! # Example
//!
//! ```ignore
//! use idmatrix_expectation::prelude::*;
//!
//! ExpectationTable::new(AuthFailure::AccessDenied)
//!     .when_called_with(any_of(["role:USER", "ANONYMOUS"])?)
//!     .then(Expectation::ToFail)
//!     .otherwise(Expectation::NotToFail)
//!     .call(cell.consumer(), || service.get_list(id).map(|_| ()))?;
//! ```

mod error;
mod expectation;
mod outcome;
mod table;

pub use error::{ExpectationError, ExpectationResult};
pub use expectation::{Expectation, FailMode};
pub use outcome::{Failure, FailureKind, Outcome};
pub use table::{any_of, ExpectationTable, WhenThen};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{ExpectationError, ExpectationResult};
    pub use crate::expectation::{Expectation, FailMode};
    pub use crate::outcome::{Failure, FailureKind, Outcome};
    pub use crate::table::{any_of, ExpectationTable};
}
