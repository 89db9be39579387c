//! What a method body sees while it runs in one cell.

use std::cell::Cell;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use idmatrix_core::Identifier;
use idmatrix_expectation::{ExpectationTable, FailureKind, Outcome};
use idmatrix_matrix::MatrixCell;

use crate::error::TestFailure;

/// Which side of the cell to act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginRole {
    Producer,
    Consumer,
}

impl fmt::Display for LoginRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginRole::Producer => write!(f, "producer"),
            LoginRole::Consumer => write!(f, "consumer"),
        }
    }
}

/// A login request handed to the host.
///
/// `identifier` is already resolved against the cell: a consumer declared as
/// `PRODUCER` (or `CREATOR`) logs in as the producer's identity. `NEW_USER`
/// and `ANONYMOUS` are passed through; the host creates a fresh identity with
/// the producer's role, or stays logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Login<'a> {
    pub role: LoginRole,
    pub identifier: &'a Identifier,
    /// The side's identifier as declared in the cell.
    pub declared: &'a Identifier,
    pub producer: &'a Identifier,
}

impl<'a> Login<'a> {
    pub fn resolve(cell: &'a MatrixCell, role: LoginRole) -> Self {
        let declared = match role {
            LoginRole::Producer => cell.producer(),
            LoginRole::Consumer => cell.consumer(),
        };
        let identifier = if declared.is_producer_alias() {
            cell.producer()
        } else {
            declared
        };
        Self {
            role,
            identifier,
            declared,
            producer: cell.producer(),
        }
    }

    /// True when this login acts as the producer's own identity.
    pub fn is_producer_identity(&self) -> bool {
        self.role == LoginRole::Producer || self.declared.is_producer_alias()
    }
}

/// Host-side authentication for a fixture.
pub trait Authenticator {
    /// Failure classification of the host's operations.
    type Kind: FailureKind;

    /// Make `login.identifier` the active identity.
    fn log_in_as(&mut self, login: &Login<'_>) -> Result<(), String>;

    /// Kind required by a bare "must fail" expectation.
    fn default_failure_kind(&self) -> Self::Kind;
}

/// Cell and fixture of the running combination.
///
/// Every table handed out by [`CellContext::expectations`] must reach
/// [`CellContext::check`] before the body returns, or the combination fails.
pub struct CellContext<'a, F> {
    cell: &'a MatrixCell,
    fixture: &'a mut F,
    logged_in: Option<LoginRole>,
    unchecked: Cell<usize>,
}

impl<'a, F: Authenticator> CellContext<'a, F> {
    pub(crate) fn new(cell: &'a MatrixCell, fixture: &'a mut F) -> Self {
        Self {
            cell,
            fixture,
            logged_in: None,
            unchecked: Cell::new(0),
        }
    }

    pub fn cell(&self) -> &MatrixCell {
        self.cell
    }

    pub fn producer(&self) -> &Identifier {
        self.cell.producer()
    }

    pub fn consumer(&self) -> &Identifier {
        self.cell.consumer()
    }

    pub fn fixture(&self) -> &F {
        self.fixture
    }

    pub fn fixture_mut(&mut self) -> &mut F {
        self.fixture
    }

    /// Side currently logged in, if any.
    pub fn logged_in(&self) -> Option<LoginRole> {
        self.logged_in
    }

    /// Switch the active identity to one side of the cell.
    pub fn log_in_as(&mut self, role: LoginRole) -> Result<(), TestFailure<F::Kind>> {
        let login = Login::resolve(self.cell, role);
        debug!(
            cell = %self.cell,
            role = %role,
            identifier = %login.identifier,
            "Logging in"
        );
        self.fixture
            .log_in_as(&login)
            .map_err(|e| TestFailure::Login(format!("{} as {}: {}", role, login.identifier, e)))?;
        self.logged_in = Some(role);
        Ok(())
    }

    /// Empty table using the fixture's default failure kind.
    pub fn expectations<T>(&self) -> ExpectationTable<T, F::Kind> {
        self.unchecked.set(self.unchecked.get() + 1);
        ExpectationTable::new(self.fixture.default_failure_kind())
    }

    /// Run `operation` on the fixture and check it against `table` for the
    /// cell's consumer.
    pub fn check<T, Op>(
        &mut self,
        table: ExpectationTable<T, F::Kind>,
        operation: Op,
    ) -> Result<(), TestFailure<F::Kind>>
    where
        T: PartialEq + fmt::Debug,
        Op: FnOnce(&mut F) -> Outcome<T, F::Kind>,
    {
        self.unchecked.set(self.unchecked.get().saturating_sub(1));
        let outcome = operation(&mut *self.fixture);
        table.evaluate(self.cell.consumer(), &outcome)?;
        Ok(())
    }

    /// Number of tables from [`CellContext::expectations`] not yet checked.
    pub fn unchecked_expectations(&self) -> usize {
        self.unchecked.get()
    }

    pub(crate) fn ensure_checked(&self) -> Result<(), TestFailure<F::Kind>> {
        match self.unchecked.get() {
            0 => Ok(()),
            pending => Err(TestFailure::UncheckedExpectation(pending)),
        }
    }
}
