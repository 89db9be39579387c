//! Runner error types.

use thiserror::Error;

use idmatrix_core::ConfigError;
use idmatrix_expectation::{ExpectationError, Failure, FailureKind};

/// Result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that stop a whole class from running.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Worker thread panicked while running {class}")]
    WorkerPanicked { class: String },

    #[error("Cannot read declaration {path}: {source}")]
    DeclarationRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse declaration {path}: {message}")]
    DeclarationParse { path: String, message: String },
}

impl RunnerError {
    pub fn worker_panicked(class: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            class: class.into(),
        }
    }

    pub fn declaration_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::DeclarationRead {
            path: path.into(),
            source,
        }
    }

    pub fn declaration_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeclarationParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Why one (cell, method) combination failed.
///
/// Only that combination is reported as failed; the rest of the class keeps
/// running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TestFailure<K: FailureKind> {
    #[error(transparent)]
    Assertion(#[from] ExpectationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Setup failed: {0}")]
    Setup(String),

    #[error("Teardown failed: {0}")]
    Teardown(String),

    #[error("Unhandled failure: {0}")]
    Failure(Failure<K>),

    #[error("{0} expectation table(s) built but never checked")]
    UncheckedExpectation(usize),

    #[error("Panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

impl<K: FailureKind> From<Failure<K>> for TestFailure<K> {
    fn from(failure: Failure<K>) -> Self {
        TestFailure::Failure(failure)
    }
}

impl<K: FailureKind> TestFailure<K> {
    pub fn other(message: impl Into<String>) -> Self {
        TestFailure::Other(message.into())
    }
}
