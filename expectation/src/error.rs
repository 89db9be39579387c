//! Assertion errors raised by expectation tables.

use thiserror::Error;

/// Result type for expectation checks.
pub type ExpectationResult<T> = Result<T, ExpectationError>;

/// An observed outcome did not match the expectation for an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectationError {
    #[error("Expected to fail with {expected} for {identifier}, but the call succeeded")]
    ExpectedFailureButSucceeded { identifier: String, expected: String },

    #[error("Not expected to fail for {identifier}, but failed with {actual}")]
    UnexpectedFailure { identifier: String, actual: String },

    #[error("Expected to fail with {expected} for {identifier}, but failed with {actual}")]
    WrongFailureKind {
        identifier: String,
        expected: String,
        actual: String,
    },

    #[error("Expected failure message matching '{pattern}' for {identifier}, got '{actual}'")]
    MessageMismatch {
        identifier: String,
        pattern: String,
        actual: String,
    },

    #[error("Expected value {expected} for {identifier}, got {actual}")]
    UnexpectedValue {
        identifier: String,
        expected: String,
        actual: String,
    },

    #[error("Value assertion failed for {identifier}: {message}")]
    ValueAssertionFailed { identifier: String, message: String },

    #[error("Invalid message pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl ExpectationError {
    pub fn expected_failure_but_succeeded(
        identifier: impl ToString,
        expected: impl ToString,
    ) -> Self {
        Self::ExpectedFailureButSucceeded {
            identifier: identifier.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn unexpected_failure(identifier: impl ToString, actual: impl ToString) -> Self {
        Self::UnexpectedFailure {
            identifier: identifier.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn wrong_failure_kind(
        identifier: impl ToString,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::WrongFailureKind {
            identifier: identifier.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn message_mismatch(
        identifier: impl ToString,
        pattern: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::MessageMismatch {
            identifier: identifier.to_string(),
            pattern: pattern.into(),
            actual: actual.into(),
        }
    }

    pub fn unexpected_value(
        identifier: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::UnexpectedValue {
            identifier: identifier.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn value_assertion_failed(identifier: impl ToString, message: impl Into<String>) -> Self {
        Self::ValueAssertionFailed {
            identifier: identifier.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
