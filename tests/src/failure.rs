//! Failure kinds of the demo services.

use std::fmt;

use idmatrix_expectation::FailureKind;

/// Why a demo service call was rejected.
///
/// `CredentialsNotFound` is a refinement of `Authentication`: a test that
/// expects an authentication failure accepts either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    Authentication,
    CredentialsNotFound,
    AccessDenied,
    NotFound,
    IllegalState,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthFailure::Authentication => "Authentication",
            AuthFailure::CredentialsNotFound => "CredentialsNotFound",
            AuthFailure::AccessDenied => "AccessDenied",
            AuthFailure::NotFound => "NotFound",
            AuthFailure::IllegalState => "IllegalState",
        };
        f.write_str(name)
    }
}

impl FailureKind for AuthFailure {
    fn is_kind_of(&self, expected: &Self) -> bool {
        match (self, expected) {
            (AuthFailure::CredentialsNotFound, AuthFailure::Authentication) => true,
            (actual, expected) => actual == expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refinement() {
        assert!(AuthFailure::CredentialsNotFound.is_kind_of(&AuthFailure::Authentication));
        assert!(!AuthFailure::Authentication.is_kind_of(&AuthFailure::CredentialsNotFound));
        assert!(!AuthFailure::AccessDenied.is_kind_of(&AuthFailure::Authentication));
        assert!(AuthFailure::AccessDenied.is_kind_of(&AuthFailure::AccessDenied));
    }
}
