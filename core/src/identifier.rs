//! Identity types for producers and consumers.
//!
//! An identifier is either concrete (a role or a named user) or a marker that
//! is resolved relative to the active matrix cell:
//! - `role:<name>` / `user:<name>` name a concrete identity
//! - `PRODUCER`, `CONSUMER`, `ANONYMOUS`, `NEW_USER` and `CREATOR` are markers
//!
//! Identifiers are immutable and compared structurally (kind + value).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

pub const ROLE_PREFIX: &str = "role:";
pub const USER_PREFIX: &str = "user:";

pub const PRODUCER: &str = "PRODUCER";
pub const CONSUMER: &str = "CONSUMER";
pub const ANONYMOUS: &str = "ANONYMOUS";
pub const NEW_USER: &str = "NEW_USER";
/// Older spelling of [`NEW_USER`].
pub const WITH_PRODUCER_ROLE: &str = "WITH_PRODUCER_ROLE";
pub const CREATOR: &str = "CREATOR";

/// The kind of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierKind {
    Role,
    User,
    Producer,
    Consumer,
    Anonymous,
    NewUser,
    Creator,
}

impl IdentifierKind {
    /// Returns true for kinds that carry no value.
    pub fn is_marker(&self) -> bool {
        !matches!(self, IdentifierKind::Role | IdentifierKind::User)
    }

    /// Marker token for this kind, or `None` for roles and users.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            IdentifierKind::Role | IdentifierKind::User => None,
            IdentifierKind::Producer => Some(PRODUCER),
            IdentifierKind::Consumer => Some(CONSUMER),
            IdentifierKind::Anonymous => Some(ANONYMOUS),
            IdentifierKind::NewUser => Some(NEW_USER),
            IdentifierKind::Creator => Some(CREATOR),
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        let upper = token.to_ascii_uppercase();
        match upper.as_str() {
            PRODUCER => Some(IdentifierKind::Producer),
            CONSUMER => Some(IdentifierKind::Consumer),
            ANONYMOUS => Some(IdentifierKind::Anonymous),
            NEW_USER | WITH_PRODUCER_ROLE => Some(IdentifierKind::NewUser),
            CREATOR => Some(IdentifierKind::Creator),
            _ => None,
        }
    }
}

/// A named identity: a role, a concrete user, or a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    kind: IdentifierKind,
    value: String,
}

impl Identifier {
    /// Parse a declaration string.
    pub fn parse(input: &str) -> ConfigResult<Self> {
        if let Some(name) = input.strip_prefix(ROLE_PREFIX) {
            return Self::concrete(IdentifierKind::Role, name, input);
        }
        if let Some(name) = input.strip_prefix(USER_PREFIX) {
            return Self::concrete(IdentifierKind::User, name, input);
        }
        match IdentifierKind::from_token(input) {
            Some(kind) => Ok(Self::marker(kind)),
            None => Err(ConfigError::malformed_identifier(
                input,
                "expected role:<name>, user:<name> or a reserved marker",
            )),
        }
    }

    /// A role identifier. Fails if the name is empty.
    pub fn role(name: impl Into<String>) -> ConfigResult<Self> {
        let name = name.into();
        let input = format!("{}{}", ROLE_PREFIX, name);
        Self::concrete(IdentifierKind::Role, &name, &input)
    }

    /// A user identifier. Fails if the username is empty.
    pub fn user(name: impl Into<String>) -> ConfigResult<Self> {
        let name = name.into();
        let input = format!("{}{}", USER_PREFIX, name);
        Self::concrete(IdentifierKind::User, &name, &input)
    }

    pub fn producer() -> Self {
        Self::marker(IdentifierKind::Producer)
    }

    pub fn consumer() -> Self {
        Self::marker(IdentifierKind::Consumer)
    }

    pub fn anonymous() -> Self {
        Self::marker(IdentifierKind::Anonymous)
    }

    pub fn new_user() -> Self {
        Self::marker(IdentifierKind::NewUser)
    }

    pub fn creator() -> Self {
        Self::marker(IdentifierKind::Creator)
    }

    fn marker(kind: IdentifierKind) -> Self {
        Self {
            kind,
            value: String::new(),
        }
    }

    fn concrete(kind: IdentifierKind, value: &str, input: &str) -> ConfigResult<Self> {
        if value.is_empty() {
            return Err(ConfigError::malformed_identifier(input, "empty name"));
        }
        Ok(Self {
            kind,
            value: value.to_string(),
        })
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Role name or username; empty for markers.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_marker(&self) -> bool {
        self.kind.is_marker()
    }

    /// Returns true for markers that stand for the producer's own identity.
    pub fn is_producer_alias(&self) -> bool {
        matches!(self.kind, IdentifierKind::Producer | IdentifierKind::Creator)
    }

    /// Split a role group such as `role:ADMIN:USER` into its parts.
    ///
    /// Returns an empty list for anything other than a role.
    pub fn role_parts(&self) -> Vec<&str> {
        match self.kind {
            IdentifierKind::Role => self.value.split(':').collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IdentifierKind::Role => write!(f, "{}{}", ROLE_PREFIX, self.value),
            IdentifierKind::User => write!(f, "{}{}", USER_PREFIX, self.value),
            marker => f.write_str(marker.token().unwrap_or_default()),
        }
    }
}

impl FromStr for Identifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}
