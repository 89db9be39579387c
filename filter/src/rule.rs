//! Method-level rule declarations and their parsed form.

use serde::{Deserialize, Serialize};

use idmatrix_core::{ConfigError, ConfigResult, IdentifierSet};

/// Raw producer/consumer lists of one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDeclaration {
    #[serde(default)]
    pub producers: Vec<String>,
    #[serde(default)]
    pub consumers: Vec<String>,
}

impl RuleDeclaration {
    pub fn new<P, C, S>(producers: P, consumers: C) -> Self
    where
        P: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            producers: producers.into_iter().map(Into::into).collect(),
            consumers: consumers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Raw method declaration, as written next to a test method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_with: Option<RuleDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_for: Option<RuleDeclaration>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn run_with(mut self, rule: RuleDeclaration) -> Self {
        self.run_with = Some(rule);
        self
    }

    pub fn ignore_for(mut self, rule: RuleDeclaration) -> Self {
        self.ignore_for = Some(rule);
        self
    }
}

/// Parsed producer and consumer filters of one rule.
///
/// An empty set leaves its axis unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub producers: IdentifierSet,
    pub consumers: IdentifierSet,
}

impl Selection {
    pub fn new(producers: IdentifierSet, consumers: IdentifierSet) -> Self {
        Self {
            producers,
            consumers,
        }
    }

    pub fn parse(declaration: &RuleDeclaration) -> ConfigResult<Self> {
        Ok(Self {
            producers: IdentifierSet::parse(&declaration.producers)?,
            consumers: IdentifierSet::parse(&declaration.consumers)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty() && self.consumers.is_empty()
    }
}

/// Parsed rules of one method.
///
/// Both rules may be present after parsing; that conflict is reported by
/// [`MethodRules::validate`] and by the filter, against this method only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodRules {
    method: String,
    run_with: Option<Selection>,
    ignore_for: Option<Selection>,
}

impl MethodRules {
    /// Rules of a method without any declaration.
    pub fn unconstrained(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Parse a method declaration. Only malformed identifiers fail here.
    pub fn resolve(declaration: &MethodDeclaration) -> ConfigResult<Self> {
        Ok(Self {
            method: declaration.name.clone(),
            run_with: declaration.run_with.as_ref().map(Selection::parse).transpose()?,
            ignore_for: declaration.ignore_for.as_ref().map(Selection::parse).transpose()?,
        })
    }

    pub fn with_run_with(mut self, selection: Selection) -> Self {
        self.run_with = Some(selection);
        self
    }

    pub fn with_ignore_for(mut self, selection: Selection) -> Self {
        self.ignore_for = Some(selection);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn run_with(&self) -> Option<&Selection> {
        self.run_with.as_ref()
    }

    pub fn ignore_for(&self) -> Option<&Selection> {
        self.ignore_for.as_ref()
    }

    /// Fails if both an include and an exclude rule are declared.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.run_with.is_some() && self.ignore_for.is_some() {
            return Err(ConfigError::conflicting_filter_rule(&self.method));
        }
        Ok(())
    }
}
