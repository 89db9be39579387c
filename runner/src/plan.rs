//! Dry-run planning: which methods run in which cell.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use idmatrix_core::Identifier;
use idmatrix_filter::{MethodDeclaration, MethodFilter, MethodRules, Selection};
use idmatrix_matrix::{Declaration, MatrixCell, MatrixConfiguration, MatrixExpander};

use crate::error::{RunnerError, RunnerResult};

/// A class declaration as loaded from JSON.
///
/// ```json
/// {
///   "name": "TodoServiceIT",
///   "producers": ["role:ADMIN"],
///   "consumers": ["PRODUCER", "role:USER"],
///   "methods": [
///     { "name": "get_private_list" },
///     { "name": "admin_only", "run_with": { "consumers": ["role:ADMIN"] } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    #[serde(flatten)]
    pub matrix: Declaration,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}

impl ClassDeclaration {
    pub fn from_json(path: &str, source: &str) -> RunnerResult<Self> {
        serde_json::from_str(source).map_err(|e| RunnerError::declaration_parse(path, e.to_string()))
    }

    pub fn load(path: &Path) -> RunnerResult<Self> {
        let display = path.display().to_string();
        let source =
            fs::read_to_string(path).map_err(|e| RunnerError::declaration_read(&display, e))?;
        Self::from_json(&display, &source)
    }
}

/// Filter outcome of one method in one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Run,
    Skip,
    /// The method's rules are invalid; it fails in every cell.
    Invalid(String),
}

impl Decision {
    pub(crate) fn decide(filter: &MethodFilter<'_>, rules: &MethodRules) -> Self {
        match filter.should_run(rules) {
            Ok(true) => Decision::Run,
            Ok(false) => Decision::Skip,
            Err(e) => Decision::Invalid(e.to_string()),
        }
    }

    /// Decisions for every method, in declaration order.
    pub(crate) fn for_cell(
        cell: &MatrixCell,
        class_rule: &Selection,
        rules: &[MethodRules],
    ) -> Vec<Decision> {
        let filter = MethodFilter::new(cell.producer(), cell.consumer()).with_class_rule(class_rule);
        rules.iter().map(|r| Self::decide(&filter, r)).collect()
    }

    pub fn is_run(&self) -> bool {
        matches!(self, Decision::Run)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMethod {
    pub name: String,
    #[serde(flatten)]
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCell {
    pub index: usize,
    pub label: String,
    pub producer: Identifier,
    pub consumer: Identifier,
    pub methods: Vec<PlannedMethod>,
}

impl PlannedCell {
    /// No method runs: the cell is reported with every method ignored.
    pub fn all_skipped(&self) -> bool {
        !self.methods.iter().any(|m| m.decision.is_run())
    }
}

/// Expanded cells of a class with per-method decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub class: String,
    pub cells: Vec<PlannedCell>,
}

impl Plan {
    pub fn build(declaration: &ClassDeclaration) -> RunnerResult<Self> {
        let configuration = MatrixConfiguration::build(&declaration.name, &declaration.matrix)?;
        let rules = declaration
            .methods
            .iter()
            .map(MethodRules::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        let class_rule = Selection::new(
            configuration.producers().clone(),
            configuration.consumers().clone(),
        );

        let cells = MatrixExpander::expand(&configuration)
            .into_iter()
            .map(|cell| {
                let methods = Decision::for_cell(&cell, &class_rule, &rules)
                    .into_iter()
                    .zip(&rules)
                    .map(|(decision, rule)| PlannedMethod {
                        name: rule.method().to_string(),
                        decision,
                    })
                    .collect();
                PlannedCell {
                    index: cell.index(),
                    label: cell.label(),
                    producer: cell.producer().clone(),
                    consumer: cell.consumer().clone(),
                    methods,
                }
            })
            .collect();

        Ok(Self {
            class: configuration.class().to_string(),
            cells,
        })
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Class: {}", self.class));
        lines.push(format!("Cells: {}", self.cells.len()));
        lines.push(String::new());

        for cell in &self.cells {
            lines.push(format!("[{}] {}", cell.index, cell.label));
            if cell.all_skipped() {
                lines.push("  (no method selected, all ignored)".to_string());
            }
            for method in &cell.methods {
                let mark = match &method.decision {
                    Decision::Run => "run ".to_string(),
                    Decision::Skip => "skip".to_string(),
                    Decision::Invalid(reason) => format!("FAIL ({})", reason),
                };
                lines.push(format!("  {} {}", mark, method.name));
            }
        }

        lines.join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
