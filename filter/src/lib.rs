//! Method filtering.
//!
//! A method may narrow the cells it runs in with a `run_with` rule (include)
//! or an `ignore_for` rule (exclude). [`MethodFilter`] decides, for one
//! (producer, consumer) pair, whether a method runs.

mod filter;
mod rule;

pub use filter::MethodFilter;
pub use rule::{MethodDeclaration, MethodRules, RuleDeclaration, Selection};
