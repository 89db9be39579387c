//! Run/skip decision for one method in one matrix cell.

use tracing::debug;

use idmatrix_core::{ConfigResult, Identifier, IdentifierSet};

use crate::rule::{MethodRules, Selection};

/// Decides which methods run for a fixed (producer, consumer) pair.
///
/// Decisions are pure: the filter can be consulted before any fixture is
/// built, so skipped methods are never instantiated.
#[derive(Debug, Clone, Copy)]
pub struct MethodFilter<'a> {
    producer: &'a Identifier,
    consumer: &'a Identifier,
    class_rule: Option<&'a Selection>,
}

impl<'a> MethodFilter<'a> {
    pub fn new(producer: &'a Identifier, consumer: &'a Identifier) -> Self {
        Self {
            producer,
            consumer,
            class_rule: None,
        }
    }

    /// Class-level include rule that `ignore_for` rules narrow.
    pub fn with_class_rule(mut self, class_rule: &'a Selection) -> Self {
        self.class_rule = Some(class_rule);
        self
    }

    /// Whether the method runs in this cell.
    ///
    /// - no rule: always runs
    /// - `run_with`: producer and consumer must each match their filter
    /// - `ignore_for`: the class rule must match and neither the producer nor
    ///   the consumer may be named by the exclusion
    /// - both: `ConflictingFilterRule`
    pub fn should_run(&self, rules: &MethodRules) -> ConfigResult<bool> {
        rules.validate()?;

        let decision = match (rules.run_with(), rules.ignore_for()) {
            (Some(include), _) => self.matches(include),
            (None, Some(exclude)) => {
                let allowed = self.class_rule.map_or(true, |class| self.matches(class));
                allowed && !self.excluded_by(exclude)
            }
            (None, None) => true,
        };

        debug!(
            method = %rules.method(),
            producer = %self.producer,
            consumer = %self.consumer,
            run = decision,
            "Filter decision"
        );
        Ok(decision)
    }

    /// Partition rules into the ones that run and the ones that are skipped.
    pub fn partition<'r, I>(&self, rules: I) -> ConfigResult<(Vec<&'r MethodRules>, Vec<&'r MethodRules>)>
    where
        I: IntoIterator<Item = &'r MethodRules>,
    {
        let mut run = Vec::new();
        let mut skip = Vec::new();
        for rule in rules {
            if self.should_run(rule)? {
                run.push(rule);
            } else {
                skip.push(rule);
            }
        }
        Ok((run, skip))
    }

    fn matches(&self, selection: &Selection) -> bool {
        let producer_match =
            selection.producers.is_empty() || selection.producers.contains(self.producer);
        let consumer_match =
            selection.consumers.is_empty() || self.consumer_in(&selection.consumers);
        producer_match && consumer_match
    }

    fn excluded_by(&self, selection: &Selection) -> bool {
        let producer_excluded =
            !selection.producers.is_empty() && selection.producers.contains(self.producer);
        let consumer_excluded =
            !selection.consumers.is_empty() && self.consumer_in(&selection.consumers);
        producer_excluded || consumer_excluded
    }

    /// Consumer membership with self-reference resolution: a `PRODUCER`
    /// (or `CREATOR`) entry also matches a consumer that is the producer's
    /// own identity or a producer marker itself.
    fn consumer_in(&self, filter: &IdentifierSet) -> bool {
        if filter.contains(self.consumer) {
            return true;
        }
        let names_producer = filter.iter().any(Identifier::is_producer_alias);
        names_producer && (self.consumer == self.producer || self.consumer.is_producer_alias())
    }
}
