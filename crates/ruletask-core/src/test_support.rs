//! Shared fixtures for unit tests.

use crate::domain::{EvaluationResult, OutputEntry, RuleMatch};

/// A matched rule whose output clause ids are derived from the output names.
pub(crate) fn rule(rule_id: &str, outputs: &[(&str, &str)]) -> RuleMatch {
    outputs.iter().fold(RuleMatch::new(rule_id), |rule, (name, value)| {
        rule.with_output(OutputEntry::new(format!("out_{name}"), *name, *value))
    })
}

pub(crate) fn result_of(rules: Vec<RuleMatch>) -> EvaluationResult {
    rules
        .into_iter()
        .fold(EvaluationResult::new(), EvaluationResult::with_match)
}
