//! Mappers over all matched rules.

use crate::domain::{EvaluationResult, MappingError, TypedValue};

use super::ResultMapper;

/// Output names used across all matches, in first-seen order.
fn output_names(result: &EvaluationResult) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for rule in result.matches() {
        for output in rule.outputs() {
            if !names.contains(&output.output_name.as_str()) {
                names.push(&output.output_name);
            }
        }
    }
    names
}

pub(super) fn collect_values(result: &EvaluationResult) -> Result<TypedValue, MappingError> {
    let names = output_names(result);
    if names.len() > 1 {
        return Err(ResultMapper::CollectValues.failure(
            result,
            format!(
                "expected one output name to collect but found {}: {}",
                names.len(),
                names.join(", ")
            ),
        ));
    }

    // Zero or one distinct name: every output entry belongs to the collected column.
    let values = result
        .matches()
        .iter()
        .flat_map(|rule| rule.outputs().iter().map(|o| o.value.clone()))
        .collect();
    Ok(TypedValue::List(values))
}

pub(super) fn result_list(result: &EvaluationResult) -> TypedValue {
    TypedValue::List(
        result
            .matches()
            .iter()
            .map(|rule| TypedValue::Map(rule.output_map()))
            .collect(),
    )
}
