//! Mappers that require exactly one matched rule.

use crate::domain::{EvaluationResult, MappingError, RuleMatch, TypedValue};

use super::ResultMapper;

fn only_match(mapper: ResultMapper, result: &EvaluationResult) -> Result<&RuleMatch, MappingError> {
    match result.matches() {
        [only] => Ok(only),
        [] => Err(mapper.failure(result, "expected exactly one matched rule but none matched")),
        many => Err(mapper.failure(
            result,
            format!("expected exactly one matched rule but {} matched", many.len()),
        )),
    }
}

pub(super) fn single_entry(result: &EvaluationResult) -> Result<TypedValue, MappingError> {
    let mapper = ResultMapper::SingleEntry;
    let rule = only_match(mapper, result)?;
    match rule.outputs() {
        [entry] => Ok(entry.value.clone()),
        outputs => Err(mapper.failure(
            result,
            format!(
                "expected exactly one output entry but rule '{}' has {}",
                rule.rule_id,
                outputs.len()
            ),
        )),
    }
}

pub(super) fn single_result(result: &EvaluationResult) -> Result<TypedValue, MappingError> {
    let rule = only_match(ResultMapper::SingleResult, result)?;
    Ok(TypedValue::Map(rule.output_map()))
}
