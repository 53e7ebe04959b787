//! Raw evaluation result as reported by the decision evaluator.
//!
//! The engine never interprets how rules were matched; it only consumes
//! the shape below. Order is significant everywhere: input clauses and
//! rule matches are kept in the order the evaluator reported them.

use serde::{Deserialize, Serialize};

use super::value::{OutputMap, TypedValue};

/// One input clause and the value it was evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEntry {
    pub clause_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_name: Option<String>,
    pub value: TypedValue,
}

impl InputEntry {
    pub fn new(clause_id: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        Self {
            clause_id: clause_id.into(),
            clause_name: None,
            value: value.into(),
        }
    }

    pub fn named(mut self, clause_name: impl Into<String>) -> Self {
        self.clause_name = Some(clause_name.into());
        self
    }
}

/// One output clause value of a matched rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEntry {
    pub clause_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_name: Option<String>,
    /// Name under which the value is exposed to mappers and variables.
    pub output_name: String,
    pub value: TypedValue,
}

impl OutputEntry {
    pub fn new(
        clause_id: impl Into<String>,
        output_name: impl Into<String>,
        value: impl Into<TypedValue>,
    ) -> Self {
        Self {
            clause_id: clause_id.into(),
            clause_name: None,
            output_name: output_name.into(),
            value: value.into(),
        }
    }

    pub fn named(mut self, clause_name: impl Into<String>) -> Self {
        self.clause_name = Some(clause_name.into());
        self
    }
}

/// One matched rule.
///
/// Outputs behave as a map from output name to value: a name appears at
/// most once, in the order the evaluator reported its clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRuleMatch")]
pub struct RuleMatch {
    pub rule_id: String,
    /// Zero-based position among the matches of one evaluation.
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    outputs: Vec<OutputEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRuleMatch {
    rule_id: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    outputs: Vec<OutputEntry>,
}

impl TryFrom<RawRuleMatch> for RuleMatch {
    type Error = String;

    fn try_from(raw: RawRuleMatch) -> Result<Self, Self::Error> {
        for (i, output) in raw.outputs.iter().enumerate() {
            if raw.outputs[..i].iter().any(|o| o.output_name == output.output_name) {
                return Err(format!(
                    "rule '{}' reports output '{}' more than once",
                    raw.rule_id, output.output_name
                ));
            }
        }
        Ok(Self {
            rule_id: raw.rule_id,
            index: raw.index,
            outputs: raw.outputs,
        })
    }
}

impl RuleMatch {
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            index: 0,
            outputs: Vec::new(),
        }
    }

    /// Add an output; an existing entry with the same output name is
    /// replaced in place, like [`OutputMap::insert`].
    pub fn with_output(mut self, output: OutputEntry) -> Self {
        match self
            .outputs
            .iter_mut()
            .find(|o| o.output_name == output.output_name)
        {
            Some(slot) => *slot = output,
            None => self.outputs.push(output),
        }
        self
    }

    pub fn outputs(&self) -> &[OutputEntry] {
        &self.outputs
    }

    /// Outputs keyed by output name, in clause order.
    pub fn output_map(&self) -> OutputMap {
        self.outputs
            .iter()
            .map(|o| (o.output_name.clone(), o.value.clone()))
            .collect()
    }
}

/// The raw result of one decision evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    #[serde(default)]
    inputs: Vec<InputEntry>,
    #[serde(default)]
    matches: Vec<RuleMatch>,
    /// Result of a collect aggregation (sum/min/max/count), if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collect_aggregate: Option<TypedValue>,
}

impl EvaluationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: InputEntry) -> Self {
        self.inputs.push(input);
        self
    }

    /// Append a match; its `index` is set to its position.
    pub fn with_match(mut self, mut rule: RuleMatch) -> Self {
        rule.index = self.matches.len();
        self.matches.push(rule);
        self
    }

    pub fn with_collect_aggregate(mut self, value: TypedValue) -> Self {
        self.collect_aggregate = Some(value);
        self
    }

    /// Re-number match indices after deserialization.
    pub fn reindexed(mut self) -> Self {
        for (i, rule) in self.matches.iter_mut().enumerate() {
            rule.index = i;
        }
        self
    }

    pub fn inputs(&self) -> &[InputEntry] {
        &self.inputs
    }

    pub fn matches(&self) -> &[RuleMatch] {
        &self.matches
    }

    pub fn collect_aggregate(&self) -> Option<&TypedValue> {
        self.collect_aggregate.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Short human-readable description used in error messages.
    pub fn summary(&self) -> String {
        let rules: Vec<String> = self
            .matches
            .iter()
            .map(|m| format!("{}{}", m.rule_id, m.output_map()))
            .collect();
        format!("[{}]", rules.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_match_assigns_zero_based_indices() {
        let result = EvaluationResult::new()
            .with_match(RuleMatch::new("r1"))
            .with_match(RuleMatch::new("r2"));

        let indices: Vec<usize> = result.matches().iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn output_map_uses_output_names_in_clause_order() {
        let rule = RuleMatch::new("r1")
            .with_output(OutputEntry::new("c2", "result2", "bar"))
            .with_output(OutputEntry::new("c1", "result1", "foo"));

        let map = rule.output_map();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["result2", "result1"]);
    }

    #[test]
    fn repeated_output_name_replaces_the_earlier_entry() {
        let rule = RuleMatch::new("r1")
            .with_output(OutputEntry::new("c1", "result", "foo"))
            .with_output(OutputEntry::new("c2", "other", "baz"))
            .with_output(OutputEntry::new("c1", "result", "bar"));

        let names: Vec<&str> = rule.outputs().iter().map(|o| o.output_name.as_str()).collect();
        assert_eq!(names, vec!["result", "other"]);
        assert_eq!(rule.outputs()[0].value, TypedValue::string("bar"));
        assert_eq!(rule.outputs().len(), rule.output_map().len());
    }

    #[test]
    fn deserializing_a_repeated_output_name_fails() {
        let raw = json!({
            "matches": [{
                "ruleId": "r1",
                "outputs": [
                    {"clauseId": "c1", "outputName": "result", "value": {"type": "string", "value": "foo"}},
                    {"clauseId": "c1", "outputName": "result", "value": {"type": "string", "value": "bar"}}
                ]
            }]
        });
        let err = serde_json::from_value::<EvaluationResult>(raw).unwrap_err();
        assert!(err.to_string().contains("rule 'r1' reports output 'result' more than once"));
    }

    #[test]
    fn deserialized_results_can_be_reindexed() {
        let raw = json!({
            "matches": [
                {"ruleId": "a", "index": 7, "outputs": []},
                {"ruleId": "b", "outputs": []}
            ]
        });
        let result: EvaluationResult = serde_json::from_value(raw).unwrap();
        let result = result.reindexed();
        assert_eq!(result.matches()[0].index, 0);
        assert_eq!(result.matches()[1].index, 1);
    }

    #[test]
    fn summary_lists_rules_and_outputs() {
        let result = EvaluationResult::new().with_match(
            RuleMatch::new("r1").with_output(OutputEntry::new("c1", "result1", "foo")),
        );
        assert_eq!(result.summary(), r#"[r1{result1="foo"}]"#);
    }
}
