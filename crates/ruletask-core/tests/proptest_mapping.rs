//! Property tests for the result mappers and history output ordering.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use ruletask_core::app::HistoryEventProducer;
use ruletask_core::domain::{
    DecisionDefinition, ErrorKind, EvaluationResult, OutputEntry, RuleMatch, TypedValue,
};
use ruletask_core::mapping::ResultMapper;
use ruletask_core::ports::{FixedClock, UlidGenerator};

type Rule = Vec<(String, i32)>;

/// A matched rule with 0..=3 distinct output names drawn from a small pool.
fn rule_strategy() -> impl Strategy<Value = Rule> {
    prop::collection::btree_map(prop::sample::select(vec!["a", "b", "c"]), any::<i32>(), 0..=3)
        .prop_map(|outputs| {
            outputs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect()
        })
}

/// Like [`rule_strategy`] but output names may repeat within one rule.
fn noisy_rule_strategy() -> impl Strategy<Value = Rule> {
    prop::collection::vec((prop::sample::select(vec!["a", "b"]), any::<i32>()), 0..=4).prop_map(
        |outputs| {
            outputs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect()
        },
    )
}

fn rules_strategy() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(rule_strategy(), 0..5)
}

fn build(rules: &[Rule]) -> EvaluationResult {
    rules
        .iter()
        .enumerate()
        .map(|(i, outputs)| {
            outputs
                .iter()
                .fold(RuleMatch::new(format!("r{i}")), |rule, (name, value)| {
                    rule.with_output(OutputEntry::new(format!("out_{name}"), name.as_str(), *value))
                })
        })
        .fold(EvaluationResult::new(), EvaluationResult::with_match)
}

fn distinct_names(rules: &[Rule]) -> BTreeSet<&str> {
    rules
        .iter()
        .flat_map(|rule| rule.iter().map(|(name, _)| name.as_str()))
        .collect()
}

proptest! {
    #[test]
    fn result_list_never_fails_and_mirrors_matches(rules in rules_strategy()) {
        let result = build(&rules);
        let mapped = ResultMapper::ResultList.map(&result).unwrap();

        let expected: Vec<TypedValue> = result
            .matches()
            .iter()
            .map(|rule| TypedValue::Map(rule.output_map()))
            .collect();
        prop_assert_eq!(mapped, TypedValue::List(expected));
    }

    #[test]
    fn single_entry_succeeds_only_for_one_match_with_one_output(rules in rules_strategy()) {
        let result = build(&rules);
        match (rules.as_slice(), ResultMapper::SingleEntry.map(&result)) {
            ([only], Ok(value)) if only.len() == 1 => {
                prop_assert_eq!(value, TypedValue::Integer(only[0].1));
            }
            ([only], Err(_)) => {
                prop_assert_ne!(only.len(), 1);
            }
            (_, Ok(_)) => {
                prop_assert!(false, "singleEntry accepted {} matches", rules.len());
            }
            (_, Err(err)) => {
                prop_assert_eq!(err.mapper, "singleEntry");
            }
        }
    }

    #[test]
    fn single_result_succeeds_only_for_one_match(rules in rules_strategy()) {
        let result = build(&rules);
        let mapped = ResultMapper::SingleResult.map(&result);
        if rules.len() == 1 {
            prop_assert_eq!(mapped.unwrap(), TypedValue::Map(result.matches()[0].output_map()));
        } else {
            prop_assert!(mapped.is_err());
        }
    }

    #[test]
    fn collect_values_keeps_match_order_or_rejects_ambiguity(rules in rules_strategy()) {
        let result = build(&rules);
        let mapped = ResultMapper::CollectValues.map(&result);

        if distinct_names(&rules).len() <= 1 {
            let expected: Vec<TypedValue> = rules
                .iter()
                .flat_map(|rule| rule.iter().map(|(_, v)| TypedValue::Integer(*v)))
                .collect();
            prop_assert_eq!(mapped.unwrap(), TypedValue::List(expected));
        } else {
            let err = mapped.unwrap_err();
            prop_assert!(err.to_string().contains("The decision result mapper failed to process"));
        }
    }

    #[test]
    fn mappers_agree_with_output_map_when_names_repeat(
        rules in prop::collection::vec(noisy_rule_strategy(), 0..4)
    ) {
        let result = build(&rules);
        for rule in result.matches() {
            prop_assert_eq!(rule.outputs().len(), rule.output_map().len());
        }

        let single_entry = ResultMapper::SingleEntry.map(&result);
        match result.matches() {
            [only] if only.output_map().len() == 1 => {
                let expected = only.output_map().iter().next().map(|(_, v)| v.clone());
                prop_assert_eq!(single_entry.ok(), expected);
            }
            _ => prop_assert!(single_entry.is_err()),
        }

        let names: BTreeSet<String> = result
            .matches()
            .iter()
            .flat_map(|rule| rule.output_map().iter().map(|(name, _)| name.to_string()).collect::<Vec<_>>())
            .collect();
        let collected = ResultMapper::CollectValues.map(&result);
        if names.len() <= 1 {
            let expected: Vec<TypedValue> = result
                .matches()
                .iter()
                .flat_map(|rule| rule.output_map().iter().map(|(_, v)| v.clone()).collect::<Vec<_>>())
                .collect();
            prop_assert_eq!(collected.unwrap(), TypedValue::List(expected));
        } else {
            prop_assert!(collected.is_err());
        }

        let listed: Vec<TypedValue> = result
            .matches()
            .iter()
            .map(|rule| TypedValue::Map(rule.output_map()))
            .collect();
        prop_assert_eq!(ResultMapper::ResultList.map(&result).unwrap(), TypedValue::List(listed));
    }

    #[test]
    fn history_rule_order_is_one_based_and_follows_match_order(rules in rules_strategy()) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        let producer = HistoryEventProducer::new(clock.clone(), Arc::new(UlidGenerator::new(clock)));
        let result = build(&rules);

        let event = producer
            .build(&DecisionDefinition::new("d:1", "d", 1), &result, None)
            .unwrap();

        let expected: Vec<(String, usize, String)> = rules
            .iter()
            .enumerate()
            .flat_map(|(i, rule)| {
                rule.iter()
                    .map(move |(name, _)| (format!("r{i}"), i + 1, format!("out_{name}")))
            })
            .collect();
        let actual: Vec<(String, usize, String)> = event
            .outputs()
            .iter()
            .map(|o| (o.rule_id().to_string(), o.rule_order(), o.clause_id().to_string()))
            .collect();
        prop_assert_eq!(actual, expected);

        let orders: Vec<usize> = event.outputs().iter().map(|o| o.rule_order()).collect();
        prop_assert!(orders.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(orders.first().is_none_or(|&first| first >= 1));
    }

    #[test]
    fn unknown_mapper_names_are_not_found(name in "[a-zA-Z]{1,16}") {
        let parsed = ResultMapper::from_name(Some(name.as_str()));
        let known = ResultMapper::ALL.iter().any(|m| m.name() == name);
        prop_assert_eq!(parsed.is_ok(), known);
        if let Err(err) = parsed {
            prop_assert_eq!(
                ruletask_core::domain::DecisionTaskError::from(err).kind(),
                ErrorKind::NotFound
            );
        }
    }
}
