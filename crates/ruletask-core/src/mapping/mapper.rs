//! The closed set of result mappers.

use std::fmt;
use std::str::FromStr;

use crate::domain::{EvaluationResult, MappingError, NotFoundError, TypedValue};

use super::{collect, single};

/// How a raw evaluation result becomes a variable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultMapper {
    /// The only output of the only matched rule.
    SingleEntry,
    /// All outputs of the only matched rule, as a map.
    SingleResult,
    /// The values of the one output name, across all matches.
    CollectValues,
    /// One output map per matched rule.
    #[default]
    ResultList,
}

impl ResultMapper {
    pub const ALL: [ResultMapper; 4] = [
        ResultMapper::SingleEntry,
        ResultMapper::SingleResult,
        ResultMapper::CollectValues,
        ResultMapper::ResultList,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResultMapper::SingleEntry => "singleEntry",
            ResultMapper::SingleResult => "singleResult",
            ResultMapper::CollectValues => "collectValues",
            ResultMapper::ResultList => "resultList",
        }
    }

    /// Parse an optional mapper name; absent means [`ResultMapper::ResultList`].
    pub fn from_name(name: Option<&str>) -> Result<Self, NotFoundError> {
        name.map_or(Ok(ResultMapper::default()), |n| n.parse())
    }

    pub fn map(&self, result: &EvaluationResult) -> Result<TypedValue, MappingError> {
        match self {
            ResultMapper::SingleEntry => single::single_entry(result),
            ResultMapper::SingleResult => single::single_result(result),
            ResultMapper::CollectValues => collect::collect_values(result),
            ResultMapper::ResultList => Ok(collect::result_list(result)),
        }
    }

    pub(crate) fn failure(&self, result: &EvaluationResult, cause: impl Into<String>) -> MappingError {
        MappingError {
            mapper: self.name(),
            result: result.summary(),
            cause: cause.into(),
        }
    }
}

impl FromStr for ResultMapper {
    type Err = NotFoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultMapper::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| NotFoundError::ResultMapper(s.to_string()))
    }
}

impl fmt::Display for ResultMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("singleEntry", ResultMapper::SingleEntry)]
    #[case("singleResult", ResultMapper::SingleResult)]
    #[case("collectValues", ResultMapper::CollectValues)]
    #[case("resultList", ResultMapper::ResultList)]
    fn names_round_trip(#[case] name: &str, #[case] mapper: ResultMapper) {
        assert_eq!(name.parse::<ResultMapper>().unwrap(), mapper);
        assert_eq!(mapper.to_string(), name);
    }

    #[rstest]
    #[case("invalid")]
    #[case("SingleEntry")]
    #[case("")]
    fn unknown_names_are_not_found(#[case] name: &str) {
        let err = name.parse::<ResultMapper>().unwrap_err();
        assert_eq!(err, NotFoundError::ResultMapper(name.to_string()));
        assert_eq!(
            err.to_string(),
            format!("No decision result mapper found for name '{name}'")
        );
    }

    #[test]
    fn absent_name_defaults_to_result_list() {
        assert_eq!(ResultMapper::from_name(None).unwrap(), ResultMapper::ResultList);
        assert_eq!(
            ResultMapper::from_name(Some("singleEntry")).unwrap(),
            ResultMapper::SingleEntry
        );
    }
}
