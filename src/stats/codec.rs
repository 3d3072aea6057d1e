//! Text encoding for the integer-list columns of the game table.
//!
//! Lists are stored comma-joined (`"8,6,6"`). Decoding rejects empty input and
//! any token that is not an integer, so a corrupt row surfaces as a storage
//! error instead of silently skewing averages.

use super::{models::StatLine, StatsError, STAT_CATEGORIES};

const SEPARATOR: &str = ",";

pub fn encode_list(values: &[i64]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn decode_list(text: &str) -> Result<Vec<i64>, StatsError> {
    if text.trim().is_empty() {
        return Err(StatsError::Storage("empty integer list column".to_string()));
    }

    text.split(SEPARATOR)
        .map(|token| {
            token.trim().parse::<i64>().map_err(|_| {
                StatsError::Storage(format!("invalid integer token {:?} in {:?}", token, text))
            })
        })
        .collect()
}

pub fn decode_stat_line(text: &str) -> Result<StatLine, StatsError> {
    let values = decode_list(text)?;
    let len = values.len();
    values.try_into().map_err(|_| {
        StatsError::Storage(format!(
            "stat_points column has {} values, expected {}",
            len, STAT_CATEGORIES
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![8, 6, 6], "8,6,6")]
    #[case(vec![-3], "-3")]
    #[case(vec![], "")]
    fn encodes_comma_joined(#[case] values: Vec<i64>, #[case] expected: &str) {
        assert_eq!(encode_list(&values), expected);
    }

    #[test]
    fn decodes_encoded_lists() {
        assert_eq!(decode_list(&encode_list(&[1, 2, 30])).unwrap(), vec![1, 2, 30]);
        assert_eq!(decode_list(" 4, 5 ").unwrap(), vec![4, 5]);
    }

    #[rstest]
    #[case("")]
    #[case("1,,2")]
    #[case("1,two")]
    #[case("1.5")]
    fn rejects_malformed_lists(#[case] text: &str) {
        assert!(matches!(decode_list(text), Err(StatsError::Storage(_))));
    }

    #[test]
    fn stat_line_requires_exact_arity() {
        assert_eq!(decode_stat_line("5,7,8").unwrap(), [5, 7, 8]);
        assert!(matches!(
            decode_stat_line("5,7"),
            Err(StatsError::Storage(_))
        ));
        assert!(matches!(
            decode_stat_line("5,7,8,9"),
            Err(StatsError::Storage(_))
        ));
    }
}
