use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;
use crate::temporal::{parse_instant, Temporal};

/// A parameter limit: an integer, a float, or text that is neither.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Limit {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A parameter step. Shares the coercion rules of [`Limit`].
pub type Step = Limit;

impl Display for Limit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Integer(value) => write!(f, "{}", value),
            Limit::Float(value) => {
                let text = value.to_string();
                // keep a fraction so the value reads back as a float
                if value.is_finite() && !text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
                    write!(f, "{}.0", text)
                } else {
                    write!(f, "{}", text)
                }
            }
            Limit::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Coerce a limit or step value: an integer if it is one, else a float if
/// it is one, else the text unchanged. This never fails.
///
/// ```rust
/// use opensearch_xml::{parse_limit_or_step, Limit};
///
/// assert_eq!(parse_limit_or_step("42"), Limit::Integer(42));
/// assert_eq!(parse_limit_or_step("3.14"), Limit::Float(3.14));
/// assert_eq!(parse_limit_or_step("abc"), Limit::Text("abc".to_string()));
/// ```
pub fn parse_limit_or_step(raw: &str) -> Limit {
    if let Ok(value) = raw.parse::<i64>() {
        return Limit::Integer(value);
    }
    if let Ok(value) = raw.parse::<f64>() {
        return Limit::Float(value);
    }
    tracing::trace!(raw, "limit is not numeric, keeping text");
    Limit::Text(raw.to_string())
}

/// Parse an instant, or an interval of two instants separated by `/`.
pub fn parse_temporal(raw: &str) -> Result<Temporal, Error> {
    match raw.split_once('/') {
        Some((_, end)) if end.contains('/') => Err(Error::InvalidInterval(raw.to_string())),
        Some((start, end)) => Ok(Temporal::Interval(parse_instant(start)?, parse_instant(end)?)),
        None => Ok(Temporal::Instant(parse_instant(raw)?)),
    }
}

/// Interpret the text of `AdultContent`.
///
/// Absent means `false`. Present text is `false` only when it is "false",
/// "0" or "no" (in any case); any other text means `true`.
pub fn parse_adult_content(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(text) => !["false", "0", "no"]
            .iter()
            .any(|negative| text.eq_ignore_ascii_case(negative)),
    }
}

/// Parse a required integer value.
pub(crate) fn parse_integer<T: FromStr>(field: &'static str, raw: &str) -> Result<T, Error> {
    raw.trim().parse().map_err(|_| Error::InvalidInteger {
        field,
        value: raw.to_string(),
    })
}

/// Parse an optional integer value; absence is not an error.
pub(crate) fn parse_optional_integer<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, Error> {
    raw.map(|raw| parse_integer(field, raw)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("42", Limit::Integer(42))]
    #[case("-7", Limit::Integer(-7))]
    #[case("3.14", Limit::Float(3.14))]
    #[case("1e3", Limit::Float(1000.0))]
    #[case("abc", Limit::Text("abc".to_string()))]
    #[case("2020-01-01", Limit::Text("2020-01-01".to_string()))]
    #[case("", Limit::Text("".to_string()))]
    fn test_parse_limit_or_step(#[case] raw: &str, #[case] expected: Limit) {
        assert_eq!(parse_limit_or_step(raw), expected);
    }

    #[rstest]
    #[case(Limit::Integer(42), "42")]
    #[case(Limit::Float(3.14), "3.14")]
    #[case(Limit::Float(2.0), "2.0")]
    #[case(Limit::Text("P1D".to_string()), "P1D")]
    fn test_display_limit(#[case] limit: Limit, #[case] expected: &str) {
        assert_eq!(limit.to_string(), expected);
        assert_eq!(parse_limit_or_step(expected), limit);
    }

    #[test]
    fn test_parse_temporal_interval() {
        let parsed = parse_temporal("2020-01-01T00:00:00Z/2020-01-02T00:00:00Z").unwrap();
        assert_eq!(
            parsed,
            Temporal::Interval(
                parse_instant("2020-01-01T00:00:00Z").unwrap(),
                parse_instant("2020-01-02T00:00:00Z").unwrap()
            )
        );
    }

    #[test]
    fn test_parse_temporal_instant() {
        let parsed = parse_temporal("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(
            parsed,
            Temporal::Instant(parse_instant("2020-01-01T00:00:00Z").unwrap())
        );
    }

    #[rstest]
    #[case("2020-01-01T00:00:00Z/2020-01-02T00:00:00Z/2020-01-03T00:00:00Z")]
    #[case("2020-01-01T00:00:00Z/")]
    #[case("never")]
    fn test_parse_temporal_invalid(#[case] raw: &str) {
        assert_eq!(parse_temporal(raw).unwrap_err().kind(), ErrorKind::Format);
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("FALSE"), false)]
    #[case(Some("False"), false)]
    #[case(Some("0"), false)]
    #[case(Some("No"), false)]
    #[case(Some("maybe"), true)]
    #[case(Some(""), true)]
    #[case(None, false)]
    fn test_parse_adult_content(#[case] raw: Option<&str>, #[case] expected: bool) {
        assert_eq!(parse_adult_content(raw), expected);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer::<i64>("indexOffset", "0").unwrap(), 0);
        assert_eq!(
            parse_integer::<i64>("indexOffset", "one").unwrap_err().kind(),
            ErrorKind::Format
        );
        assert_eq!(
            parse_optional_integer::<u32>("width", None).unwrap(),
            None
        );
    }
}
