//! Documented defaults of the description vocabulary.
//!
//! A field that holds its default value is treated as "not set" when
//! encoding: the [`is_default`] predicates decide, field by field, what the
//! encoder leaves out. The parser restores these same defaults when the
//! element or attribute is absent.

use crate::description::{HttpMethod, SyndicationRight};

pub const REL: &str = "results";
pub const INDEX_OFFSET: i64 = 1;
pub const PAGE_OFFSET: i64 = 1;
pub const METHOD: HttpMethod = HttpMethod::Get;
pub const MINIMUM: i64 = 1;
pub const MAXIMUM: i64 = 1;
pub const SYNDICATION_RIGHT: SyndicationRight = SyndicationRight::Open;
pub const ADULT_CONTENT: bool = false;
pub const LANGUAGES: &[&str] = &["*"];
pub const INPUT_ENCODINGS: &[&str] = &["UTF-8"];
pub const OUTPUT_ENCODINGS: &[&str] = &["UTF-8"];

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn same_sequence(values: &[String], default: &[&str]) -> bool {
    values.len() == default.len() && values.iter().zip(default).all(|(a, b)| a == b)
}

/// One predicate per elidable field.
pub mod is_default {
    use super::*;

    pub fn rel(value: &str) -> bool {
        value == REL
    }

    pub fn index_offset(value: i64) -> bool {
        value == INDEX_OFFSET
    }

    pub fn page_offset(value: i64) -> bool {
        value == PAGE_OFFSET
    }

    pub fn method(value: HttpMethod) -> bool {
        value == METHOD
    }

    pub fn minimum(value: i64) -> bool {
        value == MINIMUM
    }

    pub fn maximum(value: i64) -> bool {
        value == MAXIMUM
    }

    pub fn syndication_right(value: SyndicationRight) -> bool {
        value == SYNDICATION_RIGHT
    }

    pub fn adult_content(value: bool) -> bool {
        value == ADULT_CONTENT
    }

    /// No tags is the default; `Tags` is then left out.
    pub fn tags(values: &[String]) -> bool {
        values.is_empty()
    }

    pub fn languages(values: &[String]) -> bool {
        same_sequence(values, LANGUAGES)
    }

    pub fn input_encodings(values: &[String]) -> bool {
        same_sequence(values, INPUT_ENCODINGS)
    }

    pub fn output_encodings(values: &[String]) -> bool {
        same_sequence(values, OUTPUT_ENCODINGS)
    }
}
