use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc};

use crate::error::Error;

/// A point in time with its timezone offset.
pub type Instant = DateTime<FixedOffset>;

/// A single instant, or an interval `[start, end)` of two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Temporal {
    Instant(Instant),
    Interval(Instant, Instant),
}

impl Temporal {
    /// The instant, or the start of the interval.
    pub fn start(&self) -> Instant {
        match self {
            Temporal::Instant(instant) => *instant,
            Temporal::Interval(start, _) => *start,
        }
    }
}

impl Display for Temporal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Temporal::Instant(instant) => write!(f, "{}", format_instant(instant)),
            Temporal::Interval(start, end) => {
                write!(f, "{}/{}", format_instant(start), format_instant(end))
            }
        }
    }
}

// `%#z` takes `Z`, `+hh`, `+hhmm` and `+hh:mm`
const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
    "%Y%m%dT%H%M%#z",
];

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Parse an ISO-8601 instant.
///
/// Accepts the extended (`2020-01-01T10:00:00Z`) and basic
/// (`20200101T100000Z`) forms, with or without seconds, with a fraction
/// after a dot or a comma, and with an offset written as `Z`, `+01`,
/// `+0100` or `+01:00`. A date-time without an offset is taken as UTC, and
/// a bare date as midnight UTC.
pub fn parse_instant(raw: &str) -> Result<Instant, Error> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant);
    }
    let normalized = raw.replace(',', ".");
    if let Some(instant) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
    {
        return Ok(instant);
    }
    let utc = Utc.fix();
    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
    {
        return Ok(utc.from_utc_datetime(&naive));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| utc.from_utc_datetime(&naive))
        .ok_or_else(|| Error::InvalidInstant(raw.to_string()))
}

/// Render an instant in RFC 3339 form, using `Z` for UTC.
pub fn format_instant(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
