//! Shared validation helpers for inbound HTTP adapters.
//!
//! Parsing failures are recorded into a [`ValidationOutcome`] instead of
//! returning early, so a request with several bad fields reports all of them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::{FieldViolation, ValidationOutcome};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// Parse an ISO-8601 date or timestamp.
///
/// Accepts RFC 3339 (`2025-01-01T09:30:00+02:00`), a naive timestamp
/// interpreted as UTC (`2025-01-01T09:30:00`) and a bare date at midnight
/// UTC (`2025-01-01`).
pub(crate) fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a required date field, recording a violation when it is absent or
/// malformed.
pub(crate) fn require_date(
    value: Option<&str>,
    field: FieldName,
    outcome: &mut ValidationOutcome,
) -> Option<DateTime<Utc>> {
    let field = field.as_str();
    let Some(raw) = value else {
        outcome.push(FieldViolation::new(field, format!("{field} is required.")));
        return None;
    };
    let parsed = parse_iso8601(raw);
    if parsed.is_none() {
        outcome.push(FieldViolation::new(
            field,
            format!("{field} must be an ISO-8601 date or timestamp."),
        ));
    }
    parsed
}
