//! Time related utils.
//!
//! SigV4 only ever deals with UTC, so everything here works on
//! `chrono::DateTime<Utc>`.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse time from RFC3339 like `2015-08-30T12:36:00Z`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| {
            Error::request_invalid(format!("parse '{s}' into rfc3339 failed")).with_source(e)
        })
}
