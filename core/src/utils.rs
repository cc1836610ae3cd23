//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret so that it can be safely written into logs.
///
/// - Empty input is shown as `EMPTY`.
/// - Input shorter than 12 characters is entirely redacted.
/// - Otherwise only the first three and the last three characters are kept.
///
/// Keeping both ends lets users tell apart different access keys in debug
/// output without leaking them.
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value.as_str()))
    }
}

impl<'a> From<Option<&'a str>> for Redact<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(v) = self.0 else {
            return f.write_str("None");
        };

        // Work on chars so that non-ascii secrets never split a code point.
        let chars: Vec<char> = v.chars().collect();
        match chars.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 => f.write_str("***"),
            n => {
                let head: String = chars[..3].iter().collect();
                let tail: String = chars[n - 3..].iter().collect();
                write!(f, "{head}***{tail}")
            }
        }
    }
}
