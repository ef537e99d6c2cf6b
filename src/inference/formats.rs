//! Format detection for string values

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Detected string format
///
/// Purely advisory to the renderers: the declaration renderer maps
/// `DateTime` to a temporal type, everything else stays a plain string;
/// the validation-document renderer emits it as the `format` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// ISO 8601 date-time (YYYY-MM-DDTHH:MM:SS)
    DateTime,
    /// Email address
    Email,
    /// UUID/GUID
    Uuid,
    /// Binary payload (from declared binary columns, not detected)
    Binary,
}

impl Format {
    /// Get the JSON Schema format string for this format
    pub fn as_json_schema_format(&self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Email => "email",
            Format::Uuid => "uuid",
            Format::Binary => "binary",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_json_schema_format())
    }
}

// Regex patterns for format detection
static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

/// Detect the format of a string value
///
/// Returns the most specific format that matches, or `None` for plain
/// strings. Checks are ordered from most specific to least specific.
pub fn detect_format(value: &str) -> Option<Format> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // UUID is very specific
    if UUID_REGEX.is_match(value) {
        return Some(Format::Uuid);
    }

    if DATETIME_REGEX.is_match(value) {
        return Some(Format::DateTime);
    }

    if EMAIL_REGEX.is_match(value) {
        return Some(Format::Email);
    }

    None
}
