//! String sub-classification and value-pattern tags

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Refinement of a plain string label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    Uuid,
    DateTime,
    Url,
    Id,
    Plain,
}

/// An identifier prefix and the pattern tag it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdPrefix {
    pub prefix: String,
    pub tag: String,
}

impl IdPrefix {
    pub fn new(prefix: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            tag: tag.into(),
        }
    }
}

/// Identifier prefixes recognized when none are configured
pub fn default_id_prefixes() -> Vec<IdPrefix> {
    vec![
        IdPrefix::new("req_", "REQUEST_ID"),
        IdPrefix::new("toolu_", "TOOL_USE_ID"),
        IdPrefix::new("msg_", "MESSAGE_ID"),
    ]
}

pub const TAG_UUID: &str = "UUID";
pub const TAG_ISO_DATETIME: &str = "ISO_DATETIME";
pub const TAG_URL: &str = "URL";
pub const TAG_UPPER_CASE: &str = "UPPER_CASE";
pub const TAG_LOWER_CASE: &str = "LOWER_CASE";
pub const TAG_NUMERIC_STRING: &str = "NUMERIC_STRING";

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

static UPPER_CASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z_]+$").unwrap());

static LOWER_CASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_]+$").unwrap());

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

pub fn is_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(value)
}

pub fn is_iso_datetime(value: &str) -> bool {
    DATETIME_REGEX.is_match(value)
}

pub fn is_url(value: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| value.starts_with(scheme))
}

fn matching_prefix<'p>(value: &str, prefixes: &'p [IdPrefix]) -> Option<&'p IdPrefix> {
    prefixes.iter().find(|p| value.starts_with(p.prefix.as_str()))
}

/// Classify a string into its most specific kind.
///
/// Checks run from most to least specific; the first match wins.
pub fn classify_string(value: &str, prefixes: &[IdPrefix]) -> StringKind {
    if is_uuid(value) {
        StringKind::Uuid
    } else if is_iso_datetime(value) {
        StringKind::DateTime
    } else if is_url(value) {
        StringKind::Url
    } else if matching_prefix(value, prefixes).is_some() {
        StringKind::Id
    } else {
        StringKind::Plain
    }
}

/// The value-pattern tag for a string, if any pattern is recognized
pub fn pattern_tag<'p>(value: &str, prefixes: &'p [IdPrefix]) -> Option<&'p str> {
    if is_uuid(value) {
        Some(TAG_UUID)
    } else if is_iso_datetime(value) {
        Some(TAG_ISO_DATETIME)
    } else if is_url(value) {
        Some(TAG_URL)
    } else if let Some(prefix) = matching_prefix(value, prefixes) {
        Some(prefix.tag.as_str())
    } else if UPPER_CASE_REGEX.is_match(value) {
        Some(TAG_UPPER_CASE)
    } else if LOWER_CASE_REGEX.is_match(value) {
        Some(TAG_LOWER_CASE)
    } else if NUMERIC_REGEX.is_match(value) {
        Some(TAG_NUMERIC_STRING)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_uuid() {
        let prefixes = default_id_prefixes();
        assert_eq!(
            classify_string("550e8400-e29b-41d4-a716-446655440000", &prefixes),
            StringKind::Uuid
        );
        assert_eq!(
            classify_string("550E8400-E29B-41D4-A716-446655440000", &prefixes),
            StringKind::Uuid
        );
        assert_ne!(
            classify_string("550e8400-e29b-41d4-a716", &prefixes),
            StringKind::Uuid
        );
    }

    #[test]
    fn test_detect_datetime() {
        let prefixes = default_id_prefixes();
        assert_eq!(
            classify_string("2025-07-31T17:02:24.244Z", &prefixes),
            StringKind::DateTime
        );
        assert_eq!(
            classify_string("2024-01-15T10:30:00", &prefixes),
            StringKind::DateTime
        );
        assert_eq!(
            classify_string("2024-01-15T10:30:00+05:00", &prefixes),
            StringKind::DateTime
        );
        // Date only is a plain string
        assert_eq!(classify_string("2024-01-15", &prefixes), StringKind::Plain);
    }

    #[test]
    fn test_detect_url() {
        let prefixes = default_id_prefixes();
        assert_eq!(classify_string("https://example.com", &prefixes), StringKind::Url);
        assert_eq!(classify_string("http://localhost:8080/x", &prefixes), StringKind::Url);
        assert_eq!(classify_string("ftp://files.example.com", &prefixes), StringKind::Url);
        assert_eq!(classify_string("file:///tmp/x", &prefixes), StringKind::Plain);
    }

    #[test]
    fn test_detect_id_prefixes() {
        let prefixes = default_id_prefixes();
        assert_eq!(classify_string("req_011CRf", &prefixes), StringKind::Id);
        assert_eq!(classify_string("toolu_01A", &prefixes), StringKind::Id);
        assert_eq!(classify_string("msg_abc", &prefixes), StringKind::Id);
        assert_eq!(classify_string("evt_abc", &prefixes), StringKind::Plain);

        let custom = vec![IdPrefix::new("evt_", "EVENT_ID")];
        assert_eq!(classify_string("evt_abc", &custom), StringKind::Id);
        assert_eq!(pattern_tag("evt_abc", &custom), Some("EVENT_ID"));
    }

    #[test]
    fn test_pattern_tags() {
        let prefixes = default_id_prefixes();
        assert_eq!(pattern_tag("toolu_01A", &prefixes), Some("TOOL_USE_ID"));
        assert_eq!(pattern_tag("TOOL_USE", &prefixes), Some(TAG_UPPER_CASE));
        assert_eq!(pattern_tag("assistant", &prefixes), Some(TAG_LOWER_CASE));
        assert_eq!(pattern_tag("12345", &prefixes), Some(TAG_NUMERIC_STRING));
        assert_eq!(pattern_tag("Hello world", &prefixes), None);
        assert_eq!(pattern_tag("", &prefixes), None);
    }
}
