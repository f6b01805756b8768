//! Captured notification value objects

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Title used when the source event carries none
pub const PLACEHOLDER_TITLE: &str = "No Title";

/// Body used when the source event carries none
pub const PLACEHOLDER_BODY: &str = "No Content";

/// Notification as delivered by a source, before ingestion.
///
/// Every field is optional: sources report whatever they managed to extract
/// and ingestion fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawNotification {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, alias = "package_name", alias = "app_name")]
    pub source: Option<String>,
}

impl RawNotification {
    /// Create a raw notification with title and body
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            source: None,
        }
    }

    /// Attach an origin-application identifier
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Identity of a captured notification.
///
/// Capture time alone is not unique (two events can land in the same
/// millisecond), so the log pairs it with its own arrival sequence number.
/// Ordering follows arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId {
    seq: u64,
    millis: i64,
}

impl NotificationId {
    pub(crate) const fn new(millis: i64, seq: u64) -> Self {
        Self { seq, millis }
    }

    /// Capture time in milliseconds since the Unix epoch
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// Arrival sequence number within the owning log
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.seq)
    }
}

/// One observed external notification. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedNotification {
    id: NotificationId,
    title: String,
    body: String,
    timestamp: DateTime<Utc>,
    source: Option<String>,
}

impl CapturedNotification {
    /// Build an entry from a raw event, applying placeholder fallbacks
    pub(crate) fn from_raw(raw: RawNotification, id: NotificationId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            title: non_blank(raw.title).unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            body: non_blank(raw.body).unwrap_or_else(|| PLACEHOLDER_BODY.to_string()),
            timestamp,
            source: non_blank(raw.source),
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Capture time, assigned at ingestion
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Origin application, if the source reported one
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(raw: RawNotification) -> CapturedNotification {
        CapturedNotification::from_raw(raw, NotificationId::new(1_700_000_000_000, 1), Utc::now())
    }

    #[test]
    fn keeps_fields_when_present() {
        let entry = capture(RawNotification::new("Hello", "World").with_source("org.mail"));
        assert_eq!(entry.title(), "Hello");
        assert_eq!(entry.body(), "World");
        assert_eq!(entry.source(), Some("org.mail"));
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let entry = capture(RawNotification::default());
        assert_eq!(entry.title(), PLACEHOLDER_TITLE);
        assert_eq!(entry.body(), PLACEHOLDER_BODY);
        assert!(entry.source().is_none());
    }

    #[test]
    fn empty_strings_use_placeholders() {
        let entry = capture(RawNotification::new("", "   ").with_source(""));
        assert_eq!(entry.title(), PLACEHOLDER_TITLE);
        assert_eq!(entry.body(), PLACEHOLDER_BODY);
        assert!(entry.source().is_none());
    }

    #[test]
    fn id_display() {
        let id = NotificationId::new(1_700_000_000_123, 7);
        assert_eq!(id.to_string(), "1700000000123-7");
    }

    #[test]
    fn ids_order_by_arrival_not_time() {
        let earlier_arrival = NotificationId::new(2_000, 1);
        let later_arrival = NotificationId::new(1_000, 2);
        assert!(earlier_arrival < later_arrival);
    }

    #[test]
    fn raw_deserializes_sparse_json() {
        let raw: RawNotification = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert_eq!(raw.title, Some("A".to_string()));
        assert!(raw.body.is_none());
        assert!(raw.source.is_none());
    }

    #[test]
    fn raw_accepts_package_name_alias() {
        let raw: RawNotification =
            serde_json::from_str(r#"{"body":"B","package_name":"com.chat"}"#).unwrap();
        assert_eq!(raw.source, Some("com.chat".to_string()));
    }
}
