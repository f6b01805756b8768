//! In-memory notification log

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};

use super::notification::{CapturedNotification, NotificationId, RawNotification};

/// Newest-first log of captured notifications.
///
/// Entries are prepended in the order `ingest` is called, so the log order is
/// arrival order even when several entries share a timestamp. When a
/// retention bound is set, the oldest entries fall off the tail.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: VecDeque<CapturedNotification>,
    next_seq: u64,
    max_entries: Option<NonZeroUsize>,
}

impl NotificationLog {
    /// Create an empty, unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log that keeps at most `max_entries` entries
    pub fn with_capacity_limit(max_entries: NonZeroUsize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    /// Retention bound, if any
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.max_entries
    }

    /// Turn a raw event into a log entry captured now
    pub fn ingest(&mut self, raw: RawNotification) -> CapturedNotification {
        self.ingest_at(raw, Utc::now())
    }

    /// Turn a raw event into a log entry captured at `now`.
    ///
    /// Never fails: sparse events degrade to placeholder fields.
    pub fn ingest_at(&mut self, raw: RawNotification, now: DateTime<Utc>) -> CapturedNotification {
        self.next_seq += 1;
        let id = NotificationId::new(now.timestamp_millis(), self.next_seq);
        let entry = CapturedNotification::from_raw(raw, id, now);

        self.entries.push_front(entry.clone());
        if let Some(max) = self.max_entries {
            self.entries.truncate(max.get());
        }

        entry
    }

    /// Copy of the current log, newest first
    pub fn snapshot(&self) -> Vec<CapturedNotification> {
        self.entries.iter().cloned().collect()
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &CapturedNotification> {
        self.entries.iter()
    }

    /// Most recently ingested entry still retained
    pub fn latest(&self) -> Option<&CapturedNotification> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capture::notification::{PLACEHOLDER_BODY, PLACEHOLDER_TITLE};

    fn titles(log: &NotificationLog) -> Vec<String> {
        log.snapshot().iter().map(|n| n.title().to_string()).collect()
    }

    #[test]
    fn new_log_is_empty() {
        let log = NotificationLog::new();
        assert!(log.is_empty());
        assert!(log.snapshot().is_empty());
        assert!(log.latest().is_none());
        assert!(log.capacity().is_none());
    }

    #[test]
    fn snapshot_is_newest_first() {
        let mut log = NotificationLog::new();
        for title in ["A", "B", "C"] {
            log.ingest(RawNotification::new(title, "body"));
        }
        assert_eq!(titles(&log), vec!["C", "B", "A"]);
    }

    #[test]
    fn same_instant_keeps_arrival_order() {
        let mut log = NotificationLog::new();
        let now = Utc::now();
        let first = log.ingest_at(RawNotification::new("first", "x"), now);
        let second = log.ingest_at(RawNotification::new("second", "x"), now);

        assert_ne!(first.id(), second.id());
        assert_eq!(first.timestamp(), second.timestamp());
        assert!(first.id() < second.id());
        assert_eq!(titles(&log), vec!["second", "first"]);
    }

    #[test]
    fn reverse_arrival_order_for_many_events() {
        let mut log = NotificationLog::new();
        let now = Utc::now();
        for i in 0..50 {
            log.ingest_at(RawNotification::new(format!("n{i}"), "x"), now);
        }
        let expected: Vec<String> = (0..50).rev().map(|i| format!("n{i}")).collect();
        assert_eq!(titles(&log), expected);
    }

    #[test]
    fn ingest_returns_the_prepended_entry() {
        let mut log = NotificationLog::new();
        let entry = log.ingest(RawNotification::new("Hi", "there"));
        assert_eq!(log.latest(), Some(&entry));
    }

    #[test]
    fn empty_event_gets_placeholders() {
        let mut log = NotificationLog::new();
        let entry = log.ingest(RawNotification {
            title: Some(String::new()),
            body: Some(String::new()),
            source: None,
        });
        assert_eq!(entry.title(), PLACEHOLDER_TITLE);
        assert_eq!(entry.body(), PLACEHOLDER_BODY);
    }

    #[test]
    fn retention_drops_oldest() {
        let mut log = NotificationLog::with_capacity_limit(NonZeroUsize::new(2).unwrap());
        for title in ["A", "B", "C"] {
            log.ingest(RawNotification::new(title, "body"));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(titles(&log), vec!["C", "B"]);
    }

    #[test]
    fn snapshot_is_detached_from_log() {
        let mut log = NotificationLog::new();
        log.ingest(RawNotification::new("A", "x"));
        let mut snapshot = log.snapshot();
        snapshot.clear();
        assert_eq!(log.len(), 1);
    }
}
