//! Notification source replaying recorded events from JSON lines

use std::path::Path;

use tokio::fs;

use crate::application::ports::{EventSink, NotificationSource, SourceError, SourceEvent, Subscription};
use crate::domain::capture::RawNotification;

/// Replays one JSON object per line, e.g.
/// `{"title": "Build finished", "body": "All green", "source": "ci"}`.
///
/// All events are delivered in file order during `subscribe`. Blank lines
/// are skipped; lines that are not JSON objects are delivered as
/// [`SourceError::Unreadable`].
#[derive(Debug, Clone)]
pub struct ReplaySource {
    content: String,
}

impl ReplaySource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Read a JSON-lines file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::SubscribeFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(content))
    }

    fn events(&self) -> impl Iterator<Item = SourceEvent> + '_ {
        self.content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str::<RawNotification>(line)
                    .map_err(|e| SourceError::Unreadable(format!("line {}: {}", index + 1, e)))
            })
    }
}

impl NotificationSource for ReplaySource {
    fn subscribe(&self, sink: EventSink<SourceEvent>) -> Result<Subscription, SourceError> {
        for event in self.events() {
            sink(event);
        }
        Ok(Subscription::new("replay", || {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collect(source: &ReplaySource) -> Vec<SourceEvent> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink_events = Arc::clone(&events);
        let _subscription = source
            .subscribe(Arc::new(move |event| sink_events.lock().unwrap().push(event)))
            .unwrap();
        let events = events.lock().unwrap().clone();
        events
    }

    #[test]
    fn delivers_events_in_file_order() {
        let source = ReplaySource::new(
            "{\"title\":\"A\",\"body\":\"1\"}\n{\"title\":\"B\",\"source\":\"chat\"}\n",
        );
        let events = collect(&source);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Ok(RawNotification::new("A", "1")));
        assert_eq!(events[1].as_ref().unwrap().source.as_deref(), Some("chat"));
    }

    #[test]
    fn skips_blank_lines() {
        let source = ReplaySource::new("\n  \n{}\n");
        assert_eq!(collect(&source), vec![Ok(RawNotification::default())]);
    }

    #[test]
    fn unreadable_lines_report_line_number() {
        let source = ReplaySource::new("{}\nnot json\n{}");
        let events = collect(&source);

        assert_eq!(events.len(), 3);
        match &events[1] {
            Err(SourceError::Unreadable(message)) => assert!(message.starts_with("line 2")),
            other => panic!("expected unreadable event, got {:?}", other),
        }
        assert!(events[2].is_ok());
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let result = ReplaySource::from_path("/nonexistent/notif-capture/events.jsonl").await;
        assert!(matches!(result, Err(SourceError::SubscribeFailed(_))));
    }
}
