//! Parser for `dbus-monitor` output of `org.freedesktop.Notifications.Notify`
//!
//! A Notify method call is printed as a header line followed by one argument
//! per line:
//!
//! ```text
//! method call time=1700000000.1 sender=:1.45 -> destination=:1.12 serial=7 path=/org/freedesktop/Notifications; interface=org.freedesktop.Notifications; member=Notify
//!    string "notify-send"
//!    uint32 0
//!    string ""
//!    string "Summary"
//!    string "Body"
//!    array [
//!    ]
//! ```
//!
//! The first five arguments are app_name, replaces_id, app_icon, summary
//! and body. String values are printed unescaped and may span several lines,
//! so a value only ends where the next argument line or header begins.

use crate::domain::capture::RawNotification;

const NOTIFY_ARGS: usize = 5;
const APP_NAME: usize = 0;
const SUMMARY: usize = 3;
const BODY: usize = 4;

/// Indentation of top-level arguments in dbus-monitor output
const ARG_INDENT: &str = "   ";

/// Type prefixes that open an argument line
const ARG_PREFIXES: &[&str] = &[
    "string \"",
    "uint32 ",
    "int32 ",
    "boolean ",
    "byte ",
    "double ",
    "array [",
    "dict entry(",
    "variant ",
    "object path \"",
];

#[derive(Debug, Default)]
enum ParseState {
    #[default]
    Idle,
    InCall {
        args: Vec<String>,
        /// String value still open, without its leading quote
        pending: Option<String>,
    },
}

/// Line-oriented state machine turning monitor output into raw notifications
#[derive(Debug, Default)]
pub struct NotifyParser {
    state: ParseState,
}

impl NotifyParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one output line; returns a notification once a Notify call's
    /// arguments are complete.
    pub fn push_line(&mut self, line: &str) -> Option<RawNotification> {
        if is_header(line) {
            let finished = self.finish();
            if line.starts_with("method call") && line.contains("member=Notify") {
                self.state = ParseState::InCall {
                    args: Vec::new(),
                    pending: None,
                };
            }
            return finished;
        }

        let ParseState::InCall { args, pending } = &mut self.state else {
            return None;
        };

        if !is_arg_line(line) {
            if let Some(value) = pending {
                value.push('\n');
                value.push_str(line);
            }
            return None;
        }

        if let Some(value) = pending.take() {
            args.push(close_string(value));
        }

        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("string \"") {
            *pending = Some(rest.to_string());
        } else if let Some(rest) = trimmed.strip_prefix("uint32 ") {
            args.push(rest.trim().to_string());
        } else {
            // Any other argument ends the fields we read
            args.push(String::new());
        }

        self.complete()
    }

    /// Flush a call whose last value is still open, e.g. at end of output
    pub fn finish(&mut self) -> Option<RawNotification> {
        if let ParseState::InCall { args, pending } = &mut self.state {
            if let Some(value) = pending.take() {
                args.push(close_string(value));
            }
        }
        let result = self.complete();
        self.state = ParseState::Idle;
        result
    }

    fn complete(&mut self) -> Option<RawNotification> {
        let ParseState::InCall { args, .. } = &self.state else {
            return None;
        };
        if args.len() < NOTIFY_ARGS {
            return None;
        }

        let ParseState::InCall { mut args, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        args.truncate(NOTIFY_ARGS);
        let body = args.swap_remove(BODY);
        let title = args.swap_remove(SUMMARY);
        let source = args.swap_remove(APP_NAME);

        Some(RawNotification {
            title: Some(title),
            body: Some(body),
            source: Some(source),
        })
    }
}

fn is_header(line: &str) -> bool {
    ["method call ", "method return ", "signal ", "error "]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn is_arg_line(line: &str) -> bool {
    line.strip_prefix(ARG_INDENT)
        .map(str::trim_start)
        .is_some_and(|rest| ARG_PREFIXES.iter().any(|prefix| rest.starts_with(prefix)))
}

/// Drop the closing quote dbus-monitor prints after a string value
fn close_string(mut value: String) -> String {
    if value.ends_with('"') {
        value.pop();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "method call time=1700000000.123 sender=:1.45 -> destination=:1.12 serial=7 path=/org/freedesktop/Notifications; interface=org.freedesktop.Notifications; member=Notify";

    fn parse(lines: &[&str]) -> Vec<RawNotification> {
        let mut parser = NotifyParser::new();
        let mut parsed: Vec<_> = lines.iter().filter_map(|line| parser.push_line(line)).collect();
        parsed.extend(parser.finish());
        parsed
    }

    #[test]
    fn parses_single_notify_call() {
        let parsed = parse(&[
            HEADER,
            "   string \"notify-send\"",
            "   uint32 0",
            "   string \"\"",
            "   string \"Hello\"",
            "   string \"World\"",
            "   array [",
            "   ]",
            "   int32 -1",
        ]);

        assert_eq!(
            parsed,
            vec![RawNotification::new("Hello", "World").with_source("notify-send")]
        );
    }

    #[test]
    fn parses_multiline_body() {
        let parsed = parse(&[
            HEADER,
            "   string \"Mail\"",
            "   uint32 3",
            "   string \"mail-icon\"",
            "   string \"New message\"",
            "   string \"first line",
            "second line\"",
            "   array [",
        ]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].body.as_deref(), Some("first line\nsecond line"));
        assert_eq!(parsed[0].title.as_deref(), Some("New message"));
    }

    #[test]
    fn empty_strings_are_kept_for_ingestion_to_replace() {
        let parsed = parse(&[
            HEADER,
            "   string \"\"",
            "   uint32 0",
            "   string \"\"",
            "   string \"\"",
            "   string \"\"",
        ]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title.as_deref(), Some(""));
    }

    #[test]
    fn ignores_other_messages() {
        let parsed = parse(&[
            "signal time=1700000000.0 sender=org.freedesktop.DBus -> destination=:1.99 serial=2 path=/org/freedesktop/DBus; interface=org.freedesktop.DBus; member=NameAcquired",
            "   string \":1.99\"",
            "method return time=1700000000.2 sender=:1.12 -> destination=:1.45 serial=8 reply_serial=7",
            "   uint32 42",
        ]);
        assert!(parsed.is_empty());
    }

    #[test]
    fn incomplete_call_is_dropped_at_next_header() {
        let parsed = parse(&[
            HEADER,
            "   string \"app\"",
            "   uint32 0",
            HEADER,
            "   string \"app\"",
            "   uint32 0",
            "   string \"\"",
            "   string \"Second\"",
            "   string \"Body\"",
        ]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title.as_deref(), Some("Second"));
    }

    #[test]
    fn consecutive_calls_parse_in_order() {
        let mut lines = Vec::new();
        for title in ["A", "B"] {
            lines.push(HEADER.to_string());
            lines.push("   string \"app\"".to_string());
            lines.push("   uint32 0".to_string());
            lines.push("   string \"\"".to_string());
            lines.push(format!("   string \"{title}\""));
            lines.push("   string \"x\"".to_string());
        }
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let titles: Vec<_> = parse(&refs).into_iter().filter_map(|n| n.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn quote_ending_an_inner_body_line_stays_in_the_body() {
        let parsed = parse(&[
            HEADER,
            "   string \"chat\"",
            "   uint32 0",
            "   string \"\"",
            "   string \"Alice\"",
            "   string \"she said \"hi\"",
            "see you\"",
            "   array [",
            "   ]",
        ]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].body.as_deref(), Some("she said \"hi\"\nsee you"));
    }

    #[test]
    fn multiline_title_with_quoted_line_end() {
        let parsed = parse(&[
            HEADER,
            "   string \"chat\"",
            "   uint32 0",
            "   string \"\"",
            "   string \"Re: \"plans\"",
            "for friday\"",
            "   string \"ok\"",
            "   array [",
        ]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title.as_deref(), Some("Re: \"plans\"\nfor friday"));
        assert_eq!(parsed[0].body.as_deref(), Some("ok"));
    }

    #[test]
    fn open_body_is_flushed_at_end_of_output() {
        let mut parser = NotifyParser::new();
        for line in [HEADER, "   string \"a\"", "   uint32 0", "   string \"\"", "   string \"T\""] {
            assert!(parser.push_line(line).is_none());
        }
        assert!(parser.push_line("   string \"last\"").is_none());

        let flushed = parser.finish().expect("pending call flushed");
        assert_eq!(flushed.body.as_deref(), Some("last"));
        assert!(parser.finish().is_none());
    }
}
