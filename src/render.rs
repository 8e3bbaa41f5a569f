//! Rendering helpers: the timestamp form and per-message rendering.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde_json::Value;

use crate::callsite::CallSiteResolver;
use crate::message::Message;

/// Current local time as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Every field is
/// zero-padded except the milliseconds.
pub(crate) fn local_timestamp() -> String {
    format_timestamp(&Local::now())
}

pub(crate) fn format_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{}Z",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.timestamp_subsec_millis(),
    )
}

/// Render one message value for the decorated pipeline.
///
/// Failures become `"<message>\n<trace-remainder>"`, composite values are
/// serialized (pretty unless `compact`), text passes through unchanged.
pub(crate) fn render_message(
    message: &Message,
    compact: bool,
    resolver: &CallSiteResolver,
) -> String {
    match message {
        Message::Text(text) => text.clone(),
        Message::Data(value) => serialize_value(value, compact),
        Message::Failure { message, stack } => {
            let site = resolver.resolve(stack.as_deref());
            format!("{message}\n{}", site.remainder)
        }
    }
}

fn serialize_value(value: &Value, compact: bool) -> String {
    if compact {
        value.to_string()
    } else {
        // Pretty-printing a tree-shaped Value cannot fail; fall back to the
        // compact form rather than propagate if it ever does.
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
