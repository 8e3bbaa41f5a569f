//! Logger display options and their partial-merge setter semantics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display configuration owned exclusively by one logger.
///
/// Read through [`crate::logger::Logger::options`], which returns an
/// independent copy; mutated only through the partial-merge setter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerOptions {
    /// Write rendered lines to the sink.
    pub console_enabled: bool,
    /// Suppress ANSI color codes globally.
    pub no_color: bool,
    /// Include a timestamp on every rendered line.
    pub show_date: bool,
    /// Include the call-site locator.
    pub show_info: bool,
    /// Include the level marker.
    pub show_level: bool,
    /// Literal prefix placed ahead of every rendered line.
    pub tag: Option<String>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            console_enabled: true,
            no_color: false,
            show_date: false,
            show_info: false,
            show_level: false,
            tag: None,
        }
    }
}

impl LoggerOptions {
    /// Merge a partial options object: only recognized, type-matching
    /// fields overwrite current values. Unknown or mistyped fields are
    /// silently ignored, never an error.
    pub(crate) fn merge(&mut self, patch: &Map<String, Value>) {
        if let Some(value) = patch.get("consoleEnabled").and_then(Value::as_bool) {
            self.console_enabled = value;
        }
        if let Some(value) = patch.get("noColor").and_then(Value::as_bool) {
            self.no_color = value;
        }
        if let Some(value) = patch.get("showDate").and_then(Value::as_bool) {
            self.show_date = value;
        }
        if let Some(value) = patch.get("showInfo").and_then(Value::as_bool) {
            self.show_info = value;
        }
        if let Some(value) = patch.get("showLevel").and_then(Value::as_bool) {
            self.show_level = value;
        }
        if let Some(value) = patch.get("tag").and_then(Value::as_str) {
            self.tag = Some(value.to_string());
        }
    }
}
