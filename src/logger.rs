//! The format/output engine: threshold gating, decoration, and emission.

use regex::Regex;
use serde_json::Value;

use crate::callsite::{CallSiteResolver, StackFilter};
use crate::color::{severity_color, RESET};
use crate::errors::LoggerError;
use crate::level::{is_enabled, Severity};
use crate::message::Message;
use crate::options::LoggerOptions;
use crate::render::{local_timestamp, render_message};
use crate::sink::{ConsoleSink, Sink};

/// Display-mode modifier applied independently of severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Full decoration, pretty-printed composite values.
    Normal,
    /// Composite values serialized without indentation.
    Compact,
    /// ANSI color suppressed even when globally enabled.
    NoColor,
    /// No decoration at all: the sink receives the undecorated message text.
    Raw,
    /// Timestamp forced on regardless of `showDate`.
    Time,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Normal,
        Variant::Compact,
        Variant::NoColor,
        Variant::Raw,
        Variant::Time,
    ];

    /// Identifier suffix in the named-operation table; `None` for normal.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Compact => Some("compact"),
            Self::NoColor => Some("nocolor"),
            Self::Raw => Some("raw"),
            Self::Time => Some("time"),
        }
    }
}

/// A leveled, ANSI-color-coded logger.
///
/// One logger exclusively owns its state; render operations take `&self`
/// and complete synchronously, configuration changes take `&mut self`.
/// Multiple loggers are fully independent.
pub struct Logger {
    threshold: Severity,
    options: LoggerOptions,
    sink: Box<dyn Sink>,
    resolver: CallSiteResolver,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger with default options writing to stdout, threshold `info`.
    pub fn new() -> Self {
        Self::with_sink(Box::new(ConsoleSink::new()))
    }

    /// Logger writing to the given sink.
    pub fn with_sink(sink: Box<dyn Sink>) -> Self {
        Self {
            threshold: Severity::Info,
            options: LoggerOptions::default(),
            sink,
            resolver: CallSiteResolver::new(),
        }
    }

    /// Inject the optional stack-filtering collaborator.
    pub fn set_stack_filter(&mut self, filter: Box<dyn StackFilter>) {
        self.resolver.set_filter(filter);
    }

    /// Replace the pattern identifying the engine's own stack frames. An
    /// injected stack filter stays in place.
    pub fn set_self_pattern(&mut self, pattern: Regex) {
        self.resolver.set_self_pattern(pattern);
    }

    /// Canonical name of the current threshold.
    pub fn get_level(&self) -> &'static str {
        self.threshold.name()
    }

    /// Set the threshold by name. An unrecognized name fails softly: a
    /// diagnostic naming the offending value is written to the sink, the
    /// previous threshold stays in effect, and `false` is returned.
    pub fn set_level(&mut self, name: &str) -> bool {
        match Severity::parse(name) {
            Some(severity) => {
                self.threshold = severity;
                true
            }
            None => {
                self.sink
                    .write_line(&format!("chromalog: unknown log level {name:?}"));
                false
            }
        }
    }

    /// Independent copy of the current options. Mutating the returned value
    /// never affects the logger.
    pub fn options(&self) -> LoggerOptions {
        self.options.clone()
    }

    /// Merge a partial options object. Only recognized, type-matching
    /// fields overwrite; a non-object value is an [`LoggerError::InvalidOptions`].
    pub fn set_options(&mut self, patch: &Value) -> Result<(), LoggerError> {
        let object = patch.as_object().ok_or(LoggerError::InvalidOptions)?;
        self.options.merge(object);
        Ok(())
    }

    /// True iff a message at `severity` would currently be emitted.
    pub fn enabled_for(&self, severity: Severity) -> bool {
        is_enabled(i64::from(self.threshold.rank()), i64::from(severity.rank()))
    }

    pub fn fatal<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Fatal, Variant::Normal, messages)
    }

    pub fn error<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Error, Variant::Normal, messages)
    }

    pub fn warn<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Warn, Variant::Normal, messages)
    }

    pub fn info<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Info, Variant::Normal, messages)
    }

    pub fn verbose<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Verbose, Variant::Normal, messages)
    }

    pub fn debug<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Debug, Variant::Normal, messages)
    }

    pub fn trace<I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log_iter(Severity::Trace, Variant::Normal, messages)
    }

    /// Render and emit under an explicit severity and variant.
    ///
    /// Returns the rendered string, or `None` when the severity is below
    /// the threshold, in which case no formatting work happens and the
    /// sink is untouched.
    pub fn log(&self, severity: Severity, variant: Variant, messages: &[Message]) -> Option<String> {
        if !self.enabled_for(severity) {
            return None;
        }
        let rendered = match variant {
            Variant::Raw => self.render_raw(messages),
            _ => self.render_decorated(severity, variant, messages),
        };
        if self.options.console_enabled {
            self.sink.write_line(&rendered);
        }
        Some(rendered)
    }

    fn log_iter<I>(&self, severity: Severity, variant: Variant, messages: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        // The threshold gate runs before the arguments are even collected.
        if !self.enabled_for(severity) {
            return None;
        }
        let messages: Vec<Message> = messages.into_iter().map(Into::into).collect();
        self.log(severity, variant, &messages)
    }

    /// Raw mode: no decoration, no serialization, just the natural text of
    /// each message.
    fn render_raw(&self, messages: &[Message]) -> String {
        messages
            .iter()
            .map(Message::natural_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_decorated(
        &self,
        severity: Severity,
        variant: Variant,
        messages: &[Message],
    ) -> String {
        let compact = variant == Variant::Compact;
        let body = messages
            .iter()
            .map(|message| render_message(message, compact, &self.resolver))
            .collect::<Vec<_>>()
            .join("\n");

        let color = severity_color(severity);
        let colored =
            !self.options.no_color && variant != Variant::NoColor && !color.is_empty();

        // The resolver runs at most once per render.
        let site = if self.options.show_info || severity == Severity::Trace {
            Some(self.resolver.resolve(None))
        } else {
            None
        };

        // Fixed order: color, tag, marker, timestamp, locator, body,
        // trace suffix, reset.
        let mut out = String::new();
        if colored {
            out.push_str(color);
        }
        if let Some(tag) = self.options.tag.as_deref() {
            if !tag.is_empty() {
                out.push_str(tag);
                out.push(' ');
            }
        }
        if self.options.show_level {
            out.push_str(&format!("[{}] ", severity.name().to_uppercase()));
        }
        if variant == Variant::Time || self.options.show_date {
            out.push_str(&local_timestamp());
            out.push(' ');
        }
        if self.options.show_info {
            if let Some(site) = &site {
                out.push_str(&format!("[{}] ", site.locator));
            }
        }
        out.push_str(&body);
        if severity == Severity::Trace {
            if let Some(site) = &site {
                out.push('\n');
                out.push_str(&site.remainder);
                out.push('\n');
            }
        }
        if colored {
            out.push_str(RESET);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::rc::Rc;

    fn captured_logger() -> (Logger, Rc<MemorySink>) {
        let sink = Rc::new(MemorySink::new());
        let logger = Logger::with_sink(Box::new(Rc::clone(&sink)));
        (logger, sink)
    }

    #[test]
    fn test_below_threshold_returns_none_without_write() {
        let (logger, sink) = captured_logger();
        assert_eq!(logger.debug(["hidden"]), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_at_and_above_threshold_render_and_write() {
        let (logger, sink) = captured_logger();
        assert!(logger.info(["at threshold"]).is_some());
        assert!(logger.error(["above threshold"]).is_some());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_rendered_line_is_color_wrapped() {
        let (logger, _sink) = captured_logger();
        let line = logger.warn(["caution"]).expect("enabled");
        assert!(line.starts_with("\x1b[33m"));
        assert!(line.ends_with(color::RESET));
        assert!(line.contains("caution"));
    }

    #[test]
    fn test_messages_joined_with_newlines() {
        let (logger, _sink) = captured_logger();
        let line = logger.warn(["one", "two"]).expect("enabled");
        assert!(line.contains("one\ntwo"));
    }

    #[test]
    fn test_global_no_color_option() {
        let (mut logger, _sink) = captured_logger();
        logger
            .set_options(&json!({"noColor": true}))
            .expect("object patch");
        let line = logger.warn(["plain"]).expect("enabled");
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_no_color_variant_overrides_global_color() {
        let (logger, _sink) = captured_logger();
        let line = logger
            .log(Severity::Warn, Variant::NoColor, &["plain".into()])
            .expect("enabled");
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_compact_variant_serializes_unindented() {
        let (logger, _sink) = captured_logger();
        let messages = [Message::Data(json!({"k": "v"}))];
        let normal = logger
            .log(Severity::Warn, Variant::Normal, &messages)
            .expect("enabled");
        let compact = logger
            .log(Severity::Warn, Variant::Compact, &messages)
            .expect("enabled");
        assert!(normal.contains("\n  \"k\""));
        assert!(compact.contains(r#"{"k":"v"}"#));
    }

    #[test]
    fn test_raw_variant_skips_decoration_and_serialization() {
        let (mut logger, sink) = captured_logger();
        logger
            .set_options(&json!({"showLevel": true, "showDate": true, "tag": "[t]"}))
            .expect("object patch");
        let line = logger
            .log(
                Severity::Warn,
                Variant::Raw,
                &["note".into(), Message::Data(json!({"k": 1}))],
            )
            .expect("enabled");
        assert_eq!(line, r#"note {"k":1}"#);
        assert_eq!(sink.lines(), vec![line]);
    }

    #[test]
    fn test_raw_variant_still_gated_by_threshold() {
        let (logger, sink) = captured_logger();
        assert_eq!(
            logger.log(Severity::Debug, Variant::Raw, &["hidden".into()]),
            None
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_time_variant_forces_timestamp() {
        let (logger, _sink) = captured_logger();
        let line = logger
            .log(Severity::Warn, Variant::Time, &["stamped".into()])
            .expect("enabled");
        // Strip the color prefix, then expect a YYYY-MM-DDT.. shape.
        let stripped = line.trim_start_matches("\x1b[33m");
        assert_eq!(&stripped[4..5], "-");
        assert_eq!(&stripped[10..11], "T");
        assert!(stripped.contains("Z "));
    }

    #[test]
    fn test_tag_and_level_marker_order() {
        let (mut logger, _sink) = captured_logger();
        logger
            .set_options(&json!({"showLevel": true, "tag": "[svc]", "noColor": true}))
            .expect("object patch");
        let line = logger.error(["oops"]).expect("enabled");
        assert_eq!(line, "[svc] [ERROR] oops");
    }

    #[test]
    fn test_empty_tag_is_not_rendered() {
        let (mut logger, _sink) = captured_logger();
        logger
            .set_options(&json!({"tag": "", "noColor": true}))
            .expect("object patch");
        assert_eq!(logger.warn(["bare"]).as_deref(), Some("bare"));
    }

    #[test]
    fn test_show_info_includes_bracketed_locator() {
        let (mut logger, _sink) = captured_logger();
        logger
            .set_options(&json!({"showInfo": true, "noColor": true}))
            .expect("object patch");
        let line = logger.warn(["where am i"]).expect("enabled");
        assert!(line.starts_with('['));
        assert!(line.ends_with("where am i"));
    }

    #[test]
    fn test_console_disabled_still_returns_rendered_string() {
        let (mut logger, sink) = captured_logger();
        logger
            .set_options(&json!({"consoleEnabled": false}))
            .expect("object patch");
        assert!(logger.warn(["quiet"]).is_some());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_set_level_valid() {
        let (mut logger, sink) = captured_logger();
        assert!(logger.set_level("trace"));
        assert_eq!(logger.get_level(), "trace");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_set_level_invalid_fails_softly() {
        let (mut logger, sink) = captured_logger();
        assert!(!logger.set_level("loudest"));
        assert_eq!(logger.get_level(), "info");
        let diagnostics = sink.lines();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("loudest"));
    }

    #[test]
    fn test_off_threshold_suppresses_everything() {
        let (mut logger, sink) = captured_logger();
        assert!(logger.set_level("off"));
        sink.clear();
        assert_eq!(logger.fatal(["unreachable"]), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_all_threshold_enables_everything() {
        let (mut logger, _sink) = captured_logger();
        assert!(logger.set_level("all"));
        assert!(logger.trace(["fine-grained"]).is_some());
    }

    #[test]
    fn test_set_options_rejects_non_object() {
        let (mut logger, _sink) = captured_logger();
        assert_eq!(
            logger.set_options(&json!("noColor")),
            Err(LoggerError::InvalidOptions)
        );
        assert_eq!(logger.set_options(&json!(3)), Err(LoggerError::InvalidOptions));
        assert_eq!(
            logger.set_options(&json!(null)),
            Err(LoggerError::InvalidOptions)
        );
    }

    #[test]
    fn test_options_getter_returns_independent_copies() {
        let (logger, _sink) = captured_logger();
        let mut first = logger.options();
        let second = logger.options();
        assert_eq!(first, second);
        first.no_color = true;
        assert!(!logger.options().no_color);
    }

    #[test]
    fn test_trace_appends_stack_remainder() {
        let (mut logger, _sink) = captured_logger();
        assert!(logger.set_level("trace"));
        let line = logger.trace(["tracing"]).expect("enabled");
        let stripped = line
            .trim_start_matches("\x1b[90m")
            .trim_end_matches(color::RESET);
        assert!(stripped.starts_with("tracing\n"));
        assert!(stripped.len() > "tracing\n".len());
    }

    struct FixedLocatorFilter;

    impl crate::callsite::StackFilter for FixedLocatorFilter {
        fn filter(&self, _stack: &str) -> anyhow::Result<crate::callsite::CallSite> {
            Ok(crate::callsite::CallSite {
                locator: "collab.rs:1:1".to_string(),
                remainder: String::new(),
            })
        }
    }

    #[test]
    fn test_stack_filter_survives_self_pattern_change() {
        let (mut logger, _sink) = captured_logger();
        logger
            .set_options(&json!({"showInfo": true, "noColor": true}))
            .expect("object patch");
        logger.set_stack_filter(Box::new(FixedLocatorFilter));
        let before = logger.warn(["first"]).expect("enabled");
        assert!(before.starts_with("[collab.rs:1:1]"));

        logger.set_self_pattern(Regex::new(r"elsewhere").expect("valid regex"));
        let after = logger.warn(["second"]).expect("enabled");
        assert!(after.starts_with("[collab.rs:1:1]"));
    }

    #[test]
    fn test_failure_message_renders_with_trace_block() {
        let (logger, _sink) = captured_logger();
        let stack = "   0: myapp::boom\n             at ./src/boom.rs:5:9\n   1: myapp::main\n             at ./src/main.rs:3:1";
        let line = logger
            .warn([Message::failure("exploded", stack)])
            .expect("enabled");
        assert!(line.contains("exploded\n"));
        assert!(line.contains("main.rs:3:1"));
    }
}
