//! ANSI escape table for the severity scale.

use crate::level::Severity;

/// Resets all attributes; terminates every colored line.
pub const RESET: &str = "\x1b[0m";

const FATAL: &str = "\x1b[35m"; // magenta
const ERROR: &str = "\x1b[31m"; // red
const WARN: &str = "\x1b[33m"; // yellow
const INFO: &str = "\x1b[32m"; // green
const VERBOSE: &str = "\x1b[36m"; // cyan
const DEBUG: &str = "\x1b[34m"; // blue
const TRACE: &str = "\x1b[90m"; // bright black

/// Escape code opening the color for a severity. The non-loggable edge
/// levels carry no color.
pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Fatal => FATAL,
        Severity::Error => ERROR,
        Severity::Warn => WARN,
        Severity::Info => INFO,
        Severity::Verbose => VERBOSE,
        Severity::Debug => DEBUG,
        Severity::Trace => TRACE,
        Severity::All | Severity::Off => "",
    }
}
