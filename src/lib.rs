//! chromalog: a leveled, ANSI-color-coded text logger.
//!
//! Messages pass a numeric severity threshold, then flow through a
//! decoration pipeline (color, tag, level marker, timestamp, call-site)
//! before being written to a pluggable sink and returned to the caller.
//! Four display variants modify the pipeline per call: compact, no-color,
//! raw, and timed.
//!
//! ```
//! use chromalog::Logger;
//!
//! let logger = Logger::new();
//! let line = logger.warn(["disk almost full"]);
//! assert!(line.is_some());
//! assert_eq!(logger.debug(["below the default threshold"]), None);
//! ```

pub mod callsite;
pub mod color;
pub mod errors;
pub mod level;
pub mod logger;
pub mod message;
pub mod ops;
pub mod options;
mod render;
pub mod sink;

pub use crate::callsite::{CallSite, CallSiteResolver, StackFilter, NO_STACK_TRACE};
pub use crate::errors::LoggerError;
pub use crate::level::{is_enabled, is_valid_level, Severity};
pub use crate::logger::{Logger, Variant};
pub use crate::message::Message;
pub use crate::ops::{dispatch, operation_table, Operation};
pub use crate::options::LoggerOptions;
pub use crate::sink::{ConsoleSink, MemorySink, Sink};
