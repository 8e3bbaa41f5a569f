//! Crate error taxonomy.
//!
//! Only configuration misuse is fatal to a call. Invalid level names fail
//! softly through boolean returns, and validity/enablement queries degrade
//! to `false`; neither surfaces here.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    /// A non-object value was passed where an options object is required.
    #[error("options must be a JSON object")]
    InvalidOptions,
    /// A dispatched operation was invoked without its required argument.
    #[error("missing argument for operation `{0}`")]
    MissingArgument(&'static str),
}
