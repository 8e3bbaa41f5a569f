//! The fixed enumerable operation table.
//!
//! Hosts that expose the logger over a messaging bus bind string
//! identifiers to core operations. The table is built once per wiring,
//! not generated per access, and covers every (severity × variant) pair
//! plus the level and options operations. The bus itself stays outside
//! this crate: an adapter maps deliveries onto [`dispatch`].

use serde_json::Value;

use crate::errors::LoggerError;
use crate::level::{is_enabled, is_valid_level, Severity};
use crate::logger::{Logger, Variant};
use crate::message::Message;

/// A core operation addressable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Log(Severity, Variant),
    LevelGet,
    LevelSet,
    IsValid,
    IsEnabled,
    OptionsGet,
    OptionsSet,
}

/// Build the named-operation table. Identifiers follow
/// `<prefix>log:<severity>[:<variant>]` for the seven loggable severities,
/// plus the level/options operations; the optional prefix is prepended to
/// every identifier.
pub fn operation_table(prefix: Option<&str>) -> Vec<(String, Operation)> {
    let prefix = prefix.unwrap_or("");
    let mut table = Vec::new();
    for severity in Severity::LOGGABLE {
        for variant in Variant::ALL {
            let name = match variant.suffix() {
                None => format!("{prefix}log:{}", severity.name()),
                Some(suffix) => format!("{prefix}log:{}:{suffix}", severity.name()),
            };
            table.push((name, Operation::Log(severity, variant)));
        }
    }
    table.push((format!("{prefix}log:level:get"), Operation::LevelGet));
    table.push((format!("{prefix}log:level:set"), Operation::LevelSet));
    table.push((format!("{prefix}log:level:is:valid"), Operation::IsValid));
    table.push((
        format!("{prefix}log:level:is:enabled"),
        Operation::IsEnabled,
    ));
    table.push((format!("{prefix}log:options:get"), Operation::OptionsGet));
    table.push((format!("{prefix}log:options:set"), Operation::OptionsSet));
    table
}

/// Apply a named operation to a logger with bus-shaped JSON arguments.
///
/// Log operations return the rendered string (or null below threshold),
/// queries return their natural JSON forms. Malformed query arguments
/// degrade to `false`; only a bad options object is an error.
pub fn dispatch(
    logger: &mut Logger,
    operation: Operation,
    args: &[Value],
) -> Result<Value, LoggerError> {
    match operation {
        Operation::Log(severity, variant) => {
            let messages: Vec<Message> = args.iter().cloned().map(Message::from).collect();
            Ok(logger
                .log(severity, variant, &messages)
                .map(Value::String)
                .unwrap_or(Value::Null))
        }
        Operation::LevelGet => Ok(Value::String(logger.get_level().to_string())),
        Operation::LevelSet => {
            let name = args.first().and_then(Value::as_str).unwrap_or("");
            Ok(Value::Bool(logger.set_level(name)))
        }
        Operation::IsValid => Ok(Value::Bool(
            args.first().map(is_valid_level).unwrap_or(false),
        )),
        Operation::IsEnabled => {
            let current = args.first().and_then(Value::as_i64);
            let requested = args.get(1).and_then(Value::as_i64);
            let enabled = match (current, requested) {
                (Some(current), Some(requested)) => is_enabled(current, requested),
                _ => false,
            };
            Ok(Value::Bool(enabled))
        }
        Operation::OptionsGet => {
            serde_json::to_value(logger.options()).map_err(|_| LoggerError::InvalidOptions)
        }
        Operation::OptionsSet => {
            let patch = args
                .first()
                .ok_or(LoggerError::MissingArgument("log:options:set"))?;
            logger.set_options(patch)?;
            Ok(Value::Bool(true))
        }
    }
}
