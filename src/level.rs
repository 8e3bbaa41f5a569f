//! The nine-step severity scale and its name/rank registry.
//!
//! Ranks are fixed: `all` (0) enables everything, `off` (8) suppresses
//! everything. A message is emitted when the logger's threshold rank is
//! numerically at or below the requested rank.

use serde_json::Value;

/// A named point on the fixed severity scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// Enables every message; never used as a message severity itself.
    All = 0,
    Trace = 1,
    Debug = 2,
    Verbose = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
    /// Suppresses all emission.
    Off = 8,
}

impl Severity {
    /// Every severity on the scale, in rank order.
    pub const ALL_LEVELS: [Severity; 9] = [
        Severity::All,
        Severity::Trace,
        Severity::Debug,
        Severity::Verbose,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Off,
    ];

    /// The seven severities that have logging operations, highest first.
    pub const LOGGABLE: [Severity; 7] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Verbose,
        Severity::Debug,
        Severity::Trace,
    ];

    /// Integer rank of this severity.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::rank`]; total over the nine fixed ranks.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::All),
            1 => Some(Self::Trace),
            2 => Some(Self::Debug),
            3 => Some(Self::Verbose),
            4 => Some(Self::Info),
            5 => Some(Self::Warn),
            6 => Some(Self::Error),
            7 => Some(Self::Fatal),
            8 => Some(Self::Off),
            _ => None,
        }
    }

    /// Exact-match lookup against the fixed nine-entry table. No partial
    /// matches, no case folding.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "verbose" => Some(Self::Verbose),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    /// Canonical name of this severity.
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Verbose => "verbose",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Off => "off",
        }
    }
}

/// True iff `value` is a JSON string naming one of the nine severities.
///
/// Type-checking is part of the contract: numbers, objects, arrays, null
/// and booleans all yield `false`, as does any unrecognized string.
pub fn is_valid_level(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|name| Severity::parse(name).is_some())
}

/// True iff both arguments are valid ranks and `current <= requested`.
///
/// Degrades to `false` for out-of-range input, never errors. The edge
/// ranks follow the same rule: a threshold of `off` (8) enables nothing
/// below rank 8, and `all` (0) is enabled under every threshold of 0.
pub fn is_enabled(current: i64, requested: i64) -> bool {
    let in_range = |rank: i64| (0..=8).contains(&rank);
    in_range(current) && in_range(requested) && current <= requested
}
