use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an adapted stream or its bridge.
///
/// Transitions: `Unopened → Open` on `open`, `Open → Closed` on `close`.
/// A new `open` after `close` starts a fresh open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamState {
    /// No source has been materialized yet.
    Unopened,
    /// The source is materialized and reads are valid.
    Open,
    /// The source was released; reads are a caller error.
    Closed,
}

impl StreamState {
    /// Check if reads are currently valid.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Check if the source was released.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Check if a close hook still has to run for the current cycle.
    pub fn needs_close_hook(&self) -> bool {
        !self.is_closed()
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unopened => write!(f, "unopened"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for StreamState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unopened" => Ok(Self::Unopened),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid stream state: {s}")),
        }
    }
}
