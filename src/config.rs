use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ItemStreamError, Result};

/// Policy applied when `open` is called while a source is already open.
///
/// The default is [`ReopenPolicy::Recreate`]: silently build a fresh source
/// and discard any unread items from the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReopenPolicy {
    /// Re-create the source, discarding unread items from the prior cycle.
    #[default]
    Recreate,
    /// Fail the second `open` with `AlreadyOpen`, leaving the cycle intact.
    Reject,
}

impl fmt::Display for ReopenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recreate => write!(f, "recreate"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for ReopenPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "recreate" => Ok(Self::Recreate),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Invalid reopen policy: {s}")),
        }
    }
}

/// Largest handoff capacity the bridge's bounded channel accepts.
pub const MAX_HANDOFF_CAPACITY: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Configuration shared by the source-materializing adapters.
///
/// `handoff_capacity` bounds the producer-to-consumer channel of the stream
/// bridge; the default of 1 is a single-slot handoff, so an asynchronous
/// producer can never race more than one item ahead of the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub handoff_capacity: usize,
    pub reopen_policy: ReopenPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            handoff_capacity: 1,
            reopen_policy: ReopenPolicy::default(),
        }
    }
}

impl AdapterConfig {
    /// Build a config from defaults overridden by `ITEMSTREAM_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(capacity) = std::env::var("ITEMSTREAM_HANDOFF_CAPACITY") {
            config.handoff_capacity = capacity.parse().map_err(|e| {
                ItemStreamError::configuration(format!("Invalid handoff_capacity: {e}"))
            })?;
        }

        if let Ok(policy) = std::env::var("ITEMSTREAM_REOPEN_POLICY") {
            config.reopen_policy = policy.parse().map_err(|e| {
                ItemStreamError::configuration(format!("Invalid reopen_policy: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the bridge cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.handoff_capacity == 0 {
            return Err(ItemStreamError::configuration(
                "handoff_capacity must be at least 1",
            ));
        }
        if self.handoff_capacity > MAX_HANDOFF_CAPACITY {
            return Err(ItemStreamError::configuration(format!(
                "handoff_capacity must not exceed {MAX_HANDOFF_CAPACITY}"
            )));
        }
        Ok(())
    }
}
