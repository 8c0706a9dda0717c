//! # Item Stream Error Types
//!
//! Structured error handling for adapters and the stream bridge using thiserror.
//! Lifecycle-order violations, producer failures, and configuration problems are
//! kept as distinct variants so callers can react to each without string matching.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed source error emitted by an underlying producer.
pub type ProducerError = Box<dyn StdError + Send + Sync>;

/// Errors surfaced by item-stream adapters, the push-to-pull bridge, and the
/// step-scope registry.
#[derive(Error, Debug)]
pub enum ItemStreamError {
    /// `read` was invoked before `open` materialized the underlying source.
    #[error("{what} isn't set; 'open' must be called before 'read'")]
    NotOpen { what: &'static str },

    /// `open` was invoked while the source is already open and the configured
    /// reopen policy rejects re-creation.
    #[error("source is already open; re-open is rejected by the configured reopen policy")]
    AlreadyOpen,

    /// A failure raised by the underlying source during production. The value
    /// is handed to the caller exactly as the producer emitted it: nothing is
    /// wrapped, retried, or logged on the way through.
    #[error("{0}")]
    Producer(#[source] ProducerError),

    /// A delegate deliberately does not support an optional lifecycle hook.
    #[error("lifecycle hook '{hook}' is not supported by this delegate")]
    UnsupportedLifecycle { hook: &'static str },

    /// An execution-context value could not be serialized or deserialized.
    #[error("execution context value '{key}': {message}")]
    ContextValue { key: String, message: String },

    /// Invalid adapter configuration (environment overrides, capacities).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ItemStreamError {
    /// Create a not-open error naming the missing source.
    pub fn not_open(what: &'static str) -> Self {
        Self::NotOpen { what }
    }

    /// Wrap an arbitrary source failure for transport through `read`.
    ///
    /// Accepts anything convertible into a boxed error, including plain
    /// strings for ad-hoc failures.
    pub fn producer(err: impl Into<ProducerError>) -> Self {
        Self::Producer(err.into())
    }

    /// Create an unsupported-hook error for the named lifecycle hook.
    pub fn unsupported_lifecycle(hook: &'static str) -> Self {
        Self::UnsupportedLifecycle { hook }
    }

    /// Create a context value error for the given key.
    pub fn context_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ContextValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias for item-stream operations.
pub type Result<T> = std::result::Result<T, ItemStreamError>;
