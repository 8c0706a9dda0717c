//! # Push-to-Pull Stream Bridge
//!
//! Converts a push-style, possibly asynchronous producer stream into a
//! strictly sequential "pull one item or signal the end" contract.
//!
//! ## Architecture
//!
//! On attach, the producer stream is moved onto its own tokio task, which
//! forwards every element through a bounded mpsc channel. The channel
//! capacity (1 by default) is the handoff window: a producer running on its
//! own timeline can never buffer more than the configured number of items
//! ahead of the consumer. `next` awaits exactly one element per call, so the
//! consumer observes the producer's emission order with nothing lost or
//! duplicated.
//!
//! Completion latches: once the producer finishes, every further `next`
//! returns `Ok(None)` without re-entering the source. An error emitted by the
//! producer is terminal for the cycle; it is surfaced to exactly one `next`
//! call unchanged, the producer is stopped, and subsequent calls return the
//! end sentinel.
//!
//! Detaching aborts the producer task so resources held by a producer that
//! has not finished (file handles, connections) are released promptly. The
//! same cancellation runs on drop.
//!
//! ## Usage
//!
//! ```rust
//! use futures::{stream, StreamExt};
//! use itemstream::adapter::bridge::StreamBridge;
//!
//! # tokio_test::block_on(async {
//! let mut bridge = StreamBridge::new();
//! bridge.attach(stream::iter([Ok(1), Ok(2)]).boxed()).unwrap();
//!
//! assert_eq!(bridge.next().await.unwrap(), Some(1));
//! assert_eq!(bridge.next().await.unwrap(), Some(2));
//! assert_eq!(bridge.next().await.unwrap(), None);
//! bridge.detach();
//! # });
//! ```

use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::adapter::state::StreamState;
use crate::config::{AdapterConfig, ReopenPolicy};
use crate::error::{ItemStreamError, Result};

/// Bridge from an asynchronous producer stream to pull-based consumption.
///
/// One bridge serves one logical consumer; `&mut self` on [`next`] rules out
/// concurrent pulls. `attach` must be called from within a tokio runtime, as
/// it spawns the producer task.
///
/// [`next`]: StreamBridge::next
pub struct StreamBridge<T> {
    config: AdapterConfig,
    state: StreamState,
    handoff: Option<Handoff<T>>,
}

/// Consumer side of one open/close cycle.
struct Handoff<T> {
    rx: mpsc::Receiver<Result<T>>,
    producer: JoinHandle<()>,
    exhausted: bool,
}

impl<T> StreamBridge<T> {
    /// Create a bridge with the default single-slot configuration.
    pub fn new() -> Self {
        Self::with_config(AdapterConfig::default())
    }

    /// Create a bridge with an explicit handoff capacity and reopen policy.
    pub fn with_config(config: AdapterConfig) -> Self {
        Self {
            config,
            state: StreamState::Unopened,
            handoff: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Check whether an `open` is currently allowed.
    ///
    /// Fails with `AlreadyOpen` when a source is open and the policy is
    /// [`ReopenPolicy::Reject`]. Adapters call this before running any open
    /// hook so a rejected re-open has no side effects.
    pub fn check_reopen(&self) -> Result<()> {
        if self.state.is_open() && self.config.reopen_policy == ReopenPolicy::Reject {
            return Err(ItemStreamError::AlreadyOpen);
        }
        Ok(())
    }

    /// Stop the producer and release the handoff, transitioning to `Closed`.
    ///
    /// Idempotent; aborting the producer signals cancellation so it stops
    /// pulling from its source immediately.
    pub fn detach(&mut self) {
        if self.cancel_producer() {
            debug!(state = %self.state, "stream bridge detached, producer cancelled");
        }
        self.state = StreamState::Closed;
    }

    fn cancel_producer(&mut self) -> bool {
        match self.handoff.take() {
            Some(handoff) => {
                handoff.producer.abort();
                true
            }
            None => false,
        }
    }
}

impl<T: Send + 'static> StreamBridge<T> {
    /// Spawn `stream` as this bridge's producer, beginning a new open cycle.
    ///
    /// While a source is already open, the configured [`ReopenPolicy`]
    /// decides between re-creating it (discarding its unread items) and
    /// failing with `AlreadyOpen`. Attach after `detach` starts a fresh
    /// cycle.
    pub fn attach(&mut self, stream: BoxStream<'static, Result<T>>) -> Result<()> {
        self.config.validate()?;
        self.check_reopen()?;

        if self.state.is_open() {
            warn!("re-opening stream bridge; unread items from the prior source are discarded");
            self.cancel_producer();
        }

        let (tx, rx) = mpsc::channel(self.config.handoff_capacity);
        let producer = tokio::spawn(drive_producer(stream, tx));
        self.handoff = Some(Handoff {
            rx,
            producer,
            exhausted: false,
        });
        self.state = StreamState::Open;

        debug!(
            capacity = self.config.handoff_capacity,
            "stream bridge attached producer"
        );
        Ok(())
    }

    /// Pull the next item, awaiting the producer when nothing is buffered.
    ///
    /// Returns `Ok(Some(item))` per produced element in emission order,
    /// `Ok(None)` once the producer completed (and on every call after
    /// that), or the producer's own error, unchanged, on the call that
    /// reaches it. Fails with `NotOpen` when no source is attached;
    /// lifecycle-order errors take precedence over anything the producer
    /// emitted.
    pub async fn next(&mut self) -> Result<Option<T>> {
        let handoff = self
            .handoff
            .as_mut()
            .ok_or_else(|| ItemStreamError::not_open("stream"))?;

        if handoff.exhausted {
            return Ok(None);
        }

        match handoff.rx.recv().await {
            Some(Ok(item)) => Ok(Some(item)),
            Some(Err(err)) => {
                handoff.exhausted = true;
                Err(err)
            }
            None => {
                handoff.exhausted = true;
                Ok(None)
            }
        }
    }
}

impl<T> Default for StreamBridge<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for StreamBridge<T> {
    fn drop(&mut self) {
        self.cancel_producer();
    }
}

/// Producer loop: forward each element through the bounded handoff.
///
/// Stops when the stream completes, when it emits an error (terminal, the
/// source is never polled past it), or when the consumer has gone away and
/// the send fails.
async fn drive_producer<T: Send + 'static>(
    mut stream: BoxStream<'static, Result<T>>,
    tx: mpsc::Sender<Result<T>>,
) {
    while let Some(result) = stream.next().await {
        let terminal = result.is_err();
        if tx.send(result).await.is_err() {
            break;
        }
        if terminal {
            break;
        }
    }
}
