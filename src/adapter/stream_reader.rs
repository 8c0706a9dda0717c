//! # Stream Reader Adapter
//!
//! Adapts a [`StreamReaderDelegate`] to the four-call item-stream lifecycle.
//! The delegate hands over an asynchronous stream at `open`; every `read` then
//! pulls exactly one item through the [`StreamBridge`], which keeps the
//! producer on a bounded handoff so it can never race ahead of the consumer.
//!
//! ## Lifecycle mapping
//!
//! - `open`: reopen-policy check, then the delegate's `on_open_read` hook
//!   (exactly once per call), then `read_stream` (exactly once per call), then
//!   the bridge attaches the stream and spawns the producer.
//! - `read`: one pull from the bridge. `NotOpen` before the first `open` and
//!   after `close`.
//! - `update`: forwarded to `on_update_read` unconditionally, independent of
//!   read progress.
//! - `close`: the bridge detaches first so the producer is cancelled and its
//!   resources released on every exit path, then `on_close_read` runs at most
//!   once per open cycle. Idempotent.
//!
//! ## Usage
//!
//! ```rust
//! use async_trait::async_trait;
//! use futures::stream::{self, BoxStream, StreamExt};
//! use itemstream::adapter::stream_reader::StreamReaderAdapter;
//! use itemstream::adapter::delegates::StreamReaderDelegate;
//! use itemstream::{ExecutionContext, ItemReader, ItemStream, Result};
//!
//! struct Numbers {
//!     upto: i64,
//! }
//!
//! #[async_trait]
//! impl StreamReaderDelegate for Numbers {
//!     type Item = i64;
//!
//!     fn read_stream(
//!         &mut self,
//!         _context: &mut ExecutionContext,
//!     ) -> BoxStream<'static, Result<i64>> {
//!         stream::iter((0..self.upto).map(Ok)).boxed()
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let mut reader = StreamReaderAdapter::new(Numbers { upto: 2 });
//! let mut context = ExecutionContext::new();
//!
//! reader.open(&mut context).await.unwrap();
//! assert_eq!(reader.read().await.unwrap(), Some(0));
//! assert_eq!(reader.read().await.unwrap(), Some(1));
//! assert_eq!(reader.read().await.unwrap(), None);
//! reader.close().await.unwrap();
//! # });
//! ```

use async_trait::async_trait;
use tracing::debug;

use crate::adapter::bridge::StreamBridge;
use crate::adapter::delegates::StreamReaderDelegate;
use crate::config::AdapterConfig;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::item::{ItemReader, ItemStream};

/// Adapts a push-style stream delegate to pull-based lifecycle reads.
pub struct StreamReaderAdapter<D: StreamReaderDelegate> {
    delegate: D,
    bridge: StreamBridge<D::Item>,
}

impl<D: StreamReaderDelegate> StreamReaderAdapter<D> {
    /// Wrap `delegate` with the default single-slot bridge configuration.
    pub fn new(delegate: D) -> Self {
        Self::with_config(delegate, AdapterConfig::default())
    }

    /// Wrap `delegate` with an explicit handoff capacity and reopen policy.
    pub fn with_config(delegate: D, config: AdapterConfig) -> Self {
        Self {
            delegate,
            bridge: StreamBridge::with_config(config),
        }
    }

    /// Consume the adapter, returning the wrapped delegate.
    pub fn into_delegate(mut self) -> D {
        self.bridge.detach();
        self.delegate
    }
}

#[async_trait]
impl<D: StreamReaderDelegate> ItemStream for StreamReaderAdapter<D> {
    async fn open(&mut self, context: &mut ExecutionContext) -> Result<()> {
        // Policy check first: a rejected re-open must have no side effects.
        self.bridge.check_reopen()?;

        self.delegate.on_open_read(context).await?;
        let stream = self.delegate.read_stream(context);
        self.bridge.attach(stream)?;

        debug!(adapter = "stream_reader", "opened");
        Ok(())
    }

    async fn update(&mut self, context: &mut ExecutionContext) -> Result<()> {
        self.delegate.on_update_read(context).await
    }

    async fn close(&mut self) -> Result<()> {
        let run_hook = self.bridge.state().needs_close_hook();
        // Detach before the hook: producer cancellation must happen even if
        // the hook fails.
        self.bridge.detach();
        if run_hook {
            self.delegate.on_close_read().await?;
            debug!(adapter = "stream_reader", "closed");
        }
        Ok(())
    }
}

#[async_trait]
impl<D: StreamReaderDelegate> ItemReader<D::Item> for StreamReaderAdapter<D> {
    async fn read(&mut self) -> Result<Option<D::Item>> {
        self.bridge.next().await
    }
}
