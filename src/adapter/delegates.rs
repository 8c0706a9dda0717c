//! # Delegate Shapes
//!
//! Simplified contracts callers implement instead of the full
//! [`ItemStream`](crate::item::ItemStream) lifecycle. Exactly one delegate is
//! wrapped per adapted instance:
//!
//! - [`SimpleReaderDelegate`] - A finite pull source (`read` until `None`)
//! - [`IteratorReaderDelegate`] - Hands over an iterator at `open`
//! - [`IterableReaderDelegate`] - Hands over anything `IntoIterator` at `open`
//! - [`StreamReaderDelegate`] - Hands over an asynchronous stream at `open`,
//!   bridged to pull-based reads by the
//!   [`StreamBridge`](crate::adapter::bridge::StreamBridge)
//! - [`ProcessorDelegate`] / [`WriterDelegate`] - Item transformation and
//!   chunk writing
//!
//! Lifecycle hooks (`on_open_*`, `on_update_*`, `on_close_*`) default to
//! no-ops. Their names carry a read/write suffix so a single type can
//! implement a reader and a writer delegate side by side without method
//! clashes, the composite pattern used for single-object
//! reader/processor/writer steps.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::item::Chunk;

/// A finite pull source: `read` returns items until it signals the end with
/// `None`.
///
/// The delegate owns its own cursor; the adapter adds lifecycle forwarding
/// only. Fallible sources report failures through the `Result`.
#[async_trait]
pub trait SimpleReaderDelegate: Send {
    type Item: Send;

    /// Called when the adapted reader is opened.
    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Pull the next item, or `None` at the end of data.
    async fn read(&mut self) -> Result<Option<Self::Item>>;

    /// Called when the adapted reader records checkpoint progress.
    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Called once per open cycle when the adapted reader is closed.
    async fn on_close_read(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A source that materializes a fresh iterator each time the adapted reader
/// is opened.
///
/// The iterator yields plain items; use [`SimpleReaderDelegate`] or
/// [`StreamReaderDelegate`] when production itself can fail.
#[async_trait]
pub trait IteratorReaderDelegate: Send {
    type Item: Send;
    type Iter: Iterator<Item = Self::Item> + Send;

    /// Called when the adapted reader is opened, before the iterator is
    /// materialized.
    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Build the iterator for this open cycle. The context carries restart
    /// state the delegate may inspect; it is not retained.
    fn read_iterator(&mut self, context: &mut ExecutionContext) -> Self::Iter;

    /// Called when the adapted reader records checkpoint progress.
    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Called once per open cycle when the adapted reader is closed.
    async fn on_close_read(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A source that materializes a fresh `IntoIterator` value each time the
/// adapted reader is opened, e.g. a collection assembled from restart state.
#[async_trait]
pub trait IterableReaderDelegate: Send {
    type Item: Send;
    type Iterable: IntoIterator<Item = Self::Item>;

    /// Called when the adapted reader is opened, before the iterable is
    /// materialized.
    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Build the iterable for this open cycle.
    fn read_iterable(&mut self, context: &mut ExecutionContext) -> Self::Iterable;

    /// Called when the adapted reader records checkpoint progress.
    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Called once per open cycle when the adapted reader is closed.
    async fn on_close_read(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A push-style source: the delegate hands over an asynchronous stream whose
/// items the bridge drains one pull at a time.
///
/// The stream is created lazily at `open` so context-dependent configuration
/// (paths, partition ranges) can shape it. It may run on its own tasks and
/// emit at its own pace; the bridge's bounded handoff keeps it from racing
/// ahead of the consumer. A stream error is terminal for the cycle and is
/// surfaced to the caller of `read` exactly as emitted.
#[async_trait]
pub trait StreamReaderDelegate: Send {
    type Item: Send + 'static;

    /// Called when the adapted reader is opened, before the stream is
    /// created.
    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Build the stream for this open cycle. The stream must own everything
    /// it needs; the context is only borrowed for the duration of this call.
    fn read_stream(
        &mut self,
        context: &mut ExecutionContext,
    ) -> BoxStream<'static, Result<Self::Item>>;

    /// Called when the adapted reader records checkpoint progress.
    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Called once per open cycle when the adapted reader is closed.
    async fn on_close_read(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Item transformation between a reader and a writer.
#[async_trait]
pub trait ProcessorDelegate: Send {
    type In: Send;
    type Out: Send;

    /// Transform one item; `None` filters it out.
    async fn process(&mut self, item: Self::In) -> Result<Option<Self::Out>>;
}

/// Chunk writing with optional lifecycle hooks.
#[async_trait]
pub trait WriterDelegate: Send {
    type Item: Send;

    /// Called when the adapted writer is opened.
    async fn on_open_write(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Write one chunk of items.
    async fn write(&mut self, chunk: Chunk<Self::Item>) -> Result<()>;

    /// Called when the adapted writer records checkpoint progress.
    async fn on_update_write(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Called once per open cycle when the adapted writer is closed.
    async fn on_close_write(&mut self) -> Result<()> {
        Ok(())
    }
}
