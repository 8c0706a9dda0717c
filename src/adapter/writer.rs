//! # Writer Adapter
//!
//! Adapts a [`WriterDelegate`] to the four-call item-stream lifecycle plus
//! chunk writing. The write path is pure forwarding; the adapter adds the
//! write-suffixed hook dispatch and close-once discipline.

use async_trait::async_trait;
use tracing::debug;

use crate::adapter::delegates::WriterDelegate;
use crate::adapter::state::StreamState;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::item::{Chunk, ItemStream, ItemWriter};

/// Adapts a chunk-writing delegate to the lifecycle contract.
pub struct WriterAdapter<D> {
    delegate: D,
    state: StreamState,
}

impl<D: WriterDelegate> WriterAdapter<D> {
    /// Wrap `delegate`.
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            state: StreamState::Unopened,
        }
    }

    /// Consume the adapter, returning the wrapped delegate.
    pub fn into_delegate(self) -> D {
        self.delegate
    }
}

#[async_trait]
impl<D: WriterDelegate> ItemStream for WriterAdapter<D> {
    async fn open(&mut self, context: &mut ExecutionContext) -> Result<()> {
        self.delegate.on_open_write(context).await?;
        self.state = StreamState::Open;
        debug!(adapter = "writer", "opened");
        Ok(())
    }

    async fn update(&mut self, context: &mut ExecutionContext) -> Result<()> {
        self.delegate.on_update_write(context).await
    }

    async fn close(&mut self) -> Result<()> {
        if !self.state.needs_close_hook() {
            return Ok(());
        }
        self.state = StreamState::Closed;
        self.delegate.on_close_write().await?;
        debug!(adapter = "writer", "closed");
        Ok(())
    }
}

#[async_trait]
impl<D: WriterDelegate> ItemWriter<D::Item> for WriterAdapter<D> {
    async fn write(&mut self, chunk: Chunk<D::Item>) -> Result<()> {
        self.delegate.write(chunk).await
    }
}
