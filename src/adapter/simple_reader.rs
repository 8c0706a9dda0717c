//! # Simple Reader Adapter
//!
//! Adapts a [`SimpleReaderDelegate`] to the four-call item-stream lifecycle.
//! The delegate already speaks "pull one item or `None`", so `read` is pure
//! forwarding; the adapter only adds lifecycle-hook dispatch and close-once
//! discipline. There is no materialized source here, hence no reopen policy
//! and no not-open guard: the delegate owns its read state.

use async_trait::async_trait;
use tracing::debug;

use crate::adapter::delegates::SimpleReaderDelegate;
use crate::adapter::state::StreamState;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::item::{ItemReader, ItemStream};

/// Adapts a pull-style delegate to the lifecycle contract by forwarding.
pub struct SimpleReaderAdapter<D> {
    delegate: D,
    state: StreamState,
}

impl<D: SimpleReaderDelegate> SimpleReaderAdapter<D> {
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
impl<D: SimpleReaderDelegate> ItemStream for SimpleReaderAdapter<D> {
    async fn open(&mut self, context: &mut ExecutionContext) -> Result<()> {
        self.delegate.on_open_read(context).await?;
        self.state = StreamState::Open;
        debug!(adapter = "simple_reader", "opened");
        Ok(())
    }

    async fn update(&mut self, context: &mut ExecutionContext) -> Result<()> {
        self.delegate.on_update_read(context).await
    }

    async fn close(&mut self) -> Result<()> {
        if !self.state.needs_close_hook() {
            return Ok(());
        }
        self.state = StreamState::Closed;
        self.delegate.on_close_read().await?;
        debug!(adapter = "simple_reader", "closed");
        Ok(())
    }
}

#[async_trait]
impl<D: SimpleReaderDelegate> ItemReader<D::Item> for SimpleReaderAdapter<D> {
    async fn read(&mut self) -> Result<Option<D::Item>> {
        self.delegate.read().await
    }
}
