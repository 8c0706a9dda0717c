//! # Processor Adapter
//!
//! Adapts a [`ProcessorDelegate`] to the [`ItemProcessor`] contract. Pure
//! forwarding; processors take no part in the open/update/close lifecycle.

use async_trait::async_trait;

use crate::adapter::delegates::ProcessorDelegate;
use crate::error::Result;
use crate::item::ItemProcessor;

/// Adapts a processing delegate to the item-processor contract.
pub struct ProcessorAdapter<D> {
    delegate: D,
}

impl<D: ProcessorDelegate> ProcessorAdapter<D> {
    /// Wrap `delegate`.
    pub fn new(delegate: D) -> Self {
        Self { delegate }
    }

    /// Consume the adapter, returning the wrapped delegate.
    pub fn into_delegate(self) -> D {
        self.delegate
    }
}

#[async_trait]
impl<D: ProcessorDelegate> ItemProcessor<D::In, D::Out> for ProcessorAdapter<D> {
    async fn process(&mut self, item: D::In) -> Result<Option<D::Out>> {
        self.delegate.process(item).await
    }
}
