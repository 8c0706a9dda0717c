//! # Iterator Reader Adapter
//!
//! Adapts an [`IteratorReaderDelegate`] to the four-call item-stream
//! lifecycle. `open` materializes a fresh iterator from the delegate (fused,
//! so an exhausted source is never re-entered), `read` pulls one item at a
//! time, and `close` drops the iterator before the close hook runs.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::adapter::delegates::IteratorReaderDelegate;
use crate::adapter::state::StreamState;
use crate::config::{AdapterConfig, ReopenPolicy};
use crate::context::ExecutionContext;
use crate::error::{ItemStreamError, Result};
use crate::item::{ItemReader, ItemStream};

/// Adapts an iterator-producing delegate to pull-based lifecycle reads.
pub struct IteratorReaderAdapter<D: IteratorReaderDelegate> {
    delegate: D,
    config: AdapterConfig,
    source: Option<std::iter::Fuse<D::Iter>>,
    state: StreamState,
}

impl<D: IteratorReaderDelegate> IteratorReaderAdapter<D> {
    /// Wrap `delegate` with the default configuration.
    pub fn new(delegate: D) -> Self {
        Self::with_config(delegate, AdapterConfig::default())
    }

    /// Wrap `delegate` with an explicit reopen policy. The handoff capacity
    /// is ignored here; there is no asynchronous producer to bound.
    pub fn with_config(delegate: D, config: AdapterConfig) -> Self {
        Self {
            delegate,
            config,
            source: None,
            state: StreamState::Unopened,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }
}

#[async_trait]
impl<D: IteratorReaderDelegate> ItemStream for IteratorReaderAdapter<D> {
    async fn open(&mut self, context: &mut ExecutionContext) -> Result<()> {
        if self.state.is_open() && self.config.reopen_policy == ReopenPolicy::Reject {
            return Err(ItemStreamError::AlreadyOpen);
        }

        self.delegate.on_open_read(context).await?;
        if self.state.is_open() {
            warn!(
                adapter = "iterator_reader",
                "re-opening; remaining items from the prior iterator are discarded"
            );
        }
        self.source = Some(self.delegate.read_iterator(context).fuse());
        self.state = StreamState::Open;

        debug!(adapter = "iterator_reader", "opened");
        Ok(())
    }

    async fn update(&mut self, context: &mut ExecutionContext) -> Result<()> {
        self.delegate.on_update_read(context).await
    }

    async fn close(&mut self) -> Result<()> {
        let run_hook = self.state.needs_close_hook();
        self.source = None;
        self.state = StreamState::Closed;
        if run_hook {
            self.delegate.on_close_read().await?;
            debug!(adapter = "iterator_reader", "closed");
        }
        Ok(())
    }
}

#[async_trait]
impl<D: IteratorReaderDelegate> ItemReader<D::Item> for IteratorReaderAdapter<D> {
    async fn read(&mut self) -> Result<Option<D::Item>> {
        match self.source.as_mut() {
            Some(iter) => Ok(iter.next()),
            None => Err(ItemStreamError::not_open("iterator")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        upto: i64,
        opens: usize,
        closes: usize,
    }

    #[async_trait]
    impl IteratorReaderDelegate for Counting {
        type Item = i64;
        type Iter = std::ops::Range<i64>;

        async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
            self.opens += 1;
            Ok(())
        }

        fn read_iterator(&mut self, _context: &mut ExecutionContext) -> Self::Iter {
            0..self.upto
        }

        async fn on_close_read(&mut self) -> Result<()> {
            self.closes += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_reads_all_items_then_end_sentinel() {
        let mut reader = IteratorReaderAdapter::new(Counting {
            upto: 3,
            opens: 0,
            closes: 0,
        });
        let mut context = ExecutionContext::new();

        reader.open(&mut context).await.unwrap();
        assert_eq!(reader.read().await.unwrap(), Some(0));
        assert_eq!(reader.read().await.unwrap(), Some(1));
        assert_eq!(reader.read().await.unwrap(), Some(2));
        assert_eq!(reader.read().await.unwrap(), None);
        assert_eq!(reader.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_before_open_is_not_open() {
        let mut reader = IteratorReaderAdapter::new(Counting {
            upto: 3,
            opens: 0,
            closes: 0,
        });

        let err = reader.read().await.unwrap_err();
        assert!(matches!(err, ItemStreamError::NotOpen { .. }));
    }

    #[tokio::test]
    async fn test_close_runs_hook_once_per_cycle() {
        let mut reader = IteratorReaderAdapter::new(Counting {
            upto: 1,
            opens: 0,
            closes: 0,
        });
        let mut context = ExecutionContext::new();

        reader.open(&mut context).await.unwrap();
        reader.close().await.unwrap();
        reader.close().await.unwrap();
        assert_eq!(reader.delegate.closes, 1);

        // A fresh cycle earns a fresh close hook.
        reader.open(&mut context).await.unwrap();
        reader.close().await.unwrap();
        assert_eq!(reader.delegate.opens, 2);
        assert_eq!(reader.delegate.closes, 2);
    }
}
