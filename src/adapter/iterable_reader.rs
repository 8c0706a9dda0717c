//! # Iterable Reader Adapter
//!
//! Adapts an [`IterableReaderDelegate`] to the four-call item-stream
//! lifecycle. The delegate hands over any `IntoIterator` value at `open`,
//! typically a collection assembled from restart state in the execution
//! context; the adapter owns the resulting iterator for the open cycle.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::adapter::delegates::IterableReaderDelegate;
use crate::adapter::state::StreamState;
use crate::config::{AdapterConfig, ReopenPolicy};
use crate::context::ExecutionContext;
use crate::error::{ItemStreamError, Result};
use crate::item::{ItemReader, ItemStream};

type SourceIter<D> =
    std::iter::Fuse<<<D as IterableReaderDelegate>::Iterable as IntoIterator>::IntoIter>;

/// Adapts an iterable-producing delegate to pull-based lifecycle reads.
pub struct IterableReaderAdapter<D: IterableReaderDelegate> {
    delegate: D,
    config: AdapterConfig,
    source: Option<SourceIter<D>>,
    state: StreamState,
}

impl<D: IterableReaderDelegate> IterableReaderAdapter<D> {
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
impl<D> ItemStream for IterableReaderAdapter<D>
where
    D: IterableReaderDelegate,
    SourceIter<D>: Send,
{
    async fn open(&mut self, context: &mut ExecutionContext) -> Result<()> {
        if self.state.is_open() && self.config.reopen_policy == ReopenPolicy::Reject {
            return Err(ItemStreamError::AlreadyOpen);
        }

        self.delegate.on_open_read(context).await?;
        if self.state.is_open() {
            warn!(
                adapter = "iterable_reader",
                "re-opening; remaining items from the prior iterable are discarded"
            );
        }
        self.source = Some(self.delegate.read_iterable(context).into_iter().fuse());
        self.state = StreamState::Open;

        debug!(adapter = "iterable_reader", "opened");
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
            debug!(adapter = "iterable_reader", "closed");
        }
        Ok(())
    }
}

#[async_trait]
impl<D> ItemReader<D::Item> for IterableReaderAdapter<D>
where
    D: IterableReaderDelegate,
    SourceIter<D>: Send,
{
    async fn read(&mut self) -> Result<Option<D::Item>> {
        match self.source.as_mut() {
            Some(iter) => Ok(iter.next()),
            None => Err(ItemStreamError::not_open("iterable")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Partition {
        names: Vec<String>,
    }

    #[async_trait]
    impl IterableReaderDelegate for Partition {
        type Item = String;
        type Iterable = Vec<String>;

        fn read_iterable(&mut self, context: &mut ExecutionContext) -> Self::Iterable {
            // Restart state trims the already-served prefix.
            let skip = context.get::<usize>("served").unwrap().unwrap_or(0);
            self.names.iter().skip(skip).cloned().collect()
        }
    }

    #[tokio::test]
    async fn test_iterable_built_from_restart_state() {
        let delegate = Partition {
            names: vec!["a".into(), "b".into(), "c".into()],
        };
        let mut reader = IterableReaderAdapter::new(delegate);
        let mut context = ExecutionContext::new();
        context.put("served", 1_usize).unwrap();

        reader.open(&mut context).await.unwrap();
        assert_eq!(reader.read().await.unwrap(), Some("b".to_string()));
        assert_eq!(reader.read().await.unwrap(), Some("c".to_string()));
        assert_eq!(reader.read().await.unwrap(), None);
        reader.close().await.unwrap();

        let err = reader.read().await.unwrap_err();
        assert!(matches!(err, ItemStreamError::NotOpen { .. }));
    }
}
