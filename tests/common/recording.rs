#![allow(dead_code)] // Each test binary uses a different subset of the helpers.

//! Recording delegates for lifecycle tests.
//!
//! Each delegate counts its hook invocations through shared [`HookCounters`]
//! handles so tests can assert call-order contracts (hook exactly once per
//! open cycle, update independent of read progress) from outside the adapter.
//! A delegate can also be configured to reject individual hooks with
//! `UnsupportedLifecycle`, simulating callers that deliberately leave an
//! optional hook unimplemented.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use itemstream::adapter::delegates::{
    IteratorReaderDelegate, SimpleReaderDelegate, StreamReaderDelegate, WriterDelegate,
};
use itemstream::{Chunk, ExecutionContext, ItemStreamError, Result};

/// Shared invocation counters observed while an adapter drives a recording
/// delegate through its lifecycle.
#[derive(Debug, Clone, Default)]
pub struct HookCounters {
    opens: Arc<AtomicUsize>,
    sources: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl HookCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times the open hook ran.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Times the underlying source (stream, iterator) was materialized.
    pub fn sources(&self) -> usize {
        self.sources.load(Ordering::SeqCst)
    }

    /// Times the update hook ran.
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Times the close hook ran.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn record_open(&self) {
        self.opens.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_source(&self) {
        self.sources.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Stream delegate emitting a fixed item sequence, optionally cut short by a
/// producer error after a configured number of items.
pub struct RecordingStreamDelegate {
    pub items: Vec<i64>,
    pub error_after: Option<usize>,
    pub rejected_hooks: Vec<&'static str>,
    pub counters: HookCounters,
}

impl RecordingStreamDelegate {
    /// Delegate whose stream emits `items` and completes.
    pub fn emitting(items: Vec<i64>) -> Self {
        Self {
            items,
            error_after: None,
            rejected_hooks: Vec::new(),
            counters: HookCounters::new(),
        }
    }

    /// Delegate whose stream emits the first `emitted` items of `items` and
    /// then raises a producer error.
    pub fn failing_after(items: Vec<i64>, emitted: usize) -> Self {
        Self {
            error_after: Some(emitted),
            ..Self::emitting(items)
        }
    }

    /// Delegate rejecting the named hooks with `UnsupportedLifecycle`.
    pub fn rejecting_hooks(hooks: Vec<&'static str>) -> Self {
        Self {
            rejected_hooks: hooks,
            ..Self::emitting(Vec::new())
        }
    }

    /// Clone a counters handle for later assertions.
    pub fn counters(&self) -> HookCounters {
        self.counters.clone()
    }

    fn check_hook(&self, hook: &'static str) -> Result<()> {
        if self.rejected_hooks.contains(&hook) {
            return Err(ItemStreamError::unsupported_lifecycle(hook));
        }
        Ok(())
    }
}

#[async_trait]
impl StreamReaderDelegate for RecordingStreamDelegate {
    type Item = i64;

    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.check_hook("on_open_read")?;
        self.counters.record_open();
        Ok(())
    }

    fn read_stream(&mut self, _context: &mut ExecutionContext) -> BoxStream<'static, Result<i64>> {
        self.counters.record_source();
        let mut results: Vec<Result<i64>> = self.items.iter().copied().map(Ok).collect();
        if let Some(emitted) = self.error_after {
            results.truncate(emitted);
            results.push(Err(ItemStreamError::producer(format!(
                "source failed after {emitted} items"
            ))));
        }
        stream::iter(results).boxed()
    }

    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.check_hook("on_update_read")?;
        self.counters.record_update();
        Ok(())
    }

    async fn on_close_read(&mut self) -> Result<()> {
        self.check_hook("on_close_read")?;
        self.counters.record_close();
        Ok(())
    }
}

/// Iterator delegate producing a fresh pass over a fixed item sequence on
/// every open.
pub struct RecordingIteratorDelegate {
    pub items: Vec<i64>,
    pub counters: HookCounters,
}

impl RecordingIteratorDelegate {
    pub fn emitting(items: Vec<i64>) -> Self {
        Self {
            items,
            counters: HookCounters::new(),
        }
    }

    pub fn counters(&self) -> HookCounters {
        self.counters.clone()
    }
}

#[async_trait]
impl IteratorReaderDelegate for RecordingIteratorDelegate {
    type Item = i64;
    type Iter = std::vec::IntoIter<i64>;

    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.counters.record_open();
        Ok(())
    }

    fn read_iterator(&mut self, _context: &mut ExecutionContext) -> Self::Iter {
        self.counters.record_source();
        self.items.clone().into_iter()
    }

    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.counters.record_update();
        Ok(())
    }

    async fn on_close_read(&mut self) -> Result<()> {
        self.counters.record_close();
        Ok(())
    }
}

/// Pull delegate owning its own cursor, the simplest reader shape.
pub struct RecordingSimpleDelegate {
    pub remaining: VecDeque<i64>,
    pub counters: HookCounters,
}

impl RecordingSimpleDelegate {
    pub fn emitting(items: Vec<i64>) -> Self {
        Self {
            remaining: items.into(),
            counters: HookCounters::new(),
        }
    }

    pub fn counters(&self) -> HookCounters {
        self.counters.clone()
    }
}

#[async_trait]
impl SimpleReaderDelegate for RecordingSimpleDelegate {
    type Item = i64;

    async fn on_open_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.counters.record_open();
        Ok(())
    }

    async fn read(&mut self) -> Result<Option<i64>> {
        Ok(self.remaining.pop_front())
    }

    async fn on_update_read(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.counters.record_update();
        Ok(())
    }

    async fn on_close_read(&mut self) -> Result<()> {
        self.counters.record_close();
        Ok(())
    }
}

/// Writer delegate capturing every chunk it receives.
pub struct RecordingWriterDelegate {
    pub written: Arc<Mutex<Vec<Vec<i64>>>>,
    pub rejected_hooks: Vec<&'static str>,
    pub counters: HookCounters,
}

impl RecordingWriterDelegate {
    pub fn new() -> Self {
        Self {
            written: Arc::new(Mutex::new(Vec::new())),
            rejected_hooks: Vec::new(),
            counters: HookCounters::new(),
        }
    }

    /// Delegate rejecting the named hooks with `UnsupportedLifecycle`.
    pub fn rejecting_hooks(hooks: Vec<&'static str>) -> Self {
        Self {
            rejected_hooks: hooks,
            ..Self::new()
        }
    }

    /// Clone a handle to the captured chunks.
    pub fn written(&self) -> Arc<Mutex<Vec<Vec<i64>>>> {
        Arc::clone(&self.written)
    }

    pub fn counters(&self) -> HookCounters {
        self.counters.clone()
    }

    fn check_hook(&self, hook: &'static str) -> Result<()> {
        if self.rejected_hooks.contains(&hook) {
            return Err(ItemStreamError::unsupported_lifecycle(hook));
        }
        Ok(())
    }
}

impl Default for RecordingWriterDelegate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WriterDelegate for RecordingWriterDelegate {
    type Item = i64;

    async fn on_open_write(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.check_hook("on_open_write")?;
        self.counters.record_open();
        Ok(())
    }

    async fn write(&mut self, chunk: Chunk<i64>) -> Result<()> {
        self.written
            .lock()
            .expect("written log lock")
            .push(chunk.into_items());
        Ok(())
    }

    async fn on_update_write(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        self.check_hook("on_update_write")?;
        self.counters.record_update();
        Ok(())
    }

    async fn on_close_write(&mut self) -> Result<()> {
        self.check_hook("on_close_write")?;
        self.counters.record_close();
        Ok(())
    }
}
