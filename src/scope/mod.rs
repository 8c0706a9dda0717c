//! # Step-Scoped Reader Instantiation
//!
//! One reader instance per logical processing scope (a step execution, a
//! partition), created lazily at first use and shared by every binding of
//! that scope.
//!
//! ## Architecture
//!
//! [`StepScopeReader`] holds a factory closure and a concurrent registry of
//! per-scope instances. [`bind`](StepScopeReader::bind) returns a
//! [`ScopedReader`] proxy implementing the full item-stream lifecycle; the
//! underlying reader is built by the factory exactly once per scope, at the
//! first lifecycle call that reaches it. Binds of the same scope share that
//! instance behind an async mutex; distinct scopes never share. Partitioned
//! steps therefore get one reader per partition without the delegate author
//! managing instance lifetimes.
//!
//! [`release`](StepScopeReader::release) tears a scope's instance down when
//! the scope ends. A released scope behaves like a fresh one: the next
//! lifecycle call re-creates the instance.
//!
//! ## Usage
//!
//! ```rust
//! use async_trait::async_trait;
//! use itemstream::adapter::factory;
//! use itemstream::adapter::delegates::IteratorReaderDelegate;
//! use itemstream::scope::{StepScopeId, StepScopeReader};
//! use itemstream::{ExecutionContext, ItemReader, ItemStream};
//!
//! struct Numbers;
//!
//! #[async_trait]
//! impl IteratorReaderDelegate for Numbers {
//!     type Item = i64;
//!     type Iter = std::ops::Range<i64>;
//!
//!     fn read_iterator(&mut self, _context: &mut ExecutionContext) -> Self::Iter {
//!         0..3
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let scoped = StepScopeReader::new(|| factory::iterator_reader(Numbers));
//! let scope = StepScopeId::new();
//! let mut reader = scoped.bind(scope);
//! let mut context = ExecutionContext::new();
//!
//! reader.open(&mut context).await.unwrap();
//! assert_eq!(reader.read().await.unwrap(), Some(0));
//! reader.close().await.unwrap();
//! scoped.release(scope);
//! # });
//! ```

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::item::{ItemReader, ItemStream};

/// Identifier of one logical processing scope (step execution, partition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepScopeId(Uuid);

impl StepScopeId {
    /// Mint a fresh scope identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StepScopeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for StepScopeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for StepScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type ReaderFactory<R> = dyn Fn() -> R + Send + Sync;

/// Factory plus registry handing out one lazily-built reader per scope.
pub struct StepScopeReader<R> {
    factory: Arc<ReaderFactory<R>>,
    instances: Arc<DashMap<StepScopeId, Arc<Mutex<R>>>>,
}

impl<R> StepScopeReader<R> {
    /// Create a scope-bound reader source from a factory closure.
    ///
    /// The factory runs once per scope, at the first lifecycle call of any
    /// binding of that scope.
    pub fn new(factory: impl Fn() -> R + Send + Sync + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            instances: Arc::new(DashMap::new()),
        }
    }

    /// Bind `scope`, returning a lifecycle proxy for its instance.
    ///
    /// Binding is cheap and does not build the instance; all bindings of the
    /// same scope resolve to the same instance once one exists.
    pub fn bind(&self, scope: StepScopeId) -> ScopedReader<R> {
        ScopedReader {
            scope,
            factory: Arc::clone(&self.factory),
            instances: Arc::clone(&self.instances),
        }
    }

    /// Tear down the instance for `scope` at end of scope.
    ///
    /// Returns the removed instance so a caller that still holds it can run
    /// `close` explicitly; dropping it releases the underlying source either
    /// way. A later lifecycle call on a binding of the same scope re-creates
    /// the instance.
    pub fn release(&self, scope: StepScopeId) -> Option<Arc<Mutex<R>>> {
        let removed = self.instances.remove(&scope).map(|(_, instance)| instance);
        if removed.is_some() {
            debug!(scope = %scope, "released scoped reader instance");
        }
        removed
    }

    /// Number of scopes with a live instance.
    pub fn active_scopes(&self) -> usize {
        self.instances.len()
    }

    /// Whether `scope` already has an instance built.
    pub fn is_instantiated(&self, scope: StepScopeId) -> bool {
        self.instances.contains_key(&scope)
    }
}

impl<R> Clone for StepScopeReader<R> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            instances: Arc::clone(&self.instances),
        }
    }
}

/// Lifecycle proxy bound to one scope.
///
/// Every call resolves the scope's instance (building it on first use) and
/// forwards under an async mutex, so concurrent bindings of one scope
/// serialize their lifecycle calls.
pub struct ScopedReader<R> {
    scope: StepScopeId,
    factory: Arc<ReaderFactory<R>>,
    instances: Arc<DashMap<StepScopeId, Arc<Mutex<R>>>>,
}

impl<R> ScopedReader<R> {
    /// The scope this proxy is bound to.
    pub fn scope(&self) -> StepScopeId {
        self.scope
    }

    fn instance(&self) -> Arc<Mutex<R>> {
        self.instances
            .entry(self.scope)
            .or_insert_with(|| {
                debug!(scope = %self.scope, "creating scoped reader instance");
                Arc::new(Mutex::new((self.factory)()))
            })
            .value()
            .clone()
    }
}

impl<R> Clone for ScopedReader<R> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope,
            factory: Arc::clone(&self.factory),
            instances: Arc::clone(&self.instances),
        }
    }
}

#[async_trait::async_trait]
impl<R: ItemStream> ItemStream for ScopedReader<R> {
    async fn open(&mut self, context: &mut ExecutionContext) -> Result<()> {
        let instance = self.instance();
        let mut reader = instance.lock().await;
        reader.open(context).await
    }

    async fn update(&mut self, context: &mut ExecutionContext) -> Result<()> {
        let instance = self.instance();
        let mut reader = instance.lock().await;
        reader.update(context).await
    }

    async fn close(&mut self) -> Result<()> {
        let instance = self.instance();
        let mut reader = instance.lock().await;
        reader.close().await
    }
}

#[async_trait::async_trait]
impl<R, T> ItemReader<T> for ScopedReader<R>
where
    R: ItemReader<T>,
    T: Send + 'static,
{
    async fn read(&mut self) -> Result<Option<T>> {
        let instance = self.instance();
        let mut reader = instance.lock().await;
        reader.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct VecReader {
        items: Vec<i64>,
        cursor: usize,
    }

    impl ItemStream for VecReader {}

    #[async_trait]
    impl ItemReader<i64> for VecReader {
        async fn read(&mut self) -> Result<Option<i64>> {
            let item = self.items.get(self.cursor).copied();
            if item.is_some() {
                self.cursor += 1;
            }
            Ok(item)
        }
    }

    fn counting_source(built: Arc<AtomicUsize>) -> StepScopeReader<VecReader> {
        StepScopeReader::new(move || {
            built.fetch_add(1, Ordering::SeqCst);
            VecReader {
                items: vec![10, 20, 30],
                cursor: 0,
            }
        })
    }

    #[tokio::test]
    async fn test_instance_is_built_lazily_once_per_scope() {
        let built = Arc::new(AtomicUsize::new(0));
        let scoped = counting_source(built.clone());
        let scope = StepScopeId::new();

        let mut reader = scoped.bind(scope);
        assert_eq!(built.load(Ordering::SeqCst), 0);
        assert!(!scoped.is_instantiated(scope));

        assert_eq!(reader.read().await.unwrap(), Some(10));
        assert_eq!(built.load(Ordering::SeqCst), 1);

        let mut second = scoped.bind(scope);
        assert_eq!(second.read().await.unwrap(), Some(20));
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_scopes_never_share() {
        let built = Arc::new(AtomicUsize::new(0));
        let scoped = counting_source(built.clone());

        let mut first = scoped.bind(StepScopeId::new());
        let mut second = scoped.bind(StepScopeId::new());

        assert_eq!(first.read().await.unwrap(), Some(10));
        assert_eq!(second.read().await.unwrap(), Some(10));
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(scoped.active_scopes(), 2);
    }

    #[tokio::test]
    async fn test_release_tears_down_and_later_use_recreates() {
        let built = Arc::new(AtomicUsize::new(0));
        let scoped = counting_source(built.clone());
        let scope = StepScopeId::new();

        let mut reader = scoped.bind(scope);
        assert_eq!(reader.read().await.unwrap(), Some(10));

        assert!(scoped.release(scope).is_some());
        assert_eq!(scoped.active_scopes(), 0);
        assert!(scoped.release(scope).is_none());

        // The scope is fresh again: a new instance starts from the beginning.
        assert_eq!(reader.read().await.unwrap(), Some(10));
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }
}
