//! # Item Stream Lifecycle Interface
//!
//! The standard four-call batch-item lifecycle implemented by every adapted
//! reader and writer in this crate:
//!
//! - `open(context)` - Materialize the underlying source, exactly once before
//!   reading
//! - `read()` - Pull the next item, or `None` once the source is exhausted
//!   (the end sentinel)
//! - `update(context)` - Record checkpoint progress; callable at any point
//! - `close()` - Release the source; idempotent
//!
//! A chunk-oriented step drives a reader through `open → read* → update* →
//! close`, hands each item to an [`ItemProcessor`], and flushes accumulated
//! items to an [`ItemWriter`] one [`Chunk`] at a time.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::error::Result;

/// Lifecycle half of the item-stream contract.
///
/// All methods default to no-ops so sourceless implementations only override
/// what they need.
#[async_trait]
pub trait ItemStream: Send {
    /// Materialize the underlying source. Called exactly once before any
    /// `read`, with restart state available in `context`.
    async fn open(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Record progress into `context` for checkpointing. Independent of read
    /// progress; may be called before any read and after completion.
    async fn update(&mut self, _context: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Release the underlying source. Implementations must be idempotent.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Pull-based reading half of the item-stream contract.
#[async_trait]
pub trait ItemReader<T>: Send {
    /// Return the next item, or `None` once the source signals completion.
    ///
    /// Once `None` has been returned, further calls keep returning `None`
    /// without re-entering the source.
    async fn read(&mut self) -> Result<Option<T>>;
}

/// Item transformation between read and write.
#[async_trait]
pub trait ItemProcessor<I, O>: Send {
    /// Transform one item. Returning `None` filters the item out of the
    /// chunk.
    async fn process(&mut self, item: I) -> Result<Option<O>>;
}

/// Chunk-writing half of the item-stream contract.
#[async_trait]
pub trait ItemWriter<T>: Send {
    /// Write one accumulated chunk of items.
    async fn write(&mut self, chunk: Chunk<T>) -> Result<()>;
}

/// A reader that also participates in the open/update/close lifecycle.
pub trait ItemStreamReader<T>: ItemStream + ItemReader<T> {}

impl<T, R> ItemStreamReader<T> for R where R: ItemStream + ItemReader<T> + ?Sized {}

/// A writer that also participates in the open/update/close lifecycle.
pub trait ItemStreamWriter<T>: ItemStream + ItemWriter<T> {}

impl<T, W> ItemStreamWriter<T> for W where W: ItemStream + ItemWriter<T> + ?Sized {}

/// An owned batch of items handed to an [`ItemWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk<T> {
    items: Vec<T>,
}

impl<T> Chunk<T> {
    /// Create a chunk from already-collected items.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Append one item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Borrow the items in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the chunk, yielding its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items in the chunk.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the chunk holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Chunk<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Chunk<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Chunk<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Chunk<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Chunk<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
