#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # itemstream
//!
//! Delegate adapters for step-oriented batch pipelines: plug plain iterators,
//! asynchronous streams, or simple pull readers into the standard four-call
//! item-stream lifecycle (`open`, `read`/`write`, `update`, `close`) without
//! implementing the full contract by hand.
//!
//! ## Overview
//!
//! A chunk-oriented step drives readers and writers through a fixed
//! lifecycle: `open(context)` once, `read()` until the end sentinel,
//! `update(context)` at checkpoints, `close()` at the end. Most sources are
//! naturally something simpler: an iterator, a collection, an asynchronous
//! stream, or a plain "give me the next item" function. This crate supplies
//! the delegate traits for those simpler shapes and adapters that translate
//! each of them to the full lifecycle, so delegate authors write only the
//! part that is actually theirs.
//!
//! ## Architecture
//!
//! - [`item`] - The four-call lifecycle traits ([`ItemStream`],
//!   [`ItemReader`], [`ItemProcessor`], [`ItemWriter`]) and the [`Chunk`]
//!   batch type
//! - [`adapter`] - The delegate traits, one adapter per delegate shape, and
//!   the [`StreamBridge`] that converts push-style asynchronous production
//!   into strictly sequential pulls over a bounded handoff
//! - [`scope`] - One reader instance per processing scope (step execution,
//!   partition), created lazily and torn down at end of scope
//! - [`context`] - The key-value checkpoint object threaded through
//!   lifecycle calls
//! - [`config`] - Handoff capacity and reopen policy
//! - [`error`] - Structured error handling
//! - [`logging`] - Opt-in tracing initialization
//!
//! ## Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use itemstream::adapter::factory;
//! use itemstream::adapter::delegates::IteratorReaderDelegate;
//! use itemstream::{ExecutionContext, ItemReader, ItemStream};
//!
//! struct SquareReader {
//!     upto: i64,
//! }
//!
//! #[async_trait]
//! impl IteratorReaderDelegate for SquareReader {
//!     type Item = i64;
//!     type Iter = std::vec::IntoIter<i64>;
//!
//!     fn read_iterator(&mut self, _context: &mut ExecutionContext) -> Self::Iter {
//!         (0..self.upto).map(|n| n * n).collect::<Vec<_>>().into_iter()
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let mut reader = factory::iterator_reader(SquareReader { upto: 3 });
//! let mut context = ExecutionContext::new();
//!
//! reader.open(&mut context).await.unwrap();
//! assert_eq!(reader.read().await.unwrap(), Some(0));
//! assert_eq!(reader.read().await.unwrap(), Some(1));
//! assert_eq!(reader.read().await.unwrap(), Some(4));
//! assert_eq!(reader.read().await.unwrap(), None);
//! reader.close().await.unwrap();
//! # });
//! ```
//!
//! Push-style sources go through the same lifecycle: implement
//! [`StreamReaderDelegate`](adapter::delegates::StreamReaderDelegate) and the
//! stream handed over at `open` is drained one pull at a time, in emission
//! order, with the producer held to a bounded handoff.

pub mod adapter;
pub mod config;
pub mod context;
pub mod error;
pub mod item;
pub mod logging;
pub mod scope;

pub use adapter::{
    IterableReaderAdapter, IterableReaderDelegate, IteratorReaderAdapter, IteratorReaderDelegate,
    ProcessorAdapter, ProcessorDelegate, SimpleReaderAdapter, SimpleReaderDelegate, StreamBridge,
    StreamReaderAdapter, StreamReaderDelegate, StreamState, WriterAdapter, WriterDelegate,
};
pub use config::{AdapterConfig, ReopenPolicy};
pub use context::ExecutionContext;
pub use error::{ItemStreamError, Result};
pub use item::{
    Chunk, ItemProcessor, ItemReader, ItemStream, ItemStreamReader, ItemStreamWriter, ItemWriter,
};
pub use logging::init_logging;
pub use scope::{ScopedReader, StepScopeId, StepScopeReader};
