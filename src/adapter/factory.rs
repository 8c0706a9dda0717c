//! # Adapter Factory
//!
//! Constructor functions selecting the adapter for a supplied delegate shape.
//! Pure wiring: each function pairs one delegate trait with its adapter type.
//!
//! Readers built here are plain per-caller instances. To get one instance per
//! processing scope instead, hand a factory closure to
//! [`StepScopeReader`](crate::scope::StepScopeReader):
//!
//! ```rust
//! use async_trait::async_trait;
//! use itemstream::adapter::factory;
//! use itemstream::adapter::delegates::IteratorReaderDelegate;
//! use itemstream::scope::StepScopeReader;
//! use itemstream::ExecutionContext;
//!
//! struct Numbers;
//!
//! #[async_trait]
//! impl IteratorReaderDelegate for Numbers {
//!     type Item = i64;
//!     type Iter = std::ops::Range<i64>;
//!
//!     fn read_iterator(&mut self, _context: &mut ExecutionContext) -> Self::Iter {
//!         0..100
//!     }
//! }
//!
//! let scoped = StepScopeReader::new(|| factory::iterator_reader(Numbers));
//! # let _ = scoped;
//! ```

use crate::adapter::delegates::{
    IterableReaderDelegate, IteratorReaderDelegate, ProcessorDelegate, SimpleReaderDelegate,
    StreamReaderDelegate, WriterDelegate,
};
use crate::adapter::iterable_reader::IterableReaderAdapter;
use crate::adapter::iterator_reader::IteratorReaderAdapter;
use crate::adapter::processor::ProcessorAdapter;
use crate::adapter::simple_reader::SimpleReaderAdapter;
use crate::adapter::stream_reader::StreamReaderAdapter;
use crate::adapter::writer::WriterAdapter;
use crate::config::AdapterConfig;

/// Adapt a push-style stream delegate to the item-stream reader lifecycle.
pub fn stream_reader<D: StreamReaderDelegate>(delegate: D) -> StreamReaderAdapter<D> {
    StreamReaderAdapter::new(delegate)
}

/// [`stream_reader`] with an explicit handoff capacity and reopen policy.
pub fn stream_reader_with_config<D: StreamReaderDelegate>(
    delegate: D,
    config: AdapterConfig,
) -> StreamReaderAdapter<D> {
    StreamReaderAdapter::with_config(delegate, config)
}

/// Adapt an iterator-producing delegate to the item-stream reader lifecycle.
pub fn iterator_reader<D: IteratorReaderDelegate>(delegate: D) -> IteratorReaderAdapter<D> {
    IteratorReaderAdapter::new(delegate)
}

/// [`iterator_reader`] with an explicit reopen policy.
pub fn iterator_reader_with_config<D: IteratorReaderDelegate>(
    delegate: D,
    config: AdapterConfig,
) -> IteratorReaderAdapter<D> {
    IteratorReaderAdapter::with_config(delegate, config)
}

/// Adapt an iterable-producing delegate to the item-stream reader lifecycle.
pub fn iterable_reader<D: IterableReaderDelegate>(delegate: D) -> IterableReaderAdapter<D> {
    IterableReaderAdapter::new(delegate)
}

/// [`iterable_reader`] with an explicit reopen policy.
pub fn iterable_reader_with_config<D: IterableReaderDelegate>(
    delegate: D,
    config: AdapterConfig,
) -> IterableReaderAdapter<D> {
    IterableReaderAdapter::with_config(delegate, config)
}

/// Adapt a pull-style delegate to the item-stream reader lifecycle.
pub fn simple_reader<D: SimpleReaderDelegate>(delegate: D) -> SimpleReaderAdapter<D> {
    SimpleReaderAdapter::new(delegate)
}

/// Adapt a processing delegate to the item-processor contract.
pub fn processor<D: ProcessorDelegate>(delegate: D) -> ProcessorAdapter<D> {
    ProcessorAdapter::new(delegate)
}

/// Adapt a chunk-writing delegate to the item-stream writer lifecycle.
pub fn writer<D: WriterDelegate>(delegate: D) -> WriterAdapter<D> {
    WriterAdapter::new(delegate)
}
