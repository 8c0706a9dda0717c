// Adapter module for the item-stream lifecycle
//
// This module adapts the simplified delegate shapes (simple pull reader,
// iterator, iterable, asynchronous stream, processor, writer) to the host
// four-call lifecycle. The push-to-pull stream bridge lives here as well; it
// is the only component with real sequencing state, everything else is
// lifecycle forwarding.

pub mod bridge;
pub mod delegates;
pub mod factory;
pub mod iterable_reader;
pub mod iterator_reader;
pub mod processor;
pub mod simple_reader;
pub mod state;
pub mod stream_reader;
pub mod writer;

// Re-export main types for convenient access
pub use bridge::StreamBridge;
pub use delegates::{
    IterableReaderDelegate, IteratorReaderDelegate, ProcessorDelegate, SimpleReaderDelegate,
    StreamReaderDelegate, WriterDelegate,
};
pub use iterable_reader::IterableReaderAdapter;
pub use iterator_reader::IteratorReaderAdapter;
pub use processor::ProcessorAdapter;
pub use simple_reader::SimpleReaderAdapter;
pub use state::StreamState;
pub use stream_reader::StreamReaderAdapter;
pub use writer::WriterAdapter;
