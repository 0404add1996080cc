//! Pluggable backing memory sources.
//!
//! Arenas built with `with_capacity_in` acquire their storage from a
//! [`MemorySource`] and hand it back on drop. The default [`HeapSource`]
//! uses the global allocator; tests inject fallible or counting sources to
//! exercise acquisition failure and verify reclamation.

/// Supplies and reclaims the raw buffers that arenas are built over.
///
/// The trait is object-safe so a source can be passed as
/// `Box<dyn MemorySource>` at construction. `acquire` must return a buffer
/// of exactly `len` bytes; returning `None` signals that the source cannot
/// supply the request, which surfaces to the caller as
/// [`ArenaError::SourceExhausted`](crate::ArenaError::SourceExhausted).
pub trait MemorySource {
    /// Acquire a zero-initialised buffer of exactly `len` bytes.
    fn acquire(&self, len: usize) -> Option<Vec<u8>>;

    /// Take back a buffer previously handed out by [`MemorySource::acquire`].
    fn release(&self, memory: Vec<u8>);
}

/// The default source: buffers come from the global allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapSource;

impl MemorySource for HeapSource {
    fn acquire(&self, len: usize) -> Option<Vec<u8>> {
        Some(vec![0u8; len])
    }

    fn release(&self, memory: Vec<u8>) {
        drop(memory);
    }
}
