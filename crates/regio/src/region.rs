//! Region handles naming carved-out byte ranges.
//!
//! A [`Region`] is an offset/length pair relative to the arena's storage
//! origin. It is the stable analog of a pointer into the buffer: the range
//! it names stays resolvable until the arena's next reset, after which
//! resolving it panics (the bytes are logically released).

use std::fmt;

/// A carved-out byte range within an arena.
///
/// Regions are produced by the `alloc` family and resolved back to byte
/// slices through the arena that issued them (`Arena::bytes`/`bytes_mut`,
/// or the copy accessors on `ConcurrentArena`). Offsets are relative to
/// the storage origin, so a region's alignment is `offset % align`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Region {
    /// Byte offset from the storage origin.
    pub(crate) offset: usize,
    /// Length of the range in bytes.
    pub(crate) len: usize,
}

impl Region {
    /// Create a new region handle.
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Byte offset from the storage origin.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length region.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the range, relative to the storage origin.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region(off={}, len={})", self.offset, self.len)
    }
}
