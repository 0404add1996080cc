//! Single-owner bump arena over a fixed-capacity buffer.
//!
//! An [`Arena`] carves regions out of one contiguous byte buffer by
//! advancing a `used` cursor. Nothing is freed individually — reclamation
//! is bulk-only, via [`Arena::reset`] or the scope guards returned by
//! [`Arena::scoped_reset`] and [`Arena::scoped_restore`].

use std::fmt;
use std::mem;

use crate::bump;
use crate::error::ArenaError;
use crate::region::Region;
use crate::scope::ScopeGuard;
use crate::source::{HeapSource, MemorySource};

/// Bytes reserved at the front of every backing buffer for arena bookkeeping.
///
/// The bookkeeping itself (the `used` and `capacity` words) lives in the
/// [`Arena`] struct rather than being written into the buffer, but the
/// prefix stays reserved so that a buffer of `n` bytes always yields a
/// capacity of `n - HEADER_SIZE` and construction fails when the buffer
/// cannot hold even the prefix.
pub const HEADER_SIZE: usize = 2 * mem::size_of::<u64>();

/// Default region alignment: the strictest alignment of the primitive
/// types on the supported 64-bit targets.
pub const DEFAULT_ALIGN: usize = 16;

/// A single-owner bump allocator over a fixed-capacity byte buffer.
///
/// The arena is built either over caller-supplied memory
/// ([`Arena::with_memory`]) or over a buffer acquired from a
/// [`MemorySource`] ([`Arena::with_capacity`], [`Arena::with_capacity_in`]).
/// The buffer is never reallocated, so [`Region`] offsets stay stable for
/// the arena's lifetime.
///
/// All mutation goes through `&mut self`, so the arena is single-threaded
/// by construction. For concurrent allocation see
/// [`ConcurrentArena`](crate::ConcurrentArena).
pub struct Arena {
    /// Bump cursor: bytes carved out so far. Invariant: `used <= capacity`.
    used: usize,
    /// Usable bytes past the reserved header prefix.
    capacity: usize,
    /// Backing buffer, `HEADER_SIZE + capacity` bytes.
    storage: Vec<u8>,
    /// Where the buffer goes back to on drop. `None` for wrapped memory.
    source: Option<Box<dyn MemorySource>>,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("used", &self.used)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl Arena {
    /// Wrap caller-supplied memory as an arena.
    ///
    /// The first [`HEADER_SIZE`] bytes of the buffer are reserved; the rest
    /// is allocatable capacity. Fails with
    /// [`ArenaError::InsufficientMemory`] when the buffer cannot hold even
    /// the reserved prefix.
    ///
    /// The buffer is owned by the arena for its lifetime. Dropping a
    /// wrapped arena simply drops the buffer; use [`Arena::into_memory`]
    /// to reclaim it instead.
    pub fn with_memory(memory: Vec<u8>) -> Result<Self, ArenaError> {
        if memory.len() <= HEADER_SIZE {
            return Err(ArenaError::InsufficientMemory {
                provided: memory.len(),
                header: HEADER_SIZE,
            });
        }
        Ok(Self {
            used: 0,
            capacity: memory.len() - HEADER_SIZE,
            storage: memory,
            source: None,
        })
    }

    /// Build a self-managed arena with `capacity` allocatable bytes,
    /// acquiring the buffer from the default [`HeapSource`].
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::with_capacity_in(capacity, Box::new(HeapSource))
    }

    /// Build a self-managed arena with `capacity` allocatable bytes,
    /// acquiring `HEADER_SIZE + capacity` bytes from `source`.
    ///
    /// The buffer is returned to `source` when the arena is dropped.
    /// Acquisition failure surfaces as [`ArenaError::SourceExhausted`];
    /// a zero `capacity` fails with [`ArenaError::InsufficientMemory`]
    /// because the buffer holds nothing beyond the reserved prefix.
    pub fn with_capacity_in(
        capacity: usize,
        source: Box<dyn MemorySource>,
    ) -> Result<Self, ArenaError> {
        let len = match HEADER_SIZE.checked_add(capacity) {
            Some(len) => len,
            None => return Err(ArenaError::SourceExhausted { requested: capacity }),
        };
        let memory = match source.acquire(len) {
            Some(memory) => memory,
            None => return Err(ArenaError::SourceExhausted { requested: len }),
        };
        if memory.len() <= HEADER_SIZE {
            // A failed wrap must still hand the buffer back to its source.
            let provided = memory.len();
            source.release(memory);
            return Err(ArenaError::InsufficientMemory {
                provided,
                header: HEADER_SIZE,
            });
        }
        let mut arena = Self::with_memory(memory)?;
        arena.source = Some(source);
        Ok(arena)
    }

    /// Carve out `size` bytes at the [`DEFAULT_ALIGN`] alignment.
    pub fn alloc(&mut self, size: usize) -> Result<Region, ArenaError> {
        self.alloc_aligned(size, DEFAULT_ALIGN)
    }

    /// Carve out `size` bytes aligned to `align` relative to the storage
    /// origin.
    ///
    /// The bound check is conservative: the request is rejected whenever
    /// `used + size + align > capacity`, even if the exact padding needed
    /// would let it fit (see [`ArenaError::CapacityExceeded`]). Failure
    /// leaves `used` unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `align` is zero or not a power of two.
    pub fn alloc_aligned(&mut self, size: usize, align: usize) -> Result<Region, ArenaError> {
        match bump::reserve(self.used, self.capacity, size, align) {
            Some(r) => {
                self.used = r.new_used;
                Ok(Region::new(r.offset, size))
            }
            None => Err(ArenaError::CapacityExceeded {
                requested: size,
                remaining: self.capacity - self.used,
            }),
        }
    }

    /// Resolve a region to a shared byte slice.
    ///
    /// # Panics
    ///
    /// Panics if the region extends past the currently carved-out range —
    /// in particular, if the arena has been reset since the region was
    /// allocated.
    pub fn bytes(&self, region: Region) -> &[u8] {
        assert!(
            region.end() <= self.used,
            "{region} outside the carved-out range (used = {})",
            self.used
        );
        let start = HEADER_SIZE + region.offset;
        &self.storage[start..start + region.len]
    }

    /// Resolve a region to a mutable byte slice.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Arena::bytes`].
    pub fn bytes_mut(&mut self, region: Region) -> &mut [u8] {
        assert!(
            region.end() <= self.used,
            "{region} outside the carved-out range (used = {})",
            self.used
        );
        let start = HEADER_SIZE + region.offset;
        &mut self.storage[start..start + region.len]
    }

    /// Release everything: set the cursor back to zero.
    ///
    /// All previously returned regions become unresolvable. Idempotent.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Return a guard that resets the arena to empty when dropped.
    ///
    /// Everything allocated while the guard is alive (and everything
    /// allocated before it) is released on scope exit, normal or early.
    pub fn scoped_reset(&mut self) -> ScopeGuard<'_> {
        ScopeGuard::new(self, 0)
    }

    /// Return a guard that rewinds the arena to its current cursor when
    /// dropped.
    ///
    /// This is a checkpoint: allocations made while the guard is alive are
    /// released on scope exit, while everything allocated before it
    /// survives. Guards nest; the innermost drops first and each outer
    /// guard still restores the mark it captured.
    pub fn scoped_restore(&mut self) -> ScopeGuard<'_> {
        let mark = self.used;
        ScopeGuard::new(self, mark)
    }

    /// Bytes carved out so far.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total allocatable bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes not yet carved out.
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Consume the arena and hand back the full backing buffer, including
    /// the reserved header prefix.
    ///
    /// This is how a caller reclaims memory it supplied via
    /// [`Arena::with_memory`]. For a source-backed arena it detaches the
    /// buffer from the source instead of releasing it.
    pub fn into_memory(mut self) -> Vec<u8> {
        self.source = None;
        mem::take(&mut self.storage)
    }

    pub(crate) fn set_used(&mut self, mark: usize) {
        self.used = mark;
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        if let Some(source) = self.source.take() {
            source.release(mem::take(&mut self.storage));
        }
    }
}
