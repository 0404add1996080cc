//! Mutex-guarded arena with reference-counted reset.
//!
//! A [`ConcurrentArena`] runs the same bump step as
//! [`Arena`](crate::Arena), but every operation is a single critical
//! section under one mutex, so any number of threads may allocate
//! simultaneously. There is no explicit reset: callers hold an
//! [`ArenaRef`] while they need the current contents, and dropping the
//! last outstanding reference rewinds the cursor to zero for the next
//! round of allocations.

use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, PoisonError};

use crate::arena::{DEFAULT_ALIGN, HEADER_SIZE};
use crate::bump;
use crate::error::ArenaError;
use crate::region::Region;
use crate::source::{HeapSource, MemorySource};

/// Inner state. Every field is accessed only while holding the mutex.
struct State {
    /// Bump cursor. Reset to 0 exactly when `ref_count` goes 1 → 0.
    used: usize,
    /// Usable bytes past the reserved header prefix.
    capacity: usize,
    /// Backing buffer, `HEADER_SIZE + capacity` bytes.
    storage: Vec<u8>,
    /// Outstanding [`ArenaRef`] handles.
    ref_count: usize,
    /// Where the buffer goes back to on drop. `None` for wrapped memory.
    source: Option<Box<dyn MemorySource + Send>>,
}

/// A bump allocator safe for simultaneous allocation from many threads.
///
/// Construction builds the mutex before the value can be shared, so no
/// operation can ever observe an uninitialised lock. The mutex's
/// happens-before relation totally orders all allocations and reference
/// count changes; two concurrent `alloc` calls never receive overlapping
/// regions.
///
/// Regions are read and written through the copy accessors
/// ([`ConcurrentArena::write_bytes`], [`ConcurrentArena::read_bytes`]),
/// which also run under the mutex.
pub struct ConcurrentArena {
    state: Mutex<State>,
}

// Compile-time assertion: ConcurrentArena must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<ConcurrentArena>();
};

impl fmt::Debug for ConcurrentArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentArena").finish_non_exhaustive()
    }
}

impl ConcurrentArena {
    /// Wrap caller-supplied memory, with the same layout and failure
    /// semantics as [`Arena::with_memory`](crate::Arena::with_memory).
    pub fn with_memory(memory: Vec<u8>) -> Result<Self, ArenaError> {
        if memory.len() <= HEADER_SIZE {
            return Err(ArenaError::InsufficientMemory {
                provided: memory.len(),
                header: HEADER_SIZE,
            });
        }
        Ok(Self {
            state: Mutex::new(State {
                used: 0,
                capacity: memory.len() - HEADER_SIZE,
                storage: memory,
                ref_count: 0,
                source: None,
            }),
        })
    }

    /// Build a self-managed concurrent arena over the default
    /// [`HeapSource`].
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::with_capacity_in(capacity, Box::new(HeapSource))
    }

    /// Build a self-managed concurrent arena, acquiring
    /// `HEADER_SIZE + capacity` bytes from `source`.
    ///
    /// The source must be `Send` because the buffer is released from
    /// whichever thread drops the arena last.
    pub fn with_capacity_in(
        capacity: usize,
        source: Box<dyn MemorySource + Send>,
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
            let provided = memory.len();
            source.release(memory);
            return Err(ArenaError::InsufficientMemory {
                provided,
                header: HEADER_SIZE,
            });
        }
        let arena = Self::with_memory(memory)?;
        arena
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source = Some(source);
        Ok(arena)
    }

    /// Acquire a reference that keeps the arena's contents alive.
    ///
    /// Increments the reference count under the mutex, so the count can
    /// never transiently read as zero while a just-acquired handle exists,
    /// even against concurrent drops.
    pub fn acquire(arena: &Arc<ConcurrentArena>) -> ArenaRef {
        let mut state = arena.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.ref_count += 1;
        drop(state);
        ArenaRef {
            arena: Arc::clone(arena),
        }
    }

    /// Carve out `size` bytes at the [`DEFAULT_ALIGN`] alignment.
    pub fn alloc(&self, size: usize) -> Result<Region, ArenaError> {
        self.alloc_aligned(size, DEFAULT_ALIGN)
    }

    /// Carve out `size` bytes aligned to `align` relative to the storage
    /// origin.
    ///
    /// The bump step — bound check, padding, and cursor advance — runs as
    /// one critical section, identical in policy to
    /// [`Arena::alloc_aligned`](crate::Arena::alloc_aligned). Failure
    /// leaves the cursor unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `align` is zero or not a power of two.
    pub fn alloc_aligned(&self, size: usize, align: usize) -> Result<Region, ArenaError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match bump::reserve(state.used, state.capacity, size, align) {
            Some(r) => {
                state.used = r.new_used;
                Ok(Region::new(r.offset, size))
            }
            None => Err(ArenaError::CapacityExceeded {
                requested: size,
                remaining: state.capacity - state.used,
            }),
        }
    }

    /// Copy `data` into a region, under the mutex.
    ///
    /// Regions handed out by `alloc` are disjoint, so concurrent writers
    /// never observe each other's bytes.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != region.len()`, or if the region extends
    /// past the currently carved-out range (e.g. after the count-driven
    /// reset released it).
    pub fn write_bytes(&self, region: Region, data: &[u8]) {
        assert_eq!(
            data.len(),
            region.len(),
            "data length must match the region length"
        );
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(
            region.end() <= state.used,
            "{region} outside the carved-out range (used = {})",
            state.used
        );
        let start = HEADER_SIZE + region.offset;
        state.storage[start..start + region.len].copy_from_slice(data);
    }

    /// Copy a region's bytes out, under the mutex.
    ///
    /// # Panics
    ///
    /// Panics under the same range conditions as
    /// [`ConcurrentArena::write_bytes`].
    pub fn read_bytes(&self, region: Region) -> Vec<u8> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(
            region.end() <= state.used,
            "{region} outside the carved-out range (used = {})",
            state.used
        );
        let start = HEADER_SIZE + region.offset;
        state.storage[start..start + region.len].to_vec()
    }

    /// Bytes carved out so far.
    pub fn used(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .used
    }

    /// Total allocatable bytes.
    pub fn capacity(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .capacity
    }

    /// Bytes not yet carved out.
    pub fn remaining(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.capacity - state.used
    }

    /// Number of outstanding [`ArenaRef`] handles.
    pub fn ref_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .ref_count
    }
}

impl Drop for ConcurrentArena {
    fn drop(&mut self) {
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(source) = state.source.take() {
            source.release(mem::take(&mut state.storage));
        }
    }
}

/// Move-only handle that keeps a [`ConcurrentArena`]'s contents alive.
///
/// While any `ArenaRef` exists the arena will not reset. Dropping the last
/// outstanding handle rewinds the cursor to zero, so the next round of
/// allocations starts from an empty arena. Moving a handle transfers its
/// count; the count itself never changes on a move, and a moved-from
/// handle leaves nothing behind to drop.
#[must_use]
pub struct ArenaRef {
    arena: Arc<ConcurrentArena>,
}

impl ArenaRef {
    /// The arena this handle keeps alive.
    pub fn arena(&self) -> &Arc<ConcurrentArena> {
        &self.arena
    }
}

impl Drop for ArenaRef {
    fn drop(&mut self) {
        // A poisoned lock still holds a valid count and cursor.
        let mut state = self
            .arena
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.ref_count -= 1;
        if state.ref_count == 0 {
            state.used = 0;
        }
    }
}
