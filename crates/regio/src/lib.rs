//! Fixed-capacity region allocators with scoped and reference-counted reset.
//!
//! `regio` provides bump allocation over one contiguous, fixed-capacity
//! byte buffer: regions are carved out sequentially by advancing a single
//! cursor, and reclamation is bulk-only. There is no per-allocation
//! freeing, no chaining into further buffers, and no tracking of handed-out
//! regions — when the arena resets, every region it issued is gone.
//!
//! # Architecture
//!
//! Two independent variants share one bump step:
//!
//! ```text
//! Arena (single owner)                 ConcurrentArena (mutex-guarded)
//! ├── Vec<u8> storage                  ├── Mutex<State { used, storage, ref_count }>
//! │   (header prefix + data)           ├── ArenaRef — last drop resets used to 0
//! ├── ScopeGuard — drop rewinds used   └── write_bytes / read_bytes under the lock
//! └── bytes / bytes_mut accessors
//!          └────────── bump::reserve (shared padding + bound step) ──────────┘
//! ```
//!
//! - [`Arena`] takes `&mut self` for every mutation, so it is
//!   single-threaded by construction. Scope-bound rollback comes from
//!   [`Arena::scoped_reset`] and [`Arena::scoped_restore`].
//! - [`ConcurrentArena`] serialises every operation under one mutex and
//!   resets automatically when the last [`ArenaRef`] is dropped.
//!
//! Both are built either over caller-supplied memory (`with_memory`) or
//! over a buffer acquired from a pluggable [`MemorySource`]
//! (`with_capacity`, `with_capacity_in`).
//!
//! # Failure model
//!
//! All failures are reported as [`ArenaError`] values, never panics, and
//! never mutate state: a rejected allocation leaves the cursor exactly
//! where it was, so the caller can reset and retry, or move to a larger
//! arena.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
mod bump;
pub mod error;
pub mod region;
pub mod scope;
pub mod shared;
pub mod source;

// Public re-exports for the primary API surface.
pub use arena::{Arena, DEFAULT_ALIGN, HEADER_SIZE};
pub use error::ArenaError;
pub use region::Region;
pub use scope::ScopeGuard;
pub use shared::{ArenaRef, ConcurrentArena};
pub use source::{HeapSource, MemorySource};
