//! Scope guards that rewind an arena on drop.
//!
//! A [`ScopeGuard`] pairs a mutable borrow of an [`Arena`] with a restore
//! mark. When the guard goes out of scope — normally or via an early
//! return — it sets the arena's cursor back to that mark, releasing every
//! allocation made past it.

use std::ops::{Deref, DerefMut};

use crate::arena::Arena;

/// Move-only guard that rewinds an [`Arena`] to a captured mark on drop.
///
/// Created by [`Arena::scoped_reset`] (mark 0: everything is temporary)
/// and [`Arena::scoped_restore`] (mark = the cursor at guard creation: a
/// checkpoint). The guard holds the arena's only mutable borrow, so there
/// can be just one guard per scope and no second handle racing to rewind;
/// allocation inside the scope goes through the guard via deref.
///
/// Guards nest. The innermost guard drops first, and each outer guard
/// still restores the mark it captured, because the cursor only moves
/// forward between a guard's creation and its drop.
///
/// The restore runs exactly once: the guard cannot be copied, and moving
/// it leaves nothing behind to drop.
#[must_use]
pub struct ScopeGuard<'a> {
    arena: &'a mut Arena,
    restore: usize,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn new(arena: &'a mut Arena, restore: usize) -> Self {
        Self { arena, restore }
    }

    /// The mark the arena will be rewound to when this guard drops.
    pub fn restore_mark(&self) -> usize {
        self.restore
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.arena.set_used(self.restore);
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        self.arena
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Arena {
        self.arena
    }
}
