//! The bump step shared by both arena variants.
//!
//! Both `Arena` and `ConcurrentArena` advance a single `used` cursor; the
//! padding and bound computation lives here so the policy exists in exactly
//! one place.

/// A successful bump reservation: the range `[offset, offset + size)` is
/// free, and the cursor should advance to `new_used`.
pub(crate) struct Reservation {
    /// Start of the reserved range, relative to the storage origin.
    pub offset: usize,
    /// Cursor value after the reservation (`offset + size`).
    pub new_used: usize,
}

/// Compute the next reservation for a `size`-byte request at `align`.
///
/// Padding is `(align - used % align) % align`, so the returned offset is a
/// multiple of `align` relative to the storage origin.
///
/// The bound check is deliberately conservative: the request is rejected
/// whenever `used + size + align > capacity`, even though the exact
/// requirement is `used + padding + size > capacity`. This gives up at most
/// one `align` of usable capacity near the boundary in exchange for a
/// branch-free bound that cannot overflow once the checked sum passes.
/// Callers may depend on the resulting failure threshold, so the policy
/// must not be tightened.
///
/// Returns `None` without any side effect when the request does not fit.
///
/// # Panics
///
/// Panics if `align` is zero or not a power of two.
pub(crate) fn reserve(used: usize, capacity: usize, size: usize, align: usize) -> Option<Reservation> {
    assert!(
        align.is_power_of_two(),
        "alignment must be a nonzero power of two, got {align}"
    );
    debug_assert!(used <= capacity);

    let worst_case = used.checked_add(size)?.checked_add(align)?;
    if worst_case > capacity {
        return None;
    }

    let padding = (align - used % align) % align;
    let offset = used + padding;
    Some(Reservation {
        offset,
        new_used: offset + size,
    })
}
