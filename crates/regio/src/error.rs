//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur when building or allocating from an arena.
///
/// Every failure is recoverable: no operation panics, and a failed
/// allocation leaves the arena's state exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The provided buffer cannot hold even the reserved bookkeeping prefix.
    InsufficientMemory {
        /// Number of bytes provided.
        provided: usize,
        /// Number of bytes reserved for bookkeeping ([`HEADER_SIZE`](crate::HEADER_SIZE)).
        header: usize,
    },
    /// The request (including conservative alignment slack) does not fit in
    /// the arena's remaining capacity.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still unused in the arena at the time of the request.
        remaining: usize,
    },
    /// The backing memory source could not supply a buffer.
    SourceExhausted {
        /// Number of bytes requested from the source.
        requested: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientMemory { provided, header } => {
                write!(
                    f,
                    "buffer of {provided} bytes cannot hold the {header}-byte arena header"
                )
            }
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::SourceExhausted { requested } => {
                write!(f, "memory source could not supply {requested} bytes")
            }
        }
    }
}

impl Error for ArenaError {}
