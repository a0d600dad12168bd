// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Violation types for `GuardedStack`.
//!
//! Every variant is fatal when raised by an operation; these types exist so the
//! panic message, the dump, and [`GuardedStack::check`](crate::GuardedStack::check)
//! can name *what* went wrong. They are `Copy` and implement `core::error::Error`.

// Core imports
use core::{error::Error as CoreError, fmt};

/// Which integrity check failed.
///
/// Variants are listed in the order the predicate evaluates them; the first
/// failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Corruption {
    /// The leading guard word no longer holds the sentinel.
    BeginGuard,
    /// The trailing guard word no longer holds the sentinel.
    EndGuard,
    /// The stored size exceeds the capacity.
    SizeOutOfRange { size: usize, capacity: usize },
    /// A vacant slot does not match the poison pattern.
    Poison { slot: usize },
    /// The stored checksum disagrees with the current byte image.
    Checksum { stored: u32, computed: u32 },
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeginGuard => f.write_str("begin guard corrupted"),
            Self::EndGuard => f.write_str("end guard corrupted"),
            Self::SizeOutOfRange { size, capacity } => {
                write!(f, "size {size} exceeds capacity {capacity}")
            }
            Self::Poison { slot } => write!(f, "vacant slot {slot} is not poisoned"),
            Self::Checksum { stored, computed } => {
                write!(f, "checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")
            }
        }
    }
}

impl CoreError for Corruption {}

/// A contract breach detected by a [`GuardedStack`](crate::GuardedStack) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Violation {
    /// The object's own state failed the integrity predicate.
    Corrupted(Corruption),
    /// A push was attempted at `size == N`.
    Full,
    /// A pop or top was attempted on an empty stack.
    Empty,
    /// An element access named an index outside the live prefix.
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted(c) => write!(f, "integrity check failed: {c}"),
            Self::Full => f.write_str("capacity exceeded"),
            Self::Empty => f.write_str("stack is empty"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (size {len})")
            }
        }
    }
}

impl CoreError for Violation {
    fn source(&self) -> Option<&(dyn CoreError + 'static)> {
        match self {
            Self::Corrupted(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Corruption> for Violation {
    fn from(c: Corruption) -> Self {
        Self::Corrupted(c)
    }
}
