// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `GuardedStack` type and its inherent API.
//!
//! Operations live one family per file under `stack/`; this module holds the
//! type itself, the cheap accessors, and the trait impls.

mod checksum;
mod data;
mod dump;
mod integrity;
mod new;
mod pop;
mod push;
#[cfg(any(test, feature = "fault-injection"))]
mod tamper;

pub use dump::Report;
#[cfg(any(test, feature = "fault-injection"))]
pub use tamper::Tamper;

// Crate imports
use crate::{
    poison::{Alphabet, Poison},
    render::{rendered, Render},
    report::Phase,
};

// Core imports
use core::{fmt, marker::PhantomData};

/// Sentinel held by both guard words for the whole life of a stack.
pub const CANARY: u64 = 0xDEAD_BEEF_CACE_D426;

/// A fixed-capacity stack that checks its own integrity around every operation.
///
/// `GuardedStack<T, N>` stores up to `N` values inline and tracks a logical
/// size `0..=N`. Around that storage it keeps:
///
/// - two guard words holding [`CANARY`], one before and one after every other
///   field;
/// - the poison pattern `P` (see [`Poison`]) in every slot at or beyond
///   `size`;
/// - a CRC-32 over the logical byte image of all fields, with the checksum
///   field itself read as zero.
///
/// Every operation runs [`check`](GuardedStack::check) before it starts, and
/// mutating operations run it again after resealing the checksum. Any failure,
/// and any misuse (push on full, pop/top on empty, out-of-range access), prints
/// a full dump and panics. None of the operations returns a recoverable error.
///
/// # Value types
///
/// `T` must be [`Render`], which implies [`bytemuck::Pod`]: every bit pattern
/// is a valid value and there are no padding bytes. That is what lets vacant
/// slots carry a raw byte pattern and lets the dump render a slot whatever its
/// bytes are, all without `unsafe`.
///
/// # Copying
///
/// `GuardedStack` is neither `Copy` nor `Clone`. A duplicated byte image would
/// carry the guards and checksum of the original as if they were its own.
///
/// # Examples
///
/// ```rust
/// use guarded_stack::GuardedStack;
///
/// let mut s: GuardedStack<i32, 4> = GuardedStack::new();
/// s.push(1);
/// s.push(2);
/// assert_eq!(*s.top(), 2);
/// assert_eq!(s.pop(), 2);
/// assert_eq!(s.size(), 1);
/// assert!(s.is_ok());
/// ```
#[repr(C)]
pub struct GuardedStack<T: Render, const N: usize, P: Poison = Alphabet> {
    pub(crate) begin_guard: u64,
    pub(crate) size: usize,
    pub(crate) buf: [T; N],
    pub(crate) checksum: u32,
    pub(crate) end_guard: u64,
    pub(crate) _policy: PhantomData<P>,
}

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// The fixed capacity of this stack.
    pub const CAPACITY: usize = N;

    /// Returns the capacity of this stack (always `N`).
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if the stack holds no values.
    #[inline]
    #[track_caller]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns `true` if the stack holds `N` values.
    #[inline]
    #[track_caller]
    pub fn is_full(&self) -> bool {
        self.size() == N
    }

    /// The live prefix, clamped so a corrupted size cannot index past `N`.
    pub(crate) fn live(&self) -> &[T] {
        &self.buf[..self.size.min(N)]
    }
}

impl<T: Render, const N: usize, P: Poison> fmt::Debug for GuardedStack<T, N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedStack")
            .field("size", &self.size)
            .field("elements", &DebugLive(self.live()))
            .finish()
    }
}

struct DebugLive<'a, T>(&'a [T]);

impl<T: Render> fmt::Debug for DebugLive<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(rendered)).finish()
    }
}

/// Checks the stack one last time as it goes out of scope.
///
/// `drop` cannot be `#[track_caller]`, so a failure here is reported as the
/// `drop` op at this impl rather than at the scope that dropped the stack.
impl<T: Render, const N: usize, P: Poison> Drop for GuardedStack<T, N, P> {
    fn drop(&mut self) {
        // A second panic while unwinding would abort and bury the first report.
        if std::thread::panicking() {
            return;
        }
        self.verify("drop", Phase::Entry);
    }
}
