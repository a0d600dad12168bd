// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Iteration over the live values of a [`GuardedStack`](crate::GuardedStack).
//!
//! Iterators borrow the stack shared, so nothing can mutate it while they are
//! alive; the integrity check therefore runs once, when the iterator is made.

// Crate imports
use crate::{poison::Poison, render::Render, report::Phase, stack::GuardedStack};

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// Iterates the live values from bottom to top.
    ///
    /// # Panics
    ///
    /// After dumping the stack, if the integrity check fails.
    #[track_caller]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.verify("iter", Phase::Entry);
        self.buf[..self.size].iter()
    }
}

impl<'a, T: Render, const N: usize, P: Poison> IntoIterator for &'a GuardedStack<T, N, P> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    #[track_caller]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
