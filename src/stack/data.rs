// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::Violation,
    poison::Poison,
    render::Render,
    report::{Phase, Site},
    stack::GuardedStack,
};

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// Returns the number of live values.
    ///
    /// # Panics
    ///
    /// After dumping the stack, if the integrity check fails.
    #[track_caller]
    pub fn size(&self) -> usize {
        self.verify("size", Phase::Entry);
        self.size
    }

    /// Returns the top value without removing it.
    ///
    /// # Panics
    ///
    /// After dumping the stack, if the integrity check fails or the stack is empty.
    #[track_caller]
    pub fn top(&self) -> &T {
        self.verify("top", Phase::Entry);
        if self.size == 0 {
            self.fail(Site::caller("top", Phase::Entry), Violation::Empty);
        }
        &self.buf[self.size - 1]
    }

    /// Returns the value at `index`, counted from the bottom.
    ///
    /// # Panics
    ///
    /// After dumping the stack, if the integrity check fails or `index >= size`.
    #[track_caller]
    pub fn data(&self, index: usize) -> &T {
        self.verify("data", Phase::Entry);
        if index >= self.size {
            let violation = Violation::OutOfBounds { index, len: self.size };
            self.fail(Site::caller("data", Phase::Entry), violation);
        }
        &self.buf[index]
    }
}
