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
    /// Pushes `value` on top.
    ///
    /// # Panics
    ///
    /// After dumping the stack, if the integrity check fails before or after
    /// the write, or if the stack is already full.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.emplace("push", move || value);
    }

    /// Pushes the value built by `make`, writing it straight into the next slot.
    ///
    /// The entry check and the capacity check both run before `make` is
    /// called. If `make` panics, the stack is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`push`](Self::push).
    #[inline]
    #[track_caller]
    pub fn push_with<F: FnOnce() -> T>(&mut self, make: F) {
        self.emplace("push_with", make);
    }

    #[track_caller]
    fn emplace<F: FnOnce() -> T>(&mut self, op: &'static str, make: F) {
        self.verify(op, Phase::Entry);
        if self.size == N {
            self.fail(Site::caller(op, Phase::Entry), Violation::Full);
        }

        self.buf[self.size] = make();
        self.size += 1;
        self.seal();

        self.verify(op, Phase::Exit);
    }
}
