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
    /// Removes and returns the top value, re-poisoning its slot.
    ///
    /// # Panics
    ///
    /// After dumping the stack, if the integrity check fails before or after
    /// the removal, or if the stack is empty.
    #[track_caller]
    pub fn pop(&mut self) -> T {
        self.verify("pop", Phase::Entry);
        if self.size == 0 {
            self.fail(Site::caller("pop", Phase::Entry), Violation::Empty);
        }

        let last = self.size - 1;
        let out = self.buf[last];
        P::fill(bytemuck::bytes_of_mut(&mut self.buf[last]));
        self.size = last;
        self.seal();

        self.verify("pop", Phase::Exit);
        out
    }
}
