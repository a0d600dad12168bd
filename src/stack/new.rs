// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    poison::Poison,
    render::Render,
    report::Phase,
    stack::{GuardedStack, CANARY},
};

// Core imports
use core::marker::PhantomData;

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// Constructs an empty stack: guards set, every slot poisoned, checksum sealed.
    #[track_caller]
    pub fn new() -> Self {
        let mut s = Self {
            begin_guard: CANARY,
            size: 0,
            buf: [T::zeroed(); N],
            checksum: 0,
            end_guard: CANARY,
            _policy: PhantomData,
        };
        for slot in &mut s.buf {
            P::fill(bytemuck::bytes_of_mut(slot));
        }
        s.seal();
        s.verify("new", Phase::Exit);
        s
    }
}

impl<T: Render, const N: usize, P: Poison> Default for GuardedStack<T, N, P> {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        poison::{Alphabet, Poison},
        stack::CANARY,
        GuardedStack,
    };

    #[test]
    fn test_new_poisons_every_slot() {
        let mut s: GuardedStack<u64, 5> = GuardedStack::new();
        assert_eq!(s.begin_guard, CANARY);
        assert_eq!(s.end_guard, CANARY);
        for i in 0..5 {
            assert!(Alphabet::matches(s.tamper().slot(i)), "slot {i}");
        }
        assert_eq!(s.checksum, s.compute_checksum());
    }
}
