// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Index<usize>` for [`GuardedStack`](crate::GuardedStack).
//!
//! `stack[i]` is [`data(i)`](crate::GuardedStack::data): indexes count from
//! the bottom, only the live prefix `[0..size)` is reachable, and anything else
//! dumps and panics. There is no `IndexMut`; a write through it would bypass
//! the checksum.

// Crate imports
use crate::{poison::Poison, render::Render, stack::GuardedStack};

// Core imports
use core::ops::Index;

impl<T: Render, const N: usize, P: Poison> Index<usize> for GuardedStack<T, N, P> {
    type Output = T;

    #[track_caller]
    fn index(&self, i: usize) -> &Self::Output {
        self.data(i)
    }
}
