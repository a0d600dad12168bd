// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte-level write access for corruption-injection harnesses.
//!
//! Safe Rust cannot scribble over a stack's fields by accident, so the only
//! corruption the integrity layer will see in practice is the kind injected
//! here on purpose. Every accessor hands out the raw bytes of one field in
//! native byte order; none of them reseals the checksum except
//! [`Tamper::reseal`].
//!
//! A stack left corrupted when it goes out of scope fails its drop-time check
//! and panics, so restore what you change.

// Crate imports
use crate::{poison::Poison, render::Render, stack::GuardedStack};

/// Raw write access to one stack's fields. See the [module docs](self).
pub struct Tamper<'a, T: Render, const N: usize, P: Poison> {
    stack: &'a mut GuardedStack<T, N, P>,
}

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// Opens the stack for deliberate corruption.
    pub fn tamper(&mut self) -> Tamper<'_, T, N, P> {
        Tamper { stack: self }
    }
}

impl<T: Render, const N: usize, P: Poison> Tamper<'_, T, N, P> {
    /// Bytes of the leading guard word.
    pub fn begin_guard(&mut self) -> &mut [u8] {
        bytemuck::bytes_of_mut(&mut self.stack.begin_guard)
    }

    /// Bytes of the size field.
    pub fn size(&mut self) -> &mut [u8] {
        bytemuck::bytes_of_mut(&mut self.stack.size)
    }

    /// Bytes of slot `i`, live or vacant.
    ///
    /// # Panics
    ///
    /// If `i >= N`.
    pub fn slot(&mut self, i: usize) -> &mut [u8] {
        bytemuck::bytes_of_mut(&mut self.stack.buf[i])
    }

    /// Bytes of the stored checksum.
    pub fn checksum(&mut self) -> &mut [u8] {
        bytemuck::bytes_of_mut(&mut self.stack.checksum)
    }

    /// Bytes of the trailing guard word.
    pub fn end_guard(&mut self) -> &mut [u8] {
        bytemuck::bytes_of_mut(&mut self.stack.end_guard)
    }

    /// Stores a checksum matching the current bytes, as if an operation had run.
    pub fn reseal(&mut self) {
        self.stack.seal();
    }
}
