// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The poison pattern written into vacant slots.
//!
//! The pattern is a policy: any type implementing [`Poison`] can be the third
//! parameter of [`GuardedStack`](crate::GuardedStack). The default,
//! [`Alphabet`], sets byte `i` of a slot to `b'a' + i % 26`, a
//! lowercase-alphabet ramp. It is a pure function of the position, so a slot
//! of any size gets the same prefix, and it is neither all-zero nor all-ones,
//! which keeps it from aliasing the values real data most often holds.

/// A byte pattern that marks a slot as vacant.
///
/// Only [`byte`](Poison::byte) is required:
///
/// ```rust
/// use guarded_stack::{GuardedStack, Poison};
///
/// struct Stripes;
///
/// impl Poison for Stripes {
///     fn byte(i: usize) -> u8 {
///         if i % 2 == 0 { 0xA5 } else { 0x5A }
///     }
/// }
///
/// let mut s: GuardedStack<u32, 4, Stripes> = GuardedStack::new();
/// s.push(7);
/// assert!(s.is_ok());
/// ```
pub trait Poison {
    /// Poison byte for position `i` within a slot.
    fn byte(i: usize) -> u8;

    /// Overwrites `slot` with the pattern.
    #[inline]
    fn fill(slot: &mut [u8]) {
        for (i, b) in slot.iter_mut().enumerate() {
            *b = Self::byte(i);
        }
    }

    /// Returns `true` if `slot` holds exactly the pattern.
    #[inline]
    fn matches(slot: &[u8]) -> bool {
        slot.iter().enumerate().all(|(i, &b)| b == Self::byte(i))
    }
}

/// The default pattern: `abc...xyzabc...`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alphabet;

impl Poison for Alphabet {
    #[inline]
    fn byte(i: usize) -> u8 {
        b'a' + (i % 26) as u8
    }
}
