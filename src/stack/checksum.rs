// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{poison::Poison, render::Render, stack::GuardedStack};

// External imports - crc32fast
use crc32fast::Hasher;

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// CRC-32 over every field in declaration order, the checksum field read as zero.
    ///
    /// The object's address is deliberately not part of the input: Rust moves
    /// values bitwise, and a moved stack is still the same, valid stack.
    pub(crate) fn compute_checksum(&self) -> u32 {
        let mut h = Hasher::new();
        h.update(bytemuck::bytes_of(&self.begin_guard));
        h.update(bytemuck::bytes_of(&self.size));
        for slot in &self.buf {
            h.update(bytemuck::bytes_of(slot));
        }
        h.update(&[0u8; core::mem::size_of::<u32>()]);
        h.update(bytemuck::bytes_of(&self.end_guard));
        h.finalize()
    }

    /// Stores a fresh checksum. Only mutating operations call this.
    #[inline]
    pub(crate) fn seal(&mut self) {
        self.checksum = self.compute_checksum();
    }
}

#[cfg(test)]
mod tests {
    use crate::GuardedStack;

    #[test]
    fn test_checksum_ignores_its_own_field() {
        let mut s: GuardedStack<u32, 4> = GuardedStack::new();
        let sum = s.compute_checksum();
        s.tamper().checksum().fill(0xee);
        assert_eq!(s.compute_checksum(), sum);
        s.tamper().reseal();
    }

    #[test]
    fn test_every_single_bit_flip_changes_checksum() {
        let mut s: GuardedStack<u16, 3> = GuardedStack::new();
        s.push(0x1234);
        let sum = s.compute_checksum();
        for byte in 0..6 {
            for bit in 0..8 {
                s.tamper().slot(byte / 2)[byte % 2] ^= 1 << bit;
                assert_ne!(s.compute_checksum(), sum, "byte {byte} bit {bit}");
                s.tamper().slot(byte / 2)[byte % 2] ^= 1 << bit;
            }
        }
        for bit in 0..8 {
            s.tamper().size()[0] ^= 1 << bit;
            assert_ne!(s.compute_checksum(), sum, "size bit {bit}");
            s.tamper().size()[0] ^= 1 << bit;
        }
        assert_eq!(s.compute_checksum(), sum);
    }

    #[test]
    fn test_moved_stack_keeps_valid_checksum() {
        let mut s: GuardedStack<i8, 4> = GuardedStack::new();
        s.push(-1);
        let boxed = Box::new(s);
        assert!(boxed.is_ok());
        assert_eq!(*boxed.top(), -1);
    }
}
