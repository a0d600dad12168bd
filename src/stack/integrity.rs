// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::{Corruption, Violation},
    poison::Poison,
    render::Render,
    report::{self, Phase, Site},
    stack::{GuardedStack, CANARY},
};

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// Runs the integrity predicate and names the first check that fails.
    ///
    /// Checks run cheapest first: begin guard, end guard, size in range, the
    /// poison scan over every vacant slot, and finally the checksum. This is a
    /// pure read; it never reseals or repairs anything, so calling it twice
    /// with nothing in between gives the same answer.
    pub fn check(&self) -> Result<(), Corruption> {
        if self.begin_guard != CANARY {
            return Err(Corruption::BeginGuard);
        }
        if self.end_guard != CANARY {
            return Err(Corruption::EndGuard);
        }
        if self.size > N {
            return Err(Corruption::SizeOutOfRange { size: self.size, capacity: N });
        }
        if let Some(slot) = self.first_unpoisoned_vacancy() {
            return Err(Corruption::Poison { slot });
        }
        let computed = self.compute_checksum();
        if computed != self.checksum {
            return Err(Corruption::Checksum { stored: self.checksum, computed });
        }
        Ok(())
    }

    /// Returns `true` if [`check`](Self::check) passes.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.check().is_ok()
    }

    /// Index of the first slot in `[size, N)` whose bytes are not poison.
    pub(crate) fn first_unpoisoned_vacancy(&self) -> Option<usize> {
        (self.size..N).find(|&i| !self.slot_is_poisoned(i))
    }

    pub(crate) fn slot_is_poisoned(&self, i: usize) -> bool {
        P::matches(bytemuck::bytes_of(&self.buf[i]))
    }

    /// Stops the caller with a dump if the predicate fails.
    #[track_caller]
    pub(crate) fn verify(&self, op: &'static str, phase: Phase) {
        if let Err(c) = self.check() {
            self.fail(Site::caller(op, phase), c.into());
        }
    }

    /// Dumps the whole object attributed to `site`, then panics with `violation`.
    pub(crate) fn fail(&self, site: Site, violation: Violation) -> ! {
        report::fatal(site, violation, &self.report_at(site, Some(violation)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Corruption, GuardedStack};

    /// Index of the least significant byte of a native `usize`.
    fn size_lsb() -> usize {
        if cfg!(target_endian = "little") {
            0
        } else {
            core::mem::size_of::<usize>() - 1
        }
    }

    fn ten_of_hundred() -> GuardedStack<i32, 100> {
        let mut s = GuardedStack::new();
        for i in 0..10 {
            s.push(i);
        }
        s
    }

    #[test]
    fn test_begin_guard_byte_is_detected() {
        let mut s = ten_of_hundred();
        let saved = s.tamper().begin_guard()[3];
        s.tamper().begin_guard()[3] = !saved;
        assert_eq!(s.check(), Err(Corruption::BeginGuard));
        s.tamper().begin_guard()[3] = saved;
        assert!(s.is_ok());
    }

    #[test]
    fn test_end_guard_byte_is_detected() {
        let mut s = ten_of_hundred();
        let saved = s.tamper().end_guard()[7];
        s.tamper().end_guard()[7] = !saved;
        assert!(!s.is_ok());
        s.tamper().end_guard()[7] = saved;
        assert!(s.is_ok());
    }

    #[test]
    fn test_vacant_slot_byte_is_detected() {
        let mut s = ten_of_hundred();
        let saved = s.tamper().slot(42)[1];
        s.tamper().slot(42)[1] = 0;
        assert_eq!(s.check(), Err(Corruption::Poison { slot: 42 }));
        s.tamper().slot(42)[1] = saved;
        assert!(s.is_ok());
    }

    #[test]
    fn test_live_slot_write_is_caught_by_checksum() {
        let mut s = ten_of_hundred();
        s.tamper().slot(4)[0] ^= 0x80;
        assert!(matches!(s.check(), Err(Corruption::Checksum { .. })));
        s.tamper().slot(4)[0] ^= 0x80;
        assert!(s.is_ok());
    }

    #[test]
    fn test_in_range_size_change_is_caught_by_checksum() {
        let mut s = ten_of_hundred();
        // 10 -> 11 stays in range and turns poisoned slot 10 into a live one,
        // which the poison scan no longer covers.
        s.tamper().size()[size_lsb()] ^= 0x01;
        assert!(matches!(s.check(), Err(Corruption::Checksum { .. })));
        s.tamper().size()[size_lsb()] ^= 0x01;
        assert!(s.is_ok());
    }

    #[test]
    fn test_in_range_size_shrink_is_caught_by_poison_scan() {
        let mut s = ten_of_hundred();
        // 10 -> 8 leaves live values 8 and 9 in what now reads as vacant slots.
        s.tamper().size()[size_lsb()] ^= 0x02;
        assert_eq!(s.check(), Err(Corruption::Poison { slot: 8 }));
        s.tamper().size()[size_lsb()] ^= 0x02;
        assert!(s.is_ok());
    }

    #[test]
    fn test_resealed_oversize_is_reported_as_size() {
        let mut s: GuardedStack<u8, 4> = GuardedStack::new();
        s.tamper().size()[size_lsb()] = 9;
        s.tamper().reseal();
        assert_eq!(s.check(), Err(Corruption::SizeOutOfRange { size: 9, capacity: 4 }));
        s.tamper().size()[size_lsb()] = 0;
        s.tamper().reseal();
        assert!(s.is_ok());
    }

    #[test]
    fn test_check_is_idempotent_and_read_only() {
        let mut s = ten_of_hundred();
        s.tamper().slot(50)[0] = 0;
        let first = s.check();
        let stored = s.checksum;
        for _ in 0..3 {
            assert_eq!(s.check(), first);
        }
        assert_eq!(s.checksum, stored);
        s.tamper().slot(50)[0] = b'a';
        assert!(s.is_ok());
    }

    #[test]
    #[should_panic(expected = "GuardedStack::push: integrity check failed: begin guard corrupted")]
    fn test_push_on_corrupted_stack_is_fatal() {
        let mut s = ten_of_hundred();
        s.tamper().begin_guard()[0] ^= 0xff;
        s.push(11);
    }

    #[test]
    #[should_panic(expected = "GuardedStack::size: integrity check failed: vacant slot 10")]
    fn test_size_on_corrupted_stack_is_fatal() {
        let mut s = ten_of_hundred();
        s.tamper().slot(10)[0] = 0;
        let _ = s.size();
    }
}
