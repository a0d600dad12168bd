// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The structured state dump.
//!
//! Layout (wording is not stable, completeness is):
//!
//! ```text
//! GuardedStack violation from src/main.rs (14) push [entry]: capacity exceeded
//! GuardedStack<T, N> with T = i32, N = 4 [0x7ffc...] {
//!     begin_guard = 0xDEADBEEFCACED426 (ok)
//!     size        = 4 (full)
//!     buf[4] =
//!        *[0] = 1
//!         [3] = poison
//!     checksum    = 0x1A2B3C4D (ok)
//!     end_guard   = 0xDEADBEEFCACED426 (ok)
//!     verdict     = ok
//! }
//! ```
//!
//! `*` marks a live slot. Vacant slots print `poison` when intact and their raw
//! bytes otherwise.

// Crate imports
use crate::{
    error::Violation,
    poison::Poison,
    render::{write_hex, Render},
    report::{self, Phase, Site},
    stack::{GuardedStack, CANARY},
};

// Core imports
use core::{any::type_name, fmt};

/// A renderable snapshot of one stack's state, attributed to a call site.
///
/// Obtained from [`GuardedStack::report`]; formats lazily with `{}`.
pub struct Report<'a, T: Render, const N: usize, P: Poison> {
    stack: &'a GuardedStack<T, N, P>,
    site: Site,
    violation: Option<Violation>,
}

impl<T: Render, const N: usize, P: Poison> GuardedStack<T, N, P> {
    /// Builds a report of the current state attributed to the caller.
    #[track_caller]
    pub fn report(&self) -> Report<'_, T, N, P> {
        self.report_at(Site::caller("report", Phase::Requested), None)
    }

    pub(crate) fn report_at(&self, site: Site, violation: Option<Violation>) -> Report<'_, T, N, P> {
        Report { stack: self, site, violation }
    }

    /// Writes a full dump to the active report sink. Never panics or stops.
    #[track_caller]
    pub fn dump(&self) {
        let report = self.report_at(Site::caller("dump", Phase::Requested), None);
        tracing::debug!(site = %report.site, ok = self.is_ok(), "guarded stack dump requested");
        report::emit(&report.to_string());
    }

    /// Writes a full dump into `out`.
    #[track_caller]
    pub fn dump_to<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        let report = self.report_at(Site::caller("dump_to", Phase::Requested), None);
        write!(out, "{report}")
    }
}

fn status(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "CORRUPTED"
    }
}

impl<T: Render, const N: usize, P: Poison> fmt::Display for Report<'_, T, N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stack;

        match self.violation {
            Some(v) => writeln!(f, "GuardedStack violation from {}: {v}", self.site)?,
            None => writeln!(f, "GuardedStack dump from {}:", self.site)?,
        }
        writeln!(
            f,
            "GuardedStack<T, N> with T = {}, N = {N} [{:p}] {{",
            type_name::<T>(),
            s as *const GuardedStack<T, N, P>,
        )?;

        writeln!(
            f,
            "    begin_guard = {:#018X} ({})",
            s.begin_guard,
            status(s.begin_guard == CANARY)
        )?;

        let class = match s.size {
            n if n > N => "OVERFLOW",
            n if n == N => "full",
            _ => "normal",
        };
        writeln!(f, "    size        = {} ({class})", s.size)?;

        writeln!(f, "    buf[{N}] =")?;
        for (i, slot) in s.buf.iter().enumerate() {
            if i < s.size {
                write!(f, "       *[{i}] = ")?;
                slot.render(f)?;
                writeln!(f)?;
            } else if s.slot_is_poisoned(i) {
                writeln!(f, "        [{i}] = poison")?;
            } else {
                write!(f, "        [{i}] = ")?;
                write_hex(bytemuck::bytes_of(slot), f)?;
                writeln!(f, " (NOT poison)")?;
            }
        }

        let computed = s.compute_checksum();
        if computed == s.checksum {
            writeln!(f, "    checksum    = {:#010X} (ok)", s.checksum)?;
        } else {
            writeln!(
                f,
                "    checksum    = {:#010X} (MISMATCH, computed {computed:#010X})",
                s.checksum
            )?;
        }

        writeln!(
            f,
            "    end_guard   = {:#018X} ({})",
            s.end_guard,
            status(s.end_guard == CANARY)
        )?;

        match s.check() {
            Ok(()) => writeln!(f, "    verdict     = ok")?,
            Err(c) => writeln!(f, "    verdict     = {c}")?,
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::GuardedStack;

    fn dump_of<const N: usize>(s: &GuardedStack<i32, N>) -> String {
        let mut out = String::new();
        s.dump_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_dump_has_one_line_per_field_and_slot() {
        let mut s: GuardedStack<i32, 5> = GuardedStack::new();
        s.push(-3);
        s.push(44);
        let out = dump_of(&s);

        assert!(out.starts_with("GuardedStack dump from "), "{out}");
        assert!(out.contains("dump_to [requested]"), "{out}");
        assert!(out.contains("T = i32, N = 5"), "{out}");
        assert!(out.contains("begin_guard = 0xDEADBEEFCACED426 (ok)"), "{out}");
        assert!(out.contains("size        = 2 (normal)"), "{out}");
        assert!(out.contains("*[0] = -3"), "{out}");
        assert!(out.contains("*[1] = 44"), "{out}");
        for i in 2..5 {
            assert!(out.contains(&format!(" [{i}] = poison")), "{out}");
        }
        assert!(out.contains("verdict     = ok"), "{out}");
        assert!(out.trim_end().ends_with('}'));
        // header, type line, begin, size, buf, 5 slots, checksum, end, verdict, brace
        assert_eq!(out.lines().count(), 14, "{out}");
    }

    #[test]
    fn test_dump_marks_full_and_corruption() {
        let mut s: GuardedStack<i32, 2> = GuardedStack::new();
        s.push(1);
        s.push(2);
        assert!(dump_of(&s).contains("(full)"));

        let mut t: GuardedStack<i32, 3> = GuardedStack::new();
        t.push(7);
        t.tamper().slot(2)[0] = 0;
        t.tamper().end_guard()[0] ^= 0xff;
        let out = dump_of(&t);
        assert!(out.contains("end_guard   = ") && out.contains("(CORRUPTED)"), "{out}");
        assert!(out.contains(" [1] = poison"), "{out}");
        assert!(out.contains("(NOT poison)"), "{out}");
        assert!(out.contains("verdict     = end guard corrupted"), "{out}");
        t.tamper().slot(2)[0] = b'a';
        t.tamper().end_guard()[0] ^= 0xff;
        assert!(t.is_ok());
    }

    #[test]
    fn test_dump_reports_checksum_mismatch_and_overflow() {
        let mut s: GuardedStack<i32, 2> = GuardedStack::new();
        s.tamper().checksum()[0] ^= 1;
        let out = dump_of(&s);
        assert!(out.contains("MISMATCH, computed"), "{out}");
        s.tamper().reseal();

        let lsb = if cfg!(target_endian = "little") { 0 } else { core::mem::size_of::<usize>() - 1 };
        s.tamper().size()[lsb] = 3;
        let out = dump_of(&s);
        assert!(out.contains("size        = 3 (OVERFLOW)"), "{out}");
        assert!(out.contains("*[1] = "), "{out}");
        s.tamper().size()[lsb] = 0;
        s.tamper().reseal();
        assert!(s.is_ok());
    }

    #[test]
    fn test_report_is_display() {
        let s: GuardedStack<i32, 1> = GuardedStack::new();
        let text = s.report().to_string();
        assert!(text.contains("report [requested]"), "{text}");
        assert!(text.contains(" [0] = poison"), "{text}");
    }

    #[test]
    fn test_dump_to_sink_does_not_stop() {
        let s: GuardedStack<i32, 1> = GuardedStack::new();
        s.dump();
        assert!(s.is_ok());
    }
}
