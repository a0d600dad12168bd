// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Where diagnostic dumps go, and how a violation stops the caller.
//!
//! A dump is handed to the process-wide sink (stderr unless replaced with
//! [`set_sink`]) and, for violations, also logged as a `tracing` error event.
//! The caller is then stopped with a panic. Under `panic = "abort"` that is a
//! process abort; under unwinding a test harness sees it with `#[should_panic]`.

// Crate imports
use crate::error::Violation;

// Core imports
use core::{fmt, panic::Location};

// Std imports
use std::{io::Write, sync::RwLock};

/// A report sink. Receives the complete, multi-line dump text.
pub type Sink = fn(&str);

static SINK: RwLock<Option<Sink>> = RwLock::new(None);

/// Installs `sink` for all subsequent dumps and returns the previous one.
pub fn set_sink(sink: Sink) -> Option<Sink> {
    let mut slot = SINK.write().unwrap_or_else(|e| e.into_inner());
    slot.replace(sink)
}

/// Restores the default stderr sink.
pub fn reset_sink() {
    let mut slot = SINK.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

fn current_sink() -> Option<Sink> {
    *SINK.read().unwrap_or_else(|e| e.into_inner())
}

/// Writes to stderr and flushes, so the text is out before any abort.
fn stderr_sink(text: &str) {
    let mut err = std::io::stderr().lock();
    // Nothing useful can be done if stderr itself is gone.
    let _ = err.write_all(text.as_bytes());
    let _ = err.flush();
}

pub(crate) fn emit(text: &str) {
    match current_sink() {
        Some(sink) => sink(text),
        None => stderr_sink(text),
    }
}

/// When, relative to the operation's own work, a check ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the operation touched anything: corruption came from outside.
    Entry,
    /// After the operation's mutation: the operation itself broke something.
    Exit,
    /// A dump the caller asked for.
    Requested,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Requested => "requested",
        })
    }
}

/// The call site a report is attributed to.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub op: &'static str,
    pub phase: Phase,
    pub location: &'static Location<'static>,
}

impl Site {
    /// Captures the location of the outermost `#[track_caller]` frame.
    #[track_caller]
    pub fn caller(op: &'static str, phase: Phase) -> Self {
        Self { op, phase, location: Location::caller() }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} [{}]",
            self.location.file(),
            self.location.line(),
            self.op,
            self.phase
        )
    }
}

/// Emits `report`, logs `violation`, and stops the caller.
#[cold]
#[inline(never)]
pub(crate) fn fatal(site: Site, violation: Violation, report: &dyn fmt::Display) -> ! {
    tracing::error!(
        op = site.op,
        phase = %site.phase,
        file = site.location.file(),
        line = site.location.line(),
        %violation,
        "guarded stack violation"
    );
    emit(&report.to_string());
    panic!("GuardedStack::{}: {violation}", site.op);
}
