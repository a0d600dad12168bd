// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `guarded-stack`
//!
//! A fixed-capacity, inline stack that **checks its own integrity around every
//! operation** and stops loudly the moment something is wrong.
//!
//! The core type, [`GuardedStack<T, N>`], stores up to `N` values inline and
//! tracks a logical size `0..=N`. It is meant for debugging code that works
//! next to raw buffers, foreign writes, and overruns, where the usual symptom
//! of a bug is silent corruption discovered far from its cause.
//!
//! ## What is checked
//!
//! - **Guards**: two words holding [`CANARY`], one before and one after every
//!   other field.
//! - **Size**: never above `N`.
//! - **Poison**: every vacant slot holds a byte pattern chosen by the stack's
//!   [`Poison`] policy ([`Alphabet`] unless specified); anything else there is
//!   a stray write.
//! - **Checksum**: a CRC-32 over the logical byte image of every field (the
//!   checksum itself read as zero). It catches what the first three miss, such
//!   as a size changed to another in-range value or a flipped bit in a live
//!   value.
//!
//! [`GuardedStack::check`] runs these in that order and names the first
//! failure as a [`Corruption`].
//!
//! ## Fatal by design
//!
//! Every operation checks on entry, and mutating operations check again on
//! exit. An entry failure means something outside the stack wrote into it; an
//! exit failure means the operation itself did. Either way, and on misuse
//! (push on full, pop/top on empty, access past `size`), the stack:
//!
//! 1. renders a full dump: call site, type, capacity, address, each guard's
//!    status, size class, and one line per slot;
//! 2. sends it to the report sink (stderr by default, see
//!    [`report::set_sink`]) and logs a `tracing` error event;
//! 3. panics with the [`Violation`].
//!
//! There is no recoverable error path. Build with `panic = "abort"` to turn
//! the panic into a process abort.
//!
//! ## Safety
//!
//! The crate is `#![forbid(unsafe_code)]`. Values are [`bytemuck::Pod`] (via
//! [`Render`]), so vacant slots can carry raw poison bytes and every slot can
//! be rendered whatever its bytes are. Since safe code cannot scribble over the
//! stack's fields, the checks only ever fire on corruption injected on purpose.
//! The `fault-injection` feature exposes `GuardedStack::tamper` for exactly that.
//!
//! ## Features
//!
//! - `fault-injection`: byte-level write access to each tracked field, for
//!   corruption-injection harnesses.
//!
//! ## Example
//!
//! ```rust
//! use guarded_stack::GuardedStack;
//!
//! let mut s: GuardedStack<u32, 8> = GuardedStack::new();
//! s.push(1);
//! s.push(2);
//! assert_eq!(s.pop(), 2);
//! assert_eq!(s[0], 1);
//! assert!(s.is_ok());
//! ```

#![forbid(unsafe_code)]

// Modules
mod error;
mod index;
mod iter;
pub mod poison;
mod render;
pub mod report;
mod stack;

// Public exports (crate API surface)
pub use error::{Corruption, Violation};
pub use poison::{Alphabet, Poison};
pub use render::{rendered, write_hex, Render, Rendered};
#[cfg(any(test, feature = "fault-injection"))]
pub use stack::Tamper;
pub use stack::{GuardedStack, Report, CANARY};
