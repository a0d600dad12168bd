// This file is part of guarded-stack.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering of stored values for the diagnostic dump.
//!
//! Numeric primitives render in decimal. Everything else falls back to the
//! default method: a hex dump of the value's bytes, most significant byte
//! first. Rendering never feeds back into stored data or control flow.

// Core imports
use core::fmt;

// External imports - bytemuck
use bytemuck::Pod;

/// A value that can be rendered into the dump.
///
/// Implement it with an empty body to get the hex fallback:
///
/// ```rust
/// use guarded_stack::Render;
///
/// #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Pair(u16, u16);
///
/// impl Render for Pair {}
///
/// let s = guarded_stack::rendered(&Pair(0x0102, 0x0304)).to_string();
/// assert_eq!(s, "0x03040102");
/// ```
pub trait Render: Pod {
    fn render<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write_hex(bytemuck::bytes_of(self), out)
    }
}

/// Writes `bytes` as `0x`-prefixed uppercase hex, most significant byte first.
pub fn write_hex<W: fmt::Write + ?Sized>(bytes: &[u8], out: &mut W) -> fmt::Result {
    out.write_str("0x")?;
    if cfg!(target_endian = "little") {
        for b in bytes.iter().rev() {
            write!(out, "{b:02X}")?;
        }
    } else {
        for b in bytes {
            write!(out, "{b:02X}")?;
        }
    }
    Ok(())
}

/// `Display` adapter over [`Render`].
pub struct Rendered<'a, T>(&'a T);

/// Wraps `value` so it can be used with `{}`.
pub fn rendered<T: Render>(value: &T) -> Rendered<'_, T> {
    Rendered(value)
}

impl<T: Render> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

impl<T: Render> fmt::Debug for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

macro_rules! decimal {
    ($($t:ty),* $(,)?) => {
        $(
            impl Render for $t {
                fn render<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
                    write!(out, "{self}")
                }
            }
        )*
    };
}

decimal!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl<T: Pod, const K: usize> Render for [T; K] {}
