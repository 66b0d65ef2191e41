//! Width-fixed float-writing convenience on top of `add_simple_or_float`.
//!
//! These do **not** implement shortest-form float reduction: spec.md places
//! the IEEE-754 shortener out of this crate's scope as an external
//! collaborator (`(double) -> (ArgumentWidth, u64 bit pattern)`). What's here
//! exists only so the `min_width` override on the header coder is usable by a
//! caller who does not want to pull in that collaborator: each wrapper picks
//! the *fixed* width matching its Rust float type.

use crate::major::ArgumentWidth;
use crate::{EncodeContext, EncodeError};

impl<'a, const N: usize> EncodeContext<'a, N> {
    /// Encode an IEEE-754 half-precision bit pattern (2-byte argument,
    /// additional info 25).
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if any, or an error raised while
    /// encoding.
    pub fn write_half(&mut self, half_bits: u16) -> Result<(), EncodeError> {
        self.add_simple_or_float(ArgumentWidth::W2, u64::from(half_bits))
    }

    /// Encode an `f32` at its full 4-byte width (additional info 26), with
    /// no shortening.
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if any, or an error raised while
    /// encoding.
    pub fn write_f32(&mut self, value: f32) -> Result<(), EncodeError> {
        self.add_simple_or_float(ArgumentWidth::W4, u64::from(value.to_bits()))
    }

    /// Encode an `f64` at its full 8-byte width (additional info 27), with
    /// no shortening.
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if any, or an error raised while
    /// encoding.
    pub fn write_f64(&mut self, value: f64) -> Result<(), EncodeError> {
        self.add_simple_or_float(ArgumentWidth::W8, value.to_bits())
    }
}
