//! Initial-byte + argument encoding for a `(major type, value, minimum
//! width)` triple (spec.md §4.3).

use crate::buffer::OutputBuffer;
use crate::major::{ArgumentWidth, MajorType};

/// Compose and insert a CBOR header (initial byte plus 0..=8 extra argument
/// bytes) at `at`. Appending is modeled as inserting at the buffer's current
/// end position.
///
/// Width selection prefers the smallest width able to hold `argument` unless
/// `min_width` forces a larger one, which floats need: a half/float/double
/// with a zero bit pattern must still occupy 2/4/8 bytes.
pub(crate) fn emit_header(
    buf: &mut OutputBuffer<'_>,
    major: MajorType,
    min_width: ArgumentWidth,
    argument: u64,
    at: usize,
) {
    let mut scratch = [0u8; 9];
    let len = encode_header(major, min_width, argument, &mut scratch);
    buf.insert_bytes(&scratch[..len], at);
}

/// Append a header at the buffer's current end. Equivalent to
/// `emit_header(buf, major, min_width, argument, buf.end_position())`.
#[inline]
pub(crate) fn append_header(
    buf: &mut OutputBuffer<'_>,
    major: MajorType,
    min_width: ArgumentWidth,
    argument: u64,
) {
    let at = buf.end_position();
    emit_header(buf, major, min_width, argument, at);
}

fn encode_header(
    major: MajorType,
    min_width: ArgumentWidth,
    argument: u64,
    out: &mut [u8; 9],
) -> usize {
    let width = ArgumentWidth::smallest_for(argument).max(min_width);
    let major_bits = (major as u8) << 5;
    match width {
        ArgumentWidth::W0 => {
            out[0] = major_bits | argument as u8;
            1
        }
        ArgumentWidth::W1 => {
            out[0] = major_bits | 24;
            out[1] = argument as u8;
            2
        }
        ArgumentWidth::W2 => {
            out[0] = major_bits | 25;
            out[1..3].copy_from_slice(&(argument as u16).to_be_bytes());
            3
        }
        ArgumentWidth::W4 => {
            out[0] = major_bits | 26;
            out[1..5].copy_from_slice(&(argument as u32).to_be_bytes());
            5
        }
        ArgumentWidth::W8 => {
            out[0] = major_bits | 27;
            out[1..9].copy_from_slice(&argument.to_be_bytes());
            9
        }
    }
}
