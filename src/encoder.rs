//! The public encoder state machine: a stateful, sticky-error API over a
//! caller-owned output buffer (spec.md §4.4).

use crate::buffer::OutputBuffer;
use crate::error::{EncodeError, ErrorCode};
use crate::header::{append_header, emit_header};
use crate::major::{ArgumentWidth, BytesKind, ContainerKind, MajorType};
use crate::nesting::NestingStack;

/// An opaque cursor position captured by [`EncodeContext::mark`].
///
/// Intended for an external tag/semantic-type collaborator (spec.md §1) that
/// needs a stable handle on "where did the current value start" without
/// being able to use that handle to mutate the buffer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(u32);

impl Mark {
    /// The raw byte offset this mark refers to.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.0
    }
}

/// A view of the bytes a [`close_container`](EncodeContext::close_container_view)
/// call just inserted: the container header plus its payload.
///
/// The view borrows from the `EncodeContext` it came from, so the borrow
/// checker (not documentation) prevents it from outliving a subsequent
/// mutating call on that context — spec.md §9 notes this view "becomes
/// dangling on any subsequent insert" in the reference C implementation;
/// here that hazard is a compile error instead.
pub struct WrappedView<'a> {
    bytes: &'a [u8],
}

impl<'a> WrappedView<'a> {
    /// The inserted header bytes followed by the container's payload bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}

/// A stateful CBOR encoder writing minimum-length, definite-length items
/// into a caller-owned buffer.
///
/// `N` bounds the nesting depth (spec.md recommends 15; see the default
/// below). Every operation is a no-op once any operation has latched an
/// error: the context is "poisoned" until [`reset`](Self::reset) or a fresh
/// [`new`](Self::new) rebinds a buffer. Callers that want `?`-based
/// short-circuiting get it for free because every op already returns
/// `Result<_, EncodeError>`; callers that ignore a `Result` and keep calling
/// anyway observe the same latched error on every later call instead of
/// silent corruption (I1).
pub struct EncodeContext<'a, const N: usize = 15> {
    output: OutputBuffer<'a>,
    nesting: NestingStack<N>,
    error: Option<EncodeError>,
}

impl<'a, const N: usize> EncodeContext<'a, N> {
    /// Bind a fresh, caller-owned output buffer.
    ///
    /// Poisons the new context with `BufferTooLarge` if `buffer.len()`
    /// exceeds the 32-bit length ceiling; the context is otherwise returned
    /// ready to use (there is no fallible constructor: a too-large buffer is
    /// observed through `finish`, just like any other latched error).
    #[must_use]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        let mut ctx = Self {
            output: OutputBuffer::new(buffer),
            nesting: NestingStack::new(),
            error: None,
        };
        ctx.check_capacity();
        ctx
    }

    /// Rebind a new buffer and clear all state (cursor, nesting, latched
    /// error), reusing the same `EncodeContext` across messages.
    pub fn reset(&mut self, buffer: &'a mut [u8]) {
        self.output = OutputBuffer::new(buffer);
        self.nesting.reset();
        self.error = None;
        self.check_capacity();
    }

    fn check_capacity(&mut self) {
        if self.output.capacity() as u64 > u64::from(u32::MAX) {
            self.error = Some(EncodeError::new(ErrorCode::BufferTooLarge, 0));
        }
    }

    /// Number of bytes written to the output buffer so far.
    #[inline]
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.output.end_position()
    }

    /// Whether at least one container is currently open.
    #[inline]
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.nesting.is_nested()
    }

    /// Number of currently open container frames (not counting the
    /// implicit top-level sentinel).
    #[inline]
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        self.nesting.depth()
    }

    /// Capture the current output cursor as an opaque [`Mark`].
    #[inline]
    #[must_use]
    pub fn mark(&self) -> Mark {
        Mark(self.output.end_position() as u32)
    }

    fn check_ready(&self) -> Result<(), EncodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn poison(&mut self, code: ErrorCode) -> EncodeError {
        let err = EncodeError::new(code, self.output.end_position());
        self.error = Some(err);
        err
    }

    fn check_overflow(&mut self) -> Result<(), EncodeError> {
        if self.output.error() {
            Err(self.poison(ErrorCode::BufferTooSmall))
        } else {
            Ok(())
        }
    }

    fn bump(&mut self, by: u16) -> Result<(), EncodeError> {
        self.nesting.increment(by).map_err(|code| self.poison(code))
    }

    /// Encode an unsigned integer (major type 0).
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if already poisoned, or a
    /// newly-latched error if the output buffer overflows or the enclosing
    /// container's item count limit is reached.
    pub fn add_uint(&mut self, v: u64) -> Result<(), EncodeError> {
        self.check_ready()?;
        append_header(&mut self.output, MajorType::PositiveInt, ArgumentWidth::W0, v);
        self.check_overflow()?;
        self.bump(1)
    }

    /// Encode a signed integer (major type 0 for non-negative values, major
    /// type 1 for negative values using CBOR's one's-complement-style
    /// argument convention: the stored argument is `(-n) - 1`).
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if already poisoned, or a
    /// newly-latched error if the output buffer overflows or the enclosing
    /// container's item count limit is reached.
    pub fn add_int(&mut self, v: i64) -> Result<(), EncodeError> {
        self.check_ready()?;
        if v >= 0 {
            append_header(&mut self.output, MajorType::PositiveInt, ArgumentWidth::W0, v as u64);
        } else {
            // -1 - v as i128 never overflows, and its magnitude always fits
            // u64 for any i64 input (including i64::MIN), so this cast is lossless.
            let magnitude = (-1_i128 - i128::from(v)) as u64;
            append_header(&mut self.output, MajorType::NegativeInt, ArgumentWidth::W0, magnitude);
        }
        self.check_overflow()?;
        self.bump(1)
    }

    /// Encode a byte string, text string, or raw already-encoded CBOR
    /// passthrough payload.
    ///
    /// `RawPassThrough` emits no header at all: `payload` is assumed to
    /// already be a complete, valid, self-framed CBOR item, spliced in
    /// verbatim (the bstr-wrap and tag-helper collaborators rely on this to
    /// avoid re-framing already-validated bytes).
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if already poisoned; a newly
    /// latched `BufferTooLarge` if `payload.len()` reaches the 32-bit length
    /// ceiling; or a newly-latched error if the output buffer overflows or
    /// the enclosing container's item count limit is reached.
    pub fn add_bytes(&mut self, kind: BytesKind, payload: &[u8]) -> Result<(), EncodeError> {
        self.check_ready()?;
        if payload.len() as u64 >= u64::from(u32::MAX) {
            return Err(self.poison(ErrorCode::BufferTooLarge));
        }
        if kind != BytesKind::RawPassThrough {
            let major = match kind {
                BytesKind::ByteString => MajorType::ByteString,
                BytesKind::TextString => MajorType::TextString,
                BytesKind::RawPassThrough => unreachable!("checked above"),
            };
            append_header(&mut self.output, major, ArgumentWidth::W0, payload.len() as u64);
            self.check_overflow()?;
        }
        self.output.append_bytes(payload);
        self.check_overflow()?;
        self.bump(1)
    }

    /// Splice already-encoded, self-framed CBOR in as the next item, with no
    /// re-framing. Equivalent to `add_bytes(BytesKind::RawPassThrough, payload)`.
    ///
    /// # Errors
    ///
    /// See [`add_bytes`](Self::add_bytes).
    pub fn splice_raw(&mut self, payload: &[u8]) -> Result<(), EncodeError> {
        self.add_bytes(BytesKind::RawPassThrough, payload)
    }

    /// Encode a tag prefix (major type 6). A tag does not count as an item
    /// in the enclosing frame: callers must always follow it with exactly
    /// one item, which is not enforced here.
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if already poisoned, or a
    /// newly-latched error if the output buffer overflows.
    pub fn add_tag(&mut self, tag: u64) -> Result<(), EncodeError> {
        self.check_ready()?;
        append_header(&mut self.output, MajorType::Tag, ArgumentWidth::W0, tag);
        self.check_overflow()
    }

    /// Encode a major-type-7 simple value or float argument at the given
    /// width. `width` is typically chosen by an external IEEE-754 shortener
    /// for floats, or `ArgumentWidth::W0` for simple values in `0..=23`.
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if already poisoned, or a
    /// newly-latched error if the output buffer overflows or the enclosing
    /// container's item count limit is reached.
    pub fn add_simple_or_float(&mut self, width: ArgumentWidth, raw_bits: u64) -> Result<(), EncodeError> {
        self.check_ready()?;
        append_header(&mut self.output, MajorType::Simple, width, raw_bits);
        self.check_overflow()?;
        self.bump(1)
    }

    /// Encode a CBOR simple value, validating that `value` is in the
    /// encodable range (`0..=19` or `32..=255`; `20..=23` are the literal
    /// false/true/null/undefined values and `24..=31` are reserved). This
    /// range check belongs to the simple-value wrapper, not the header
    /// coder itself (spec.md §7).
    ///
    /// # Errors
    ///
    /// Returns `BadSimple` if `value` is outside the encodable range, the
    /// context's latched error if already poisoned, or a newly-latched error
    /// if the output buffer overflows or the item count limit is reached.
    pub fn add_simple(&mut self, value: u8) -> Result<(), EncodeError> {
        self.check_ready()?;
        if !(value <= 19 || value >= 32) {
            return Err(self.poison(ErrorCode::BadSimple));
        }
        self.add_simple_or_float(ArgumentWidth::W0, u64::from(value))
    }

    /// Encode a CBOR boolean.
    ///
    /// # Errors
    ///
    /// See [`add_simple_or_float`](Self::add_simple_or_float).
    pub fn add_bool(&mut self, v: bool) -> Result<(), EncodeError> {
        self.add_simple_or_float(ArgumentWidth::W0, if v { 21 } else { 20 })
    }

    /// Encode CBOR null.
    ///
    /// # Errors
    ///
    /// See [`add_simple_or_float`](Self::add_simple_or_float).
    pub fn add_null(&mut self) -> Result<(), EncodeError> {
        self.add_simple_or_float(ArgumentWidth::W0, 22)
    }

    /// Open a new array, map, or byte-string-wrap container.
    ///
    /// Counts as one item in the enclosing frame immediately, before the new
    /// frame is pushed: if pushing then fails with `NestingTooDeep`, the
    /// enclosing increment has already happened, which is harmless because
    /// the context is poisoned from this point on regardless (spec.md §4.4).
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, if already poisoned, or a
    /// newly-latched `NestingTooDeep`/`ArrayTooLong`.
    pub fn open_container(&mut self, kind: ContainerKind) -> Result<(), EncodeError> {
        self.check_ready()?;
        self.bump(1)?;
        let start = self.output.end_position();
        self.nesting
            .push(kind, start)
            .map_err(|code| self.poison(code))?;
        Ok(())
    }

    fn close_container_inner(&mut self, kind: ContainerKind) -> Result<(usize, usize), EncodeError> {
        if !self.nesting.is_nested() {
            return Err(self.poison(ErrorCode::TooManyCloses));
        }
        if self.nesting.current_kind() != kind {
            return Err(self.poison(ErrorCode::CloseMismatch));
        }
        let start = self.nesting.current_start_offset();
        let end_before = self.output.end_position();
        let payload_len = (end_before - start) as u64;
        let arg = match kind {
            ContainerKind::ByteString => payload_len,
            ContainerKind::Array | ContainerKind::Map => self.nesting.count_for_header(),
        };
        emit_header(&mut self.output, kind.major_type(), ArgumentWidth::W0, arg, start);
        self.check_overflow()?;
        let new_end = self.output.end_position();
        self.nesting.pop();
        Ok((start, new_end))
    }

    /// Close the current container, back-patching its header at the offset
    /// recorded when it was opened.
    ///
    /// # Errors
    ///
    /// Returns `TooManyCloses` if nothing is open, `CloseMismatch` if `kind`
    /// does not match the open frame, the context's latched error if already
    /// poisoned, or a newly-latched error if the header insert overflows the
    /// output buffer.
    ///
    /// Note: closing a `Map` whose child count (keys plus values) is odd is
    /// permitted here and produces malformed CBOR; this encoder does not
    /// enforce parity (spec.md §9 open question (a)) — callers are
    /// responsible for always emitting an even number of map entries.
    pub fn close_container(&mut self, kind: ContainerKind) -> Result<(), EncodeError> {
        self.check_ready()?;
        self.close_container_inner(kind)?;
        Ok(())
    }

    /// Close the current container like [`close_container`](Self::close_container),
    /// but also return a view of the bytes just written (inserted header
    /// plus payload) — used by the bstr-wrap technique to hash or further
    /// process the just-closed byte string in place.
    ///
    /// # Errors
    ///
    /// See [`close_container`](Self::close_container).
    pub fn close_container_view(&mut self, kind: ContainerKind) -> Result<WrappedView<'_>, EncodeError> {
        self.check_ready()?;
        let (start, end) = self.close_container_inner(kind)?;
        Ok(WrappedView {
            bytes: &self.output.snapshot()[start..end],
        })
    }

    /// Finish encoding and return the produced bytes.
    ///
    /// Error precedence: a latched encoder error (from any prior op) wins
    /// over a structural "still open" error, which wins over a bare
    /// buffer-overflow report — whatever failed *first* is the actionable
    /// root cause (spec.md §4.4, open question (b)).
    ///
    /// # Errors
    ///
    /// Returns the context's latched error, `ArrayOrMapStillOpen` if a
    /// container is still open, or `BufferTooSmall` if the output buffer
    /// overflowed without otherwise latching a more specific error.
    pub fn finish(&self) -> Result<&[u8], EncodeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.nesting.is_nested() {
            return Err(EncodeError::new(
                ErrorCode::ArrayOrMapStillOpen,
                self.output.end_position(),
            ));
        }
        if self.output.error() {
            return Err(EncodeError::new(
                ErrorCode::BufferTooSmall,
                self.output.end_position(),
            ));
        }
        Ok(self.output.snapshot())
    }

    /// As [`finish`](Self::finish), but returns only the encoded length.
    ///
    /// # Errors
    ///
    /// See [`finish`](Self::finish).
    pub fn finish_size(&self) -> Result<usize, EncodeError> {
        self.finish().map(<[u8]>::len)
    }
}
