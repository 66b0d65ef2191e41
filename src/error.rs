use core::fmt;

/// A structured error code identifying why an encode operation was rejected
/// or why the encoder was latched into a poisoned state.
///
/// This enum is intentionally stable and string-free to support `no_std` and
/// to remain hot-path friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The caller-supplied output buffer is larger than this encoder can
    /// address (capacity must fit in 32 bits), or a single payload is.
    BufferTooLarge,
    /// The output would exceed the caller-supplied buffer's capacity.
    BufferTooSmall,
    /// `open_container` was called while already at `MAX_NESTING`.
    NestingTooDeep,
    /// A container's child count would reach the 16-bit item-count ceiling.
    ArrayTooLong,
    /// `close_container` was called with no open frame.
    TooManyCloses,
    /// `close_container`'s major type differs from the open frame's.
    CloseMismatch,
    /// `finish` was called while a container is still open.
    ArrayOrMapStillOpen,
    /// A simple value outside the valid encodable range (enforced by the
    /// simple-value wrapper, not by the header coder itself).
    BadSimple,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::BufferTooLarge => "output buffer or payload exceeds the 32-bit length ceiling",
            Self::BufferTooSmall => "output would exceed the caller-supplied buffer capacity",
            Self::NestingTooDeep => "nesting depth limit exceeded",
            Self::ArrayTooLong => "container child count limit exceeded",
            Self::TooManyCloses => "close_container called with no open container",
            Self::CloseMismatch => "close_container major type does not match the open frame",
            Self::ArrayOrMapStillOpen => "finish called while a container is still open",
            Self::BadSimple => "simple value outside the valid encodable range",
        };
        write!(f, "{msg}")
    }
}

/// An encoder error pairing an [`ErrorCode`] with the output cursor position
/// at which it was first latched.
///
/// Once an `EncodeContext` latches an error, every subsequent operation is a
/// no-op and returns this same error again (the encoder is "poisoned" until
/// re-initialized); `offset` therefore always reflects the *first* failure,
/// never a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeError {
    /// The error code.
    pub code: ErrorCode,
    /// Output cursor position at which the error was first latched.
    pub offset: usize,
}

impl EncodeError {
    /// Construct an encode error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cbor encode error at {}: {}", self.offset, self.code)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
