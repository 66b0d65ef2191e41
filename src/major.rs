//! Wire-level enumerations: CBOR major types and header argument widths.

/// The eight CBOR major types (RFC 7049 §2.1), used by the header coder to
/// compose the top three bits of an initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MajorType {
    /// Major type 0: unsigned integer.
    PositiveInt = 0,
    /// Major type 1: negative integer (argument is `-1 - n`).
    NegativeInt = 1,
    /// Major type 2: byte string.
    ByteString = 2,
    /// Major type 3: UTF-8 text string.
    TextString = 3,
    /// Major type 4: array.
    Array = 4,
    /// Major type 5: map.
    Map = 5,
    /// Major type 6: tag.
    Tag = 6,
    /// Major type 7: simple value or float.
    Simple = 7,
}

/// The three container kinds that may hold an open [`NestingFrame`](crate::nesting::NestingFrame).
///
/// `ByteString` appears here because the bstr-wrap technique reuses the
/// open/close container machinery to emit a byte string whose payload is
/// itself valid, already-encoded CBOR (used e.g. by COSE to hash a value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// An array: header argument is the item count.
    Array,
    /// A map: header argument is the pair count (`child_count / 2`).
    Map,
    /// A byte string wrapping an already-encoded CBOR payload: header
    /// argument is the payload length in bytes.
    ByteString,
}

impl ContainerKind {
    #[inline]
    pub(crate) const fn major_type(self) -> MajorType {
        match self {
            Self::Array => MajorType::Array,
            Self::Map => MajorType::Map,
            Self::ByteString => MajorType::ByteString,
        }
    }
}

/// The major types accepted by [`add_bytes`](crate::EncodeContext::add_bytes).
///
/// `RawPassThrough` is an internal sentinel meaning "append this payload
/// verbatim, with no header": it is used to splice already-encoded CBOR in
/// without re-framing it (e.g. a validated sub-document produced elsewhere).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesKind {
    /// Emit a byte-string header, then the payload.
    ByteString,
    /// Emit a text-string header, then the payload.
    TextString,
    /// Emit no header at all; the payload is assumed to already be valid,
    /// self-framed CBOR.
    RawPassThrough,
}

/// A header argument width: how many bytes follow the initial byte to carry
/// the argument.
///
/// Ordering matters: `W0 < W1 < W2 < W4 < W8`, which lets the header coder
/// express "smallest width able to hold the value, unless a `min_width`
/// request overrides" as a simple `<=` comparison against the natural width
/// ladder. The non-linear byte counts (0, 1, 2, 4, 8) are an implementation
/// detail of [`byte_len`](Self::byte_len); the *ranking* is what callers
/// compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArgumentWidth {
    /// Value fits in the initial byte's low five bits (0..=23).
    W0,
    /// One extra byte (additional info 24).
    W1,
    /// Two extra bytes (additional info 25).
    W2,
    /// Four extra bytes (additional info 26).
    W4,
    /// Eight extra bytes (additional info 27).
    W8,
}

impl ArgumentWidth {
    /// Number of bytes that follow the initial byte for this width.
    #[inline]
    #[must_use]
    pub const fn extra_bytes(self) -> usize {
        match self {
            Self::W0 => 0,
            Self::W1 => 1,
            Self::W2 => 2,
            Self::W4 => 4,
            Self::W8 => 8,
        }
    }

    /// The smallest width able to hold `value` with no override.
    #[inline]
    #[must_use]
    pub const fn smallest_for(value: u64) -> Self {
        if value <= 23 {
            Self::W0
        } else if value <= 0xff {
            Self::W1
        } else if value <= 0xffff {
            Self::W2
        } else if value <= 0xffff_ffff {
            Self::W4
        } else {
            Self::W8
        }
    }
}
