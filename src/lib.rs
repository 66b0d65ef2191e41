//! # micro-cbor
//!
//! A minimal, deterministic CBOR (RFC 7049) encoder core built for
//! constrained environments: no allocator, no growing buffer, and a single
//! caller-owned byte slice to write into.
//!
//! ## Design principles
//!
//! - **The caller owns the buffer.** [`EncodeContext`] never allocates; it
//!   writes into whatever `&mut [u8]` you hand it and reports overflow
//!   instead of growing.
//! - **Headers are back-patched, not pre-reserved.** Array, map, and
//!   byte-string-wrap containers don't know their length until they're
//!   closed. Rather than reserving the worst-case 9-byte header up front,
//!   the header is inserted at the recorded start offset when the container
//!   closes, and everything written since is slid over to make room.
//! - **Errors are sticky.** Once any operation latches an error, every
//!   further operation on that `EncodeContext` returns the same error
//!   instead of continuing to write — there is no path back to a consistent
//!   buffer short of [`EncodeContext::reset`].
//!
//! This crate only emits minimum-length, definite-length CBOR. It has no
//! opinion on what semantic value a sequence of calls represents — it is a
//! thin wire-format layer for something else (a schema, a macro, a derive)
//! to drive.
//!
//! ## Feature flags
//!
//! - `std`: implements [`std::error::Error`] for [`EncodeError`]. The crate
//!   is `no_std` without it. `EncodeContext` itself never logs, on `std` or
//!   otherwise — it's a hot-path encoder, not a diagnostic tool.
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.
//!
//! ## `no_std`
//!
//! Fully `no_std` and allocation-free by default; `std` only adds the
//! `Error` impl, which the encoding hot path does not depend on.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod buffer;
mod encoder;
mod error;
mod float;
mod header;
mod major;
mod nesting;

pub use crate::encoder::{EncodeContext, Mark, WrappedView};
pub use crate::error::{EncodeError, ErrorCode};
pub use crate::major::{ArgumentWidth, BytesKind, ContainerKind, MajorType};
