//! # Decode errors
//!
//! The one error condition this core itself can raise: a query that
//! requires UTF-8 decoding hit a byte that cannot start any valid
//! sequence (spec.md §7.1). Everything else — type errors, undefined
//! names, division by zero — belongs to the dispatcher built on top of
//! this substrate, not to the substrate itself.

use std::fmt;

/// A recoverable decode failure: a query that requires UTF-8 decoding hit
/// an invalid leading byte (spec.md §7.1). Scanning paths that would rather
/// skip the bad byte than fail use [`crate::strval::utf8_char_len_suppressed`]
/// instead of propagating this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8DecodeError {
    /// A leading byte that cannot start any valid UTF-8 sequence.
    InvalidLeadingByte(u8),
}

impl fmt::Display for Utf8DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utf8DecodeError::InvalidLeadingByte(b) => {
                write!(f, "invalid UTF-8 leading byte: 0x{:02x}", b)
            }
        }
    }
}

impl std::error::Error for Utf8DecodeError {}

/// A frame-level resource-ceiling violation (spec.md §3's "configurable
/// safety ceiling" on the operand stack). Unlike the bounds violations in
/// §7.2 this is an always-on check, not a debug-only assertion — a
/// dispatcher that cares about a misbehaving or pathologically recursive
/// program opts in by calling [`crate::frame::Frame::try_push_value`]
/// instead of the unchecked [`crate::frame::Frame::push_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The operand stack would have grown past the frame's configured
    /// [`crate::limits::Limits::max_stack_depth`].
    StackOverflow { depth: usize, limit: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::StackOverflow { depth, limit } => {
                write!(f, "StackOverflow: operand stack depth {} exceeds limit {}", depth, limit)
            }
        }
    }
}

impl std::error::Error for FrameError {}
