//! The error type shared by the encode and decode paths.

use thiserror::Error;

/// Stores the result of codec operations. Returns a [`CodecError`] upon
/// failure.
pub type CodecResult<T> = Result<T, CodecError>;

/// An error type for transaction codec operations.
///
/// Decode errors are fatal to the single call and never leave partially
/// mutated caller state; decoders build values internally and only hand them
/// out whole.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum CodecError {
    /// The cursor would read past the available bytes, directly or through a
    /// length field implying a slice outside bounds.
    #[error("unexpected end of input at offset {offset}: {needed} more byte(s) required")]
    UnexpectedEof {
        /// Cursor position within the record being decoded.
        offset: usize,
        /// How far past the end the read would have gone.
        needed: usize,
    },

    /// A kind byte matching no defined variant of the sum type.
    #[error("unknown {kind} discriminant {value:#04x}")]
    UnknownDiscriminant {
        /// Which sum type was being decoded.
        kind: &'static str,
        /// The offending byte.
        value: u8,
    },

    /// An encode-side value that does not fit its wire field. For every
    /// value that fits, encoding is total.
    #[error("field `{field}` of length {len} exceeds the wire maximum of {max}")]
    LengthOverflow {
        /// The field being encoded.
        field: &'static str,
        /// The value's actual length.
        len: usize,
        /// The wire field's capacity.
        max: usize,
    },
}
