//! Codec-specific error types.

use thiserror::Error;

/// Errors produced while building dictionaries, encoding, or decoding.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Input contained no usable symbols, so no code width can be derived.
    #[error("input contains no symbols to build a dictionary from")]
    EmptyInput,

    /// The reserved escape character appeared as literal content.
    #[error("reserved escape character '%' in input at symbol {position}")]
    EscapeCollision {
        /// Zero-based position of the offending symbol, newlines excluded.
        position: usize,
    },

    /// Archive does not start with the expected magic bytes.
    #[error("invalid magic bytes: {found:02x?}")]
    InvalidMagic {
        /// The bytes actually found.
        found: [u8; 4],
    },

    /// Archive format version is not supported.
    #[error("unsupported archive version {0}")]
    UnsupportedVersion(u8),

    /// Malformed archive header.
    #[error("invalid header: {message}")]
    InvalidHeader {
        /// Description of the header defect.
        message: String,
    },

    /// Decoder read a code with no corresponding dictionary entry.
    #[error("invalid code {code} (dictionary holds {dict_len} entries)")]
    InvalidCode {
        /// The offending code value.
        code: usize,
        /// Dictionary size at the time of the read.
        dict_len: usize,
    },

    /// The code stream ended in the middle of a code.
    #[error("truncated code stream at bit {bit_position}")]
    TruncatedStream {
        /// Bit offset where the stream ran out.
        bit_position: u64,
    },

    /// Bit I/O was asked for an unsupported bit count.
    #[error("invalid bit count: {0} (must be 1-32)")]
    InvalidBitCount(u32),
}

impl LzwError {
    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

/// Result type for lexarc LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
