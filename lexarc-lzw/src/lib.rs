//! # lexarc-lzw: alphabet-seeded LZW text compression
//!
//! This crate implements an LZW variant whose dictionary is seeded from the
//! input's own character set rather than a fixed byte table. The seed
//! alphabet is the distinct non-newline characters of the input, ordered
//! ascending by code point, with one reserved escape symbol (`%`) inserted
//! at its sorted position.
//!
//! ## Protocol
//!
//! - Codes start at `ceil(log2(alphabet size))` bits and only ever grow.
//! - Width changes are signalled in-band: when the encoder matches an entry
//!   whose index no longer fits the current width, it emits the escape
//!   symbol's own code at the old width and switches. The decoder widens
//!   whenever it reads the escape code, so both sides stay in lockstep
//!   without any out-of-band coordination.
//! - The dictionary grows by exactly one entry per flushed code on both
//!   sides (the flushed sequence plus the next character).
//! - The archive carries the ordered seed alphabet and the exact code bit
//!   count, so a decoder needs nothing but the archive itself.
//!
//! Newline characters are skipped entirely; a literal `%` in the input is
//! rejected because it could not be told apart from the width signal.
//!
//! ## Example
//!
//! ```rust
//! use lexarc_lzw::{compress, decompress};
//!
//! let original = "aabba";
//! let archive = compress(original).unwrap();
//! let restored = decompress(&archive).unwrap();
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bitstream_msb;
mod container;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod trace;
mod width;

pub use bitstream_msb::CodeStream;
pub use decoder::LzwDecoder;
pub use dictionary::{Dictionary, ESCAPE};
pub use encoder::{EncodeStats, LzwEncoder};
pub use error::{LzwError, Result};
pub use trace::{EncodeTrace, StepAction, TraceStep};
pub use width::CodeWidth;

/// Compress text into a self-describing archive.
///
/// # Example
///
/// ```rust
/// use lexarc_lzw::compress;
///
/// let archive = compress("abracadabra abracadabra").unwrap();
/// assert!(!archive.is_empty());
/// ```
pub fn compress(text: &str) -> Result<Vec<u8>> {
    let (archive, _) = compress_with_stats(text)?;
    Ok(archive)
}

/// Compress text and report the stream statistics alongside the archive.
pub fn compress_with_stats(text: &str) -> Result<(Vec<u8>, EncodeStats)> {
    let mut encoder = LzwEncoder::new(text)?;
    let stream = encoder.encode(text)?;
    let archive = container::pack(&encoder.alphabet(), &stream)?;
    Ok((archive, encoder.stats()))
}

/// Compress text while recording the per-step encoder trace.
///
/// The trace is observational: the archive is identical to what
/// [`compress`] produces.
pub fn compress_traced(text: &str) -> Result<(Vec<u8>, EncodeStats, EncodeTrace)> {
    let mut encoder = LzwEncoder::new(text)?;
    let (stream, trace) = encoder.encode_traced(text)?;
    let archive = container::pack(&encoder.alphabet(), &stream)?;
    Ok((archive, encoder.stats(), trace))
}

/// Decompress an archive back into its text.
///
/// # Example
///
/// ```rust
/// use lexarc_lzw::{compress, decompress};
///
/// let archive = compress("to be or not to be").unwrap();
/// assert_eq!(decompress(&archive).unwrap(), "to be or not to be");
/// ```
pub fn decompress(data: &[u8]) -> Result<String> {
    let (alphabet, bit_len, payload) = container::unpack(data)?;
    let mut decoder = LzwDecoder::from_alphabet(&alphabet)?;
    decoder.decode(payload, bit_len)
}
