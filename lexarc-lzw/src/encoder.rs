//! LZW encoder: longest-prefix matching with escape-signalled widening.

use crate::bitstream_msb::{CodeStream, MsbBitWriter};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::trace::{EncodeTrace, StepAction, TraceStep};
use crate::width::CodeWidth;

/// Compression statistics for one encoded stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeStats {
    /// Symbols consumed, newlines excluded.
    pub symbol_count: usize,
    /// Code width at the start of the stream, in bits.
    pub initial_width: u32,
    /// Total code bits emitted, escape codes included.
    pub code_bits: u64,
    /// Number of escape codes emitted.
    pub escape_count: usize,
}

impl EncodeStats {
    /// Compressed-to-original bit ratio under the reference accounting
    /// convention: emitted bits over `initial_width * (symbol_count - 1)`.
    ///
    /// Infinite for single-symbol streams, where the denominator is zero.
    pub fn ratio(&self) -> f64 {
        let original_bits = f64::from(self.initial_width) * (self.symbol_count as f64 - 1.0);
        self.code_bits as f64 / original_bits
    }
}

/// LZW encoder owning a private dictionary and width counter.
///
/// The dictionary is seeded from the text's own character set, so the
/// encoder is constructed from the text it is about to compress.
#[derive(Debug)]
pub struct LzwEncoder {
    dict: Dictionary,
    width: CodeWidth,
    stats: EncodeStats,
}

impl LzwEncoder {
    /// Seed an encoder from the text it will compress.
    ///
    /// Fails with [`crate::LzwError::EmptyInput`] when the text has no
    /// non-newline symbols, and with [`crate::LzwError::EscapeCollision`]
    /// when it contains a literal escape character.
    pub fn new(input: &str) -> Result<Self> {
        let dict = Dictionary::from_text(input)?;
        let width = CodeWidth::for_dictionary(dict.len())?;
        let stats = EncodeStats {
            symbol_count: 0,
            initial_width: width.bits(),
            code_bits: 0,
            escape_count: 0,
        };
        Ok(Self { dict, width, stats })
    }

    /// The ordered seed alphabet, escape included, for the archive header.
    pub fn alphabet(&self) -> Vec<char> {
        self.dict.alphabet()
    }

    /// Statistics for the last encoded stream.
    pub fn stats(&self) -> EncodeStats {
        self.stats
    }

    /// Encode `input` into a packed code stream.
    ///
    /// `input` must be covered by the alphabet the encoder was seeded from,
    /// i.e. the same text passed to [`LzwEncoder::new`]. Newline characters
    /// are skipped entirely: never matched, never emitted, never counted.
    pub fn encode(&mut self, input: &str) -> Result<CodeStream> {
        self.run(input, None)
    }

    /// Encode while recording a per-step trace.
    pub fn encode_traced(&mut self, input: &str) -> Result<(CodeStream, EncodeTrace)> {
        let mut trace = EncodeTrace::new();
        let stream = self.run(input, Some(&mut trace))?;
        Ok((stream, trace))
    }

    fn run(&mut self, input: &str, mut trace: Option<&mut EncodeTrace>) -> Result<CodeStream> {
        let mut writer = MsbBitWriter::new();
        let mut buffer = String::new();

        for ch in input.chars() {
            if ch == '\n' {
                continue;
            }
            self.stats.symbol_count += 1;

            let mut candidate = buffer.clone();
            candidate.push(ch);

            if let Some(idx) = self.dict.index_of(&candidate) {
                // Still matching: keep extending the buffer.
                buffer = candidate;
                if let Some(t) = trace.as_deref_mut() {
                    t.record(TraceStep {
                        symbol: Some(ch),
                        buffer: buffer.clone(),
                        action: StepAction::Extend,
                        dict_len: self.dict.len(),
                        width: self.width.bits(),
                    });
                }

                // The matched entry may have been appended past the current
                // width's capacity. Each escape buys one more code at the
                // old width and tells the reader to switch; the next code
                // after the escapes is wide enough to carry the index.
                while self.width.must_widen_for(idx) {
                    let escape = self.dict.escape_index();
                    writer.write_bits(escape, self.width.bits())?;
                    self.width.widen();
                    self.stats.escape_count += 1;
                    if let Some(t) = trace.as_deref_mut() {
                        t.record(TraceStep {
                            symbol: None,
                            buffer: buffer.clone(),
                            action: StepAction::Escape { code: escape },
                            dict_len: self.dict.len(),
                            width: self.width.bits(),
                        });
                    }
                }
            } else {
                // Flush: the buffer is the longest match. Every single
                // character is a seed entry, so the buffer is never empty
                // here for text the encoder was seeded from.
                let code = self
                    .dict
                    .index_of(&buffer)
                    .expect("BUG: match buffer is always a dictionary entry");
                writer.write_bits(code, self.width.bits())?;

                // Exactly one append per flush, unconditionally.
                self.dict.append(candidate);

                buffer.clear();
                buffer.push(ch);
                if let Some(t) = trace.as_deref_mut() {
                    t.record(TraceStep {
                        symbol: Some(ch),
                        buffer: buffer.clone(),
                        action: StepAction::Emit { code },
                        dict_len: self.dict.len(),
                        width: self.width.bits(),
                    });
                }
            }
        }

        if !buffer.is_empty() {
            let code = self
                .dict
                .index_of(&buffer)
                .expect("BUG: match buffer is always a dictionary entry");
            writer.write_bits(code, self.width.bits())?;
            if let Some(t) = trace.as_deref_mut() {
                t.record(TraceStep {
                    symbol: None,
                    buffer: String::new(),
                    action: StepAction::Final { code },
                    dict_len: self.dict.len(),
                    width: self.width.bits(),
                });
            }
        }

        self.stats.code_bits = writer.bits_written();
        Ok(writer.into_stream())
    }
}
