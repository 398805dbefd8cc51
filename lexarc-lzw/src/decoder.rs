//! LZW decoder: rebuilds the dictionary in lockstep with the encoder.
//!
//! The decoder is the exact inverse of the encode state machine. An escape
//! code widens the next read and emits nothing; every other code emits its
//! entry and appends one dictionary entry (after the first code) at the
//! same point the encoder appended one.

use crate::bitstream_msb::MsbBitReader;
use crate::dictionary::Dictionary;
use crate::error::{LzwError, Result};
use crate::width::CodeWidth;

/// LZW decoder owning a private dictionary and width counter.
#[derive(Debug)]
pub struct LzwDecoder {
    dict: Dictionary,
    width: CodeWidth,
}

impl LzwDecoder {
    /// Seed a decoder from the transmitted alphabet.
    pub fn from_alphabet(alphabet: &[char]) -> Result<Self> {
        let dict = Dictionary::from_alphabet(alphabet)?;
        let width = CodeWidth::for_dictionary(dict.len())?;
        Ok(Self { dict, width })
    }

    /// Decode exactly `bit_len` bits of packed codes from `payload`.
    ///
    /// Terminates precisely on the declared bit count; a boundary that cuts
    /// into the middle of a code means the stream is corrupt or truncated,
    /// and nothing decoded past that point is returned.
    pub fn decode(&mut self, payload: &[u8], bit_len: u64) -> Result<String> {
        let mut reader = MsbBitReader::new(payload);
        let mut output = String::new();
        let mut prev: Option<String> = None;

        while reader.bits_read() < bit_len {
            let width = self.width.bits();
            if bit_len - reader.bits_read() < u64::from(width) {
                return Err(LzwError::TruncatedStream {
                    bit_position: reader.bits_read(),
                });
            }
            let code = reader.read_bits(width)?;

            if code == self.dict.escape_index() {
                // Width-increase signal: no output, the next code is one
                // bit wider.
                self.width.widen();
                continue;
            }

            let entry = if let Some(entry) = self.dict.entry(code) {
                entry.to_string()
            } else {
                match prev.as_deref() {
                    // The encoder emitted the entry it appended one flush
                    // ago; our copy lags one append behind, so the entry
                    // can only be the previous output extended by its own
                    // first character.
                    Some(prev_entry) if code == self.dict.len() => {
                        let mut entry = String::with_capacity(prev_entry.len() + 1);
                        entry.push_str(prev_entry);
                        if let Some(first) = prev_entry.chars().next() {
                            entry.push(first);
                        }
                        entry
                    }
                    _ => {
                        return Err(LzwError::InvalidCode {
                            code,
                            dict_len: self.dict.len(),
                        });
                    }
                }
            };

            // Mirror the encoder's flush-time append: previous entry plus
            // the first character of the current one.
            if let Some(prev_entry) = prev.take() {
                let mut grown = prev_entry;
                if let Some(first) = entry.chars().next() {
                    grown.push(first);
                }
                self.dict.append(grown);
            }

            output.push_str(&entry);
            prev = Some(entry);
        }

        Ok(output)
    }
}
