//! On-disk archive format.
//!
//! A compressed artifact is self-describing: the decoder needs the ordered
//! seed alphabet to rebuild identical indices, and the exact bit count of
//! the code stream, since bit packing has no natural terminator.
//!
//! Layout:
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 4    | magic `LXLZ`                            |
//! | 4      | 1    | format version (1)                      |
//! | 5      | 2    | alphabet byte length, little-endian u16 |
//! | 7      | n    | alphabet, UTF-8, ascending code points  |
//! | 7+n    | 8    | code bit count, little-endian u64       |
//! | 15+n   | m    | packed code bytes, zero-padded tail     |

use crate::bitstream_msb::CodeStream;
use crate::error::{LzwError, Result};

/// Archive magic bytes.
pub const MAGIC: [u8; 4] = *b"LXLZ";

/// Current archive format version.
pub const VERSION: u8 = 1;

/// Assemble an archive from the seed alphabet and packed code stream.
pub fn pack(alphabet: &[char], stream: &CodeStream) -> Result<Vec<u8>> {
    let alphabet_utf8: String = alphabet.iter().collect();
    if alphabet_utf8.len() > usize::from(u16::MAX) {
        return Err(LzwError::invalid_header("alphabet exceeds 65535 bytes"));
    }

    let mut out = Vec::with_capacity(15 + alphabet_utf8.len() + stream.bytes.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(alphabet_utf8.len() as u16).to_le_bytes());
    out.extend_from_slice(alphabet_utf8.as_bytes());
    out.extend_from_slice(&stream.bit_len.to_le_bytes());
    out.extend_from_slice(&stream.bytes);
    Ok(out)
}

/// Split an archive into its alphabet, code bit count, and code payload.
pub fn unpack(data: &[u8]) -> Result<(Vec<char>, u64, &[u8])> {
    if data.len() < 7 {
        return Err(LzwError::invalid_header("archive shorter than fixed header"));
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&data[..4]);
    if magic != MAGIC {
        return Err(LzwError::InvalidMagic { found: magic });
    }

    let version = data[4];
    if version != VERSION {
        return Err(LzwError::UnsupportedVersion(version));
    }

    let alpha_len = usize::from(u16::from_le_bytes([data[5], data[6]]));
    let rest = &data[7..];
    if rest.len() < alpha_len + 8 {
        return Err(LzwError::invalid_header("archive truncated inside header"));
    }

    let alphabet: Vec<char> = std::str::from_utf8(&rest[..alpha_len])
        .map_err(|_| LzwError::invalid_header("alphabet is not valid UTF-8"))?
        .chars()
        .collect();

    let mut bit_len_bytes = [0u8; 8];
    bit_len_bytes.copy_from_slice(&rest[alpha_len..alpha_len + 8]);
    let bit_len = u64::from_le_bytes(bit_len_bytes);

    let payload = &rest[alpha_len + 8..];
    if payload.len() as u64 != bit_len.div_ceil(8) {
        return Err(LzwError::invalid_header("code payload length mismatch"));
    }

    Ok((alphabet, bit_len, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stream() -> CodeStream {
        CodeStream {
            bytes: vec![0b0101_1010, 0b0100_0000],
            bit_len: 10,
        }
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let archive = pack(&['%', 'a', 'b'], &sample_stream()).unwrap();
        let (alphabet, bit_len, payload) = unpack(&archive).unwrap();

        assert_eq!(alphabet, vec!['%', 'a', 'b']);
        assert_eq!(bit_len, 10);
        assert_eq!(payload, sample_stream().bytes.as_slice());
    }

    #[test]
    fn test_unpack_rejects_bad_magic() {
        let mut archive = pack(&['%', 'a'], &sample_stream()).unwrap();
        archive[0] = b'X';

        assert!(matches!(
            unpack(&archive),
            Err(LzwError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_unpack_rejects_bad_version() {
        let mut archive = pack(&['%', 'a'], &sample_stream()).unwrap();
        archive[4] = 9;

        assert!(matches!(
            unpack(&archive),
            Err(LzwError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_unpack_rejects_short_input() {
        assert!(matches!(
            unpack(b"LXLZ"),
            Err(LzwError::InvalidHeader { .. })
        ));

        let archive = pack(&['%', 'a'], &sample_stream()).unwrap();
        assert!(matches!(
            unpack(&archive[..archive.len() - 3]),
            Err(LzwError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_unpack_rejects_payload_length_mismatch() {
        let mut archive = pack(&['%', 'a'], &sample_stream()).unwrap();
        archive.push(0);

        assert!(matches!(
            unpack(&archive),
            Err(LzwError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_non_ascii_alphabet() {
        let stream = CodeStream {
            bytes: vec![0b1000_0000],
            bit_len: 2,
        };
        let archive = pack(&['%', 'é', '日'], &stream).unwrap();
        let (alphabet, _, _) = unpack(&archive).unwrap();

        assert_eq!(alphabet, vec!['%', 'é', '日']);
    }
}
