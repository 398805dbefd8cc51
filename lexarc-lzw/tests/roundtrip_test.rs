//! End-to-end codec tests: round-trip law, width protocol, wire format.

use lexarc_lzw::{
    Dictionary, LzwError, StepAction, compress, compress_traced, compress_with_stats, decompress,
};

#[test]
fn test_roundtrip_simple() {
    let original = "aabba";
    let archive = compress(original).expect("compression failed");
    let restored = decompress(&archive).expect("decompression failed");

    assert_eq!(restored, original);
}

#[test]
fn test_reference_scenario_archive_bytes() {
    // "aabba" seeds the dictionary ['%', 'a', 'b'] (size 3, width 2) and
    // encodes as the codes 1 1 2 2 1, ten bits in total.
    let archive = compress("aabba").unwrap();

    let expected = [
        b'L', b'X', b'L', b'Z', // magic
        1,    // version
        3, 0, // alphabet byte length
        b'%', b'a', b'b', // alphabet
        10, 0, 0, 0, 0, 0, 0, 0, // code bit count
        0b0101_1010, 0b0100_0000, // packed codes
    ];
    assert_eq!(archive, expected);
}

#[test]
fn test_seed_dictionary_for_reference_scenario() {
    let dict = Dictionary::from_text("aabba").unwrap();

    assert_eq!(dict.len(), 3);
    assert_eq!(dict.alphabet(), vec!['%', 'a', 'b']);
}

#[test]
fn test_roundtrip_repeated_symbol() {
    for len in [1, 2, 3, 10, 100, 1000] {
        let original = "a".repeat(len);
        let archive = compress(&original).expect("compression failed");
        let restored = decompress(&archive).expect("decompression failed");

        assert_eq!(restored, original, "mismatch for run length {}", len);
    }
}

#[test]
fn test_roundtrip_alternating() {
    let original = "abababababababababababababab";
    let archive = compress(original).unwrap();

    assert_eq!(decompress(&archive).unwrap(), original);
}

#[test]
fn test_roundtrip_consecutive_escapes() {
    // Over {a, b, c} every pair can be appended before any is re-matched,
    // so the first long match can require two width increases at once.
    let original = "aabacbbccca";
    let (archive, stats) = compress_with_stats(original).unwrap();

    assert_eq!(stats.escape_count, 2);
    assert_eq!(decompress(&archive).unwrap(), original);
}

#[test]
fn test_roundtrip_text() {
    let original = "the quick brown fox jumps over the lazy dog. \
                    pack my box with five dozen liquor jugs. "
        .repeat(25);
    let archive = compress(&original).unwrap();

    assert_eq!(decompress(&archive).unwrap(), original);
}

#[test]
fn test_roundtrip_unicode_alphabet() {
    let original = "héllo wörld héllo wörld ünïcode";
    let archive = compress(original).unwrap();

    assert_eq!(decompress(&archive).unwrap(), original);
}

#[test]
fn test_roundtrip_strips_newlines() {
    let archive = compress("line one\nline two\nline one\n").unwrap();

    assert_eq!(decompress(&archive).unwrap(), "line oneline twoline one");
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(compress(""), Err(LzwError::EmptyInput)));
    assert!(matches!(compress("\n\n\n"), Err(LzwError::EmptyInput)));
}

#[test]
fn test_literal_escape_rejected() {
    let err = compress("50% off").unwrap_err();
    assert!(matches!(err, LzwError::EscapeCollision { position: 2 }));
}

#[test]
fn test_width_is_monotonic_and_tracks_escapes() {
    let text = "abcdabcdababcdcdabcdabcd".repeat(20);
    let (_, stats, trace) = compress_traced(&text).unwrap();

    let mut width = stats.initial_width;
    let mut escapes = 0;
    for step in trace.steps() {
        assert!(step.width >= width, "width must never shrink");
        if let StepAction::Escape { .. } = step.action {
            assert_eq!(step.width, width + 1, "each escape widens by one bit");
            escapes += 1;
        }
        width = step.width;
    }

    assert_eq!(escapes, stats.escape_count);
    assert!(stats.escape_count > 0, "test input must exercise widening");
}

#[test]
fn test_ratio_reference_convention() {
    let (_, stats) = compress_with_stats("aabba").unwrap();

    // total emitted bits over width_at_start * (symbol count - 1).
    assert_eq!(stats.code_bits, 10);
    assert_eq!(stats.ratio(), 10.0 / (2.0 * 4.0));
}

#[test]
fn test_truncated_stream_rejected() {
    // Shrink the declared bit count so the last code is cut mid-way. The
    // bit count field sits after the 7-byte fixed header and the 3-byte
    // alphabet "%ab".
    let mut archive = compress("aabba").unwrap();
    archive[10] = 9;

    let err = decompress(&archive).unwrap_err();
    assert!(matches!(err, LzwError::TruncatedStream { .. }));
}

#[test]
fn test_out_of_range_code_rejected() {
    // Overwrite the first packed byte so the first code is 3, which no
    // dictionary entry or pending append can account for.
    let mut archive = compress("aabba").unwrap();
    archive[18] = 0xFF;

    let err = decompress(&archive).unwrap_err();
    assert!(matches!(
        err,
        LzwError::InvalidCode {
            code: 3,
            dict_len: 3
        }
    ));
}

#[test]
fn test_chopped_archive_rejected() {
    let archive = compress("aabba").unwrap();

    for len in [0, 3, 6, 12, archive.len() - 1] {
        assert!(
            decompress(&archive[..len]).is_err(),
            "prefix of {} bytes must not decode",
            len
        );
    }
}

#[test]
fn test_alphabet_is_deterministic() {
    let a = compress("the cat sat on the mat").unwrap();
    let b = compress("the cat sat on the mat").unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_same_alphabet_different_order() {
    let forward = Dictionary::from_text("abcdef").unwrap();
    let backward = Dictionary::from_text("fedcba").unwrap();

    assert_eq!(forward.alphabet(), backward.alphabet());
}
