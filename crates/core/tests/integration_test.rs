//! Integration tests for the full huffpack pipeline.
//!
//! These tests verify end-to-end behavior: input -> frequencies -> tree ->
//! codes -> container -> tree -> output, with verification that output
//! matches input byte for byte.

use huffpack_core::{
    codebook::CodeTable,
    compress, compress_with_stats,
    container::{header_len, parse_container},
    decompress, decompress_with,
    frequency::FrequencyTable,
    tree::HuffmanTree,
    DecodeMode, Error, ErrorKind,
};

/// The worked example: "aaab" -> {a:3, b:1} -> a=0, b=1 -> "0001" + 4 padding bits.
#[test]
fn test_worked_example() {
    let freqs = FrequencyTable::from_bytes(b"aaab");
    assert_eq!(freqs.get(b'a'), 3);
    assert_eq!(freqs.get(b'b'), 1);

    let tree = HuffmanTree::from_frequencies(&freqs).expect("tree");
    let codes = CodeTable::from_tree(&tree).expect("codes");
    assert_eq!(codes.get(b'a').unwrap().to_string(), "0");
    assert_eq!(codes.get(b'b').unwrap().to_string(), "1");

    let container = compress(b"aaab").expect("compression failed");
    let parsed = parse_container(&container).expect("parse failed");

    assert_eq!(parsed.header.padding, 4);
    assert_eq!(parsed.payload, &[0b0001_0000]);
    assert_eq!(decompress(&container).expect("decompression failed"), b"aaab");
}

/// Text with a skewed distribution round-trips and actually shrinks.
#[test]
fn test_text_round_trip() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(100);

    let (container, stats) = compress_with_stats(&input).expect("compression failed");
    assert!(container.len() < input.len());
    assert!(stats.bits_per_symbol() < 8.0);

    let decoded = decompress_with(&container, DecodeMode::Strict).expect("decompression failed");
    assert_eq!(decoded, input, "output doesn't match input");
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();

    let container = compress(&input).expect("compress failed");
    // Uniform weights: 8 bits each, no gain, full 256-entry header
    assert_eq!(container.len(), header_len(256) + 256);

    let decoded = decompress(&container).expect("decompress failed");
    assert_eq!(decoded, input);
}

/// 1000 repetitions of one byte: the single-leaf tree still round-trips.
#[test]
fn test_degenerate_alphabet() {
    let input = vec![0x41u8; 1000];

    let container = compress(&input).unwrap();
    let parsed = parse_container(&container).unwrap();
    assert_eq!(parsed.header.symbol_count(), 1);
    assert_eq!(parsed.header.padding, 0);
    assert_eq!(parsed.payload.len(), 125);

    assert_eq!(decompress(&container).unwrap(), input);
}

/// Empty input and empty containers map onto each other.
#[test]
fn test_empty() {
    let container = compress(&[]).unwrap();
    assert!(container.is_empty());
    assert_eq!(decompress(&container).unwrap(), Vec::<u8>::new());
}

/// Test with large data that mixes long runs and varied text.
#[test]
fn test_large_data() {
    let mut input = vec![b'X'; 64 * 1024];
    for i in 0..64 * 1024u32 {
        input.push((i.wrapping_mul(2_654_435_761) >> 24) as u8);
    }

    let container = compress(&input).unwrap();
    assert!(container.len() < input.len());

    let decoded = decompress_with(&container, DecodeMode::Strict).unwrap();
    assert_eq!(decoded.len(), input.len());
    assert_eq!(decoded, input);
}

/// Same input, same bytes out.
#[test]
fn test_deterministic_output() {
    let input = b"abracadabra, alakazam, hocus pocus";
    assert_eq!(compress(input).unwrap(), compress(input).unwrap());
}

/// A flipped payload bit is not detected (no checksum) but never panics.
#[test]
fn test_corruption_is_not_detected() {
    let input = b"test data for corruption, which the format cannot notice";

    let mut container = compress(input).unwrap();
    let len = container.len();
    container[len - 3] ^= 0xFF;

    let decoded = decompress(&container).expect("permissive decode should not fail");
    assert_ne!(decoded, input);
}

/// Cutting the payload short is reported as truncation.
#[test]
fn test_truncation_detected() {
    let input = b"truncate me, please, somewhere in the middle of the payload";
    let container = compress(input).unwrap();

    let err = decompress(&container[..container.len() - 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert!(matches!(err, Error::Truncated { .. }));

    // Cutting into the header is a format problem instead
    let err = decompress(&container[..5]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}
