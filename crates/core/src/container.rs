//! Container serialization and parsing.
//!
//! A container packages the frequency table, the padding count, and the
//! Huffman payload. The decoder rebuilds the exact same tree from the stored
//! frequencies, so no code lengths or tree shape are stored.
//!
//! # Container Format
//!
//! ```text
//! +----------------------+
//! | symbol_count (2)     |  u16 big-endian, 1..=256
//! +----------------------+
//! | symbol (1)           |  \
//! | frequency (4)        |   } repeated symbol_count times, u32 big-endian
//! +----------------------+  /
//! | padding (1)          |  zero bits at the end of the last payload byte
//! +----------------------+
//! | payload              |  packed codes, MSB-first
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! There is no magic number, version, or checksum. The header is exactly
//! `2 + 5k + 1` bytes for `k` symbols.
//!
//! # Empty Input
//!
//! Empty input compresses to an empty container and an empty container
//! decompresses to empty output. A non-empty container that declares zero
//! symbols is rejected. Padding is always 0..=7; an aligned payload carries
//! no spare byte.

use std::time::Instant;

use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::codebook::CodeTable;
use crate::error::{Error, FormatError, HuffmanError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};
use crate::stats::{CompressionStats, Direction};
use crate::tree::{DecodeMode, HuffmanTree};

/// Size of the symbol_count field
const SYMBOL_COUNT_SIZE: usize = 2;

/// Size of one symbol table entry (symbol + u32 frequency)
const SYMBOL_ENTRY_SIZE: usize = 5;

/// Size of the padding field
const PADDING_SIZE: usize = 1;

/// Largest padding value; a whole byte of padding is never written
const MAX_PADDING: u8 = 7;

/// Header length for an alphabet of `symbols` distinct bytes.
pub fn header_len(symbols: usize) -> usize {
    SYMBOL_COUNT_SIZE + SYMBOL_ENTRY_SIZE * symbols + PADDING_SIZE
}

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Stored frequencies, one entry per distinct symbol
    pub frequencies: FrequencyTable,

    /// Number of trailing payload bits to ignore
    pub padding: u8,
}

impl ContainerHeader {
    /// Number of entries in the symbol table.
    pub fn symbol_count(&self) -> usize {
        self.frequencies.distinct()
    }

    /// Serialized length of this header.
    pub fn encoded_len(&self) -> usize {
        header_len(self.symbol_count())
    }

    /// Append the serialized header to `out`, symbols in ascending order.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyFrequencyTable` if there are no symbols
    /// - `HuffmanError::FrequencyOverflow` if a count needs more than 32 bits
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let symbol_count = self.symbol_count();
        if symbol_count == 0 {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        out.reserve(self.encoded_len());
        out.extend_from_slice(&(symbol_count as u16).to_be_bytes());

        for (symbol, count) in self.frequencies.iter() {
            let count =
                u32::try_from(count).map_err(|_| HuffmanError::FrequencyOverflow { symbol, count })?;
            out.push(symbol);
            out.extend_from_slice(&count.to_be_bytes());
        }

        out.push(self.padding);
        Ok(())
    }

    /// Parse a header from the start of `bytes`.
    ///
    /// # Errors
    /// - `FormatError::HeaderTooShort` if `bytes` ends inside the header
    /// - `FormatError::EmptyAlphabet` / `TooManySymbols` for a bad symbol_count
    /// - `FormatError::DuplicateSymbol` / `ZeroFrequency` for bad entries
    /// - `FormatError::InvalidPadding` if padding exceeds 7
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SYMBOL_COUNT_SIZE {
            return Err(FormatError::HeaderTooShort {
                required: SYMBOL_COUNT_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let symbol_count = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        if symbol_count == 0 {
            return Err(FormatError::EmptyAlphabet.into());
        }
        if symbol_count > ALPHABET_SIZE {
            return Err(FormatError::TooManySymbols {
                count: symbol_count,
            }
            .into());
        }

        let required = header_len(symbol_count);
        if bytes.len() < required {
            return Err(FormatError::HeaderTooShort {
                required,
                actual: bytes.len(),
            }
            .into());
        }

        let table_end = SYMBOL_COUNT_SIZE + SYMBOL_ENTRY_SIZE * symbol_count;
        let mut frequencies = FrequencyTable::new();

        for entry in bytes[SYMBOL_COUNT_SIZE..table_end].chunks_exact(SYMBOL_ENTRY_SIZE) {
            let symbol = entry[0];
            let count = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]) as u64;

            if count == 0 {
                return Err(FormatError::ZeroFrequency { symbol }.into());
            }
            if frequencies.get(symbol) != 0 {
                return Err(FormatError::DuplicateSymbol { symbol }.into());
            }
            frequencies.set(symbol, count);
        }

        let padding = bytes[table_end];
        if padding > MAX_PADDING {
            return Err(FormatError::InvalidPadding { padding }.into());
        }

        Ok(Self {
            frequencies,
            padding,
        })
    }
}

/// A parsed container: header plus a view of the payload.
#[derive(Debug, Clone)]
pub struct ParsedContainer<'a> {
    pub header: ContainerHeader,
    pub payload: &'a [u8],
}

/// Split `bytes` into header and payload and check the padding fits.
///
/// # Errors
/// Header errors from [`ContainerHeader::parse`], plus
/// `FormatError::PaddingExceedsPayload`.
pub fn parse_container(bytes: &[u8]) -> Result<ParsedContainer<'_>> {
    let header = ContainerHeader::parse(bytes)?;
    let payload = &bytes[header.encoded_len()..];

    let payload_bits = payload.len() * 8;
    if header.padding as usize > payload_bits {
        return Err(FormatError::PaddingExceedsPayload {
            padding: header.padding,
            payload_bits,
        }
        .into());
    }

    Ok(ParsedContainer { header, payload })
}

/// Compress `data` into a container.
///
/// # Errors
/// `InvalidInput` if the frequencies cannot be stored or coded.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with_stats(data).map(|(container, _)| container)
}

/// Compress `data` and report what the container looks like.
pub fn compress_with_stats(data: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let started = Instant::now();

    if data.is_empty() {
        debug!("empty input, writing empty container");
        return Ok((Vec::new(), CompressionStats::empty(Direction::Compress)));
    }

    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = CodeTable::from_tree(&tree)?;

    let mut writer = BitWriter::with_capacity(tree.encoded_bit_len() as usize);
    for &byte in data {
        writer.write_code(codes.code_for(byte)?)?;
    }
    let payload_bits = writer.bit_len();
    let packed = writer.finish();

    let header = ContainerHeader {
        frequencies,
        padding: packed.padding,
    };

    let mut container = Vec::with_capacity(header.encoded_len() + packed.bytes.len());
    header.write(&mut container)?;
    container.extend_from_slice(&packed.bytes);

    let stats = CompressionStats {
        direction: Direction::Compress,
        raw_bytes: data.len() as u64,
        container_bytes: container.len() as u64,
        distinct_symbols: header.symbol_count(),
        header_bytes: header.encoded_len() as u64,
        payload_bits: payload_bits as u64,
        padding: packed.padding,
        duration: started.elapsed(),
    };

    debug!(
        raw_bytes = stats.raw_bytes,
        container_bytes = stats.container_bytes,
        symbols = stats.distinct_symbols,
        max_code_len = tree.max_depth().max(1),
        padding = stats.padding,
        "compressed"
    );

    Ok((container, stats))
}

/// Decompress a container, tolerating a partial code at the end.
///
/// # Errors
/// - `InvalidFormat` if the header is malformed or truncated
/// - `Truncated` if the payload is shorter than the header implies
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    decompress_with(container, DecodeMode::Permissive)
}

/// Decompress a container with an explicit [`DecodeMode`].
pub fn decompress_with(container: &[u8], mode: DecodeMode) -> Result<Vec<u8>> {
    decompress_with_stats(container, mode).map(|(data, _)| data)
}

/// Decompress a container and report what it contained.
pub fn decompress_with_stats(
    container: &[u8],
    mode: DecodeMode,
) -> Result<(Vec<u8>, CompressionStats)> {
    let started = Instant::now();

    if container.is_empty() {
        debug!("empty container, producing empty output");
        return Ok((Vec::new(), CompressionStats::empty(Direction::Decompress)));
    }

    let ParsedContainer { header, payload } = parse_container(container)?;
    let tree = HuffmanTree::from_frequencies(&header.frequencies)?;

    let expected = tree.encoded_bit_len().div_ceil(8);
    if (payload.len() as u64) < expected {
        return Err(Error::Truncated {
            expected: expected as usize,
            actual: payload.len(),
        });
    }

    let mut reader = BitReader::with_padding(payload, header.padding)?;
    let payload_bits = reader.bits_remaining();
    let data = tree.decode(&mut reader, mode)?;

    let stats = CompressionStats {
        direction: Direction::Decompress,
        raw_bytes: data.len() as u64,
        container_bytes: container.len() as u64,
        distinct_symbols: header.symbol_count(),
        header_bytes: header.encoded_len() as u64,
        payload_bits: payload_bits as u64,
        padding: header.padding,
        duration: started.elapsed(),
    };

    debug!(
        container_bytes = stats.container_bytes,
        raw_bytes = stats.raw_bytes,
        symbols = stats.distinct_symbols,
        ?mode,
        "decompressed"
    );

    Ok((data, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let container = compress(b"aaab").unwrap();

        assert_eq!(
            container,
            vec![
                0x00, 0x02, // two symbols
                b'a', 0x00, 0x00, 0x00, 0x03, // a: 3
                b'b', 0x00, 0x00, 0x00, 0x01, // b: 1
                0x04, // padding
                0b0001_0000, // payload "0001"
            ]
        );

        assert_eq!(decompress(&container).unwrap(), b"aaab");
    }

    #[test]
    fn test_header_size() {
        for k in [1usize, 2, 17, 256] {
            let data: Vec<u8> = (0..k).map(|i| i as u8).cycle().take(k * 3).collect();
            let (container, stats) = compress_with_stats(&data).unwrap();

            let header = ContainerHeader::parse(&container).unwrap();
            assert_eq!(header.symbol_count(), k);
            assert_eq!(header.encoded_len(), 2 + 5 * k + 1);
            assert_eq!(stats.header_bytes as usize, 2 + 5 * k + 1);
            assert_eq!(
                container.len() - header.encoded_len(),
                (stats.payload_bits as usize).div_ceil(8)
            );
        }
    }

    #[test]
    fn test_empty_round_trip() {
        let container = compress(b"").unwrap();
        assert!(container.is_empty());
        assert!(decompress(&container).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol() {
        let data = vec![0x41u8; 1000];
        let container = compress(&data).unwrap();

        // 1000 one-bit codes = 125 bytes, no padding
        assert_eq!(container.len(), 8 + 125);
        assert_eq!(container[7], 0);
        assert_eq!(decompress(&container).unwrap(), data);
        assert_eq!(decompress_with(&container, DecodeMode::Strict).unwrap(), data);
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).rev().chain(0..=255).collect();
        let container = compress(&data).unwrap();
        assert_eq!(decompress_with(&container, DecodeMode::Strict).unwrap(), data);
    }

    #[test]
    fn test_header_order_does_not_matter() {
        let data = b"hello hello world";
        let container = compress(data).unwrap();
        let header = ContainerHeader::parse(&container).unwrap();
        let payload = &container[header.encoded_len()..];

        // Same header, symbol entries written in descending order
        let entries: Vec<(u8, u64)> = header.frequencies.iter().collect();
        let mut reordered = (entries.len() as u16).to_be_bytes().to_vec();
        for (symbol, count) in entries.iter().rev() {
            reordered.push(*symbol);
            reordered.extend_from_slice(&(*count as u32).to_be_bytes());
        }
        reordered.push(header.padding);
        reordered.extend_from_slice(payload);

        assert_eq!(decompress(&reordered).unwrap(), data);
    }

    #[test]
    fn test_header_too_short() {
        let result = decompress(&[0x00]);
        assert!(matches!(
            result,
            Err(Error::InvalidFormat(FormatError::HeaderTooShort {
                required: 2,
                actual: 1
            }))
        ));

        // Declares two symbols but carries one entry
        let result = decompress(&[0x00, 0x02, b'a', 0, 0, 0, 3]);
        assert!(matches!(
            result,
            Err(Error::InvalidFormat(FormatError::HeaderTooShort {
                required: 13,
                actual: 7
            }))
        ));
    }

    #[test]
    fn test_empty_alphabet() {
        let result = decompress(&[0x00, 0x00, 0x00]);
        assert!(matches!(
            result,
            Err(Error::InvalidFormat(FormatError::EmptyAlphabet))
        ));
    }

    #[test]
    fn test_too_many_symbols() {
        let result = decompress(&[0x01, 0x01]);
        assert!(matches!(
            result,
            Err(Error::InvalidFormat(FormatError::TooManySymbols { count: 257 }))
        ));
    }

    #[test]
    fn test_bad_entries() {
        let duplicate = [0x00, 0x02, b'a', 0, 0, 0, 1, b'a', 0, 0, 0, 2, 0, 0x80];
        assert!(matches!(
            decompress(&duplicate),
            Err(Error::InvalidFormat(FormatError::DuplicateSymbol { symbol: b'a' }))
        ));

        let zero = [0x00, 0x01, b'a', 0, 0, 0, 0, 0];
        assert!(matches!(
            decompress(&zero),
            Err(Error::InvalidFormat(FormatError::ZeroFrequency { symbol: b'a' }))
        ));
    }

    #[test]
    fn test_invalid_padding() {
        let mut container = compress(b"aaab").unwrap();
        container[12] = 9;
        assert!(matches!(
            decompress(&container),
            Err(Error::InvalidFormat(FormatError::InvalidPadding { padding: 9 }))
        ));
    }

    #[test]
    fn test_padding_exceeds_payload() {
        // One symbol, padding 3, no payload bytes at all
        let container = [0x00, 0x01, b'a', 0, 0, 0, 1, 3];
        assert!(matches!(
            decompress(&container),
            Err(Error::InvalidFormat(FormatError::PaddingExceedsPayload {
                padding: 3,
                payload_bits: 0
            }))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let data = b"a fairly ordinary sentence with enough bits to span bytes";
        let container = compress(data).unwrap();
        let cut = &container[..container.len() - 2];

        let result = decompress(cut);
        match result {
            Err(Error::Truncated { expected, actual }) => {
                assert_eq!(expected, actual + 2);
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_full_byte_padding_rejected() {
        // "aaaaaaab" packs to exactly one byte, so padding is 0
        let container = compress(b"aaaaaaab").unwrap();
        assert_eq!(container[12], 0);

        let mut padded = container.clone();
        padded[12] = 8;
        padded.push(0x00);

        for mode in [DecodeMode::Permissive, DecodeMode::Strict] {
            assert!(matches!(
                decompress_with(&padded, mode),
                Err(Error::InvalidFormat(FormatError::InvalidPadding { padding: 8 }))
            ));
        }
    }

    #[test]
    fn test_frequency_overflow() {
        let mut frequencies = FrequencyTable::new();
        frequencies.set(b'x', u32::MAX as u64 + 1);
        let header = ContainerHeader {
            frequencies,
            padding: 0,
        };

        let mut out = Vec::new();
        assert!(matches!(
            header.write(&mut out),
            Err(Error::InvalidInput(HuffmanError::FrequencyOverflow { symbol: b'x', .. }))
        ));
    }

    #[test]
    fn test_stats_agree_with_container() {
        let data = b"the rain in spain stays mainly in the plain";
        let (container, stats) = compress_with_stats(data).unwrap();

        assert_eq!(stats.raw_bytes, data.len() as u64);
        assert_eq!(stats.container_bytes, container.len() as u64);
        assert!(stats.padding <= 7);
        assert_eq!((stats.payload_bits + stats.padding as u64) % 8, 0);

        let (decoded, back) = decompress_with_stats(&container, DecodeMode::Strict).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(back.direction, Direction::Decompress);
        assert_eq!(back.payload_bits, stats.payload_bits);
        assert_eq!(back.header_bytes, stats.header_bytes);
    }
}
