//! Bit-level packing and unpacking of Huffman payloads.
//!
//! Both directions work MSB-first: the first bit of the payload is the most
//! significant bit of the first byte.
//!
//! # Padding Rules
//! - `BitWriter::finish` pads the final partial byte with zero bits and
//!   reports how many it added (`0..=7`)
//! - `BitReader::with_padding` hides that many trailing bits, so the reader
//!   sees exactly the bits that were written
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b1011_1000]);
//! assert_eq!(packed.padding, 3);
//!
//! let mut reader = BitReader::with_padding(&packed.bytes, packed.padding).unwrap();
//! assert_eq!(reader.bits_remaining(), 5);
//! assert_eq!(reader.read_bits(5).unwrap(), 0b10111);
//! assert!(reader.is_empty());
//! ```

use crate::codebook::Code;
use crate::error::{BitIoError, Result};

/// Byte-aligned output of a [`BitWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bits, final byte zero-padded
    pub bytes: Vec<u8>,
    /// Number of zero bits appended to the final byte (0-7)
    pub padding: u8,
}

impl PackedBits {
    /// Number of meaningful bits, excluding padding.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.padding as usize
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_buffer` holds fewer than 8 pending bits, MSB-aligned
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer expecting roughly `bits` bits of output.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bit_count as usize;
            let take = remaining.min(free);
            let shift = remaining - take;

            let bits = ((value >> shift) & ((1u64 << take) - 1)) as u8;
            self.bit_buffer |= bits << (free - take);
            self.bit_count += take as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= take;
        }

        Ok(())
    }

    /// Append one Huffman code.
    pub fn write_code(&mut self, code: Code) -> Result<()> {
        self.write_bits(code.value(), code.length())
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Flush the partial byte (zero-padded) and report the padding.
    pub fn finish(mut self) -> PackedBits {
        let padding = (8 - self.bit_count) % 8;
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        PackedBits {
            bytes: self.bytes,
            padding,
        }
    }
}

/// Reads bits MSB-first from a byte buffer, ignoring trailing padding.
///
/// # Invariants
/// - `bit_position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Next bit to read (0 = MSB of first byte)
    bit_position: usize,
    /// Number of readable bits
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Read every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
            bit_len: data.len() * 8,
        }
    }

    /// Read `data` minus its last `padding` bits.
    ///
    /// # Errors
    /// `BitIoError::PaddingTooLarge` if `padding` exceeds the bits available.
    pub fn with_padding(data: &'a [u8], padding: u8) -> Result<Self> {
        let available = data.len() * 8;
        let padding = padding as usize;
        if padding > available {
            return Err(BitIoError::PaddingTooLarge { padding, available }.into());
        }
        Ok(Self {
            data,
            bit_position: 0,
            bit_len: available - padding,
        })
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once the readable bits are exhausted.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_position >= self.bit_len {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1;
        self.bit_position += 1;
        Ok(bit == 1)
    }

    /// Read up to 64 bits as one MSB-first value.
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}
