//! Statistics for a single compress or decompress call.
//!
//! Every operation in [`crate::container`] can hand back a
//! [`CompressionStats`] describing what it did: sizes on both sides, how the
//! container splits into header and payload, and how long it took. Sizes are
//! always "container side" vs "raw side" regardless of direction, so the ratio
//! means the same thing for both.

use std::fmt;
use std::time::Duration;

/// Which way the data went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Compress,
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Compress => f.write_str("compress"),
            Direction::Decompress => f.write_str("decompress"),
        }
    }
}

/// Observable numbers about one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    pub direction: Direction,

    // === Sizes ===
    /// Uncompressed byte count
    pub raw_bytes: u64,

    /// Container byte count (header + payload)
    pub container_bytes: u64,

    // === Container layout ===
    /// Distinct symbols in the header
    pub distinct_symbols: usize,

    /// Header bytes (symbol count, symbol table, padding byte)
    pub header_bytes: u64,

    /// Meaningful payload bits, excluding padding
    pub payload_bits: u64,

    /// Padding bits in the final payload byte
    pub padding: u8,

    // === Timing ===
    pub duration: Duration,
}

impl CompressionStats {
    /// Stats for an operation that moved no data.
    pub fn empty(direction: Direction) -> Self {
        Self {
            direction,
            raw_bytes: 0,
            container_bytes: 0,
            distinct_symbols: 0,
            header_bytes: 0,
            payload_bits: 0,
            padding: 0,
            duration: Duration::ZERO,
        }
    }

    /// Container size relative to raw size (0.0 when there is no data).
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Average payload bits spent per raw byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.raw_bytes as f64
        }
    }

    /// Payload byte count (container minus header).
    pub fn payload_bytes(&self) -> u64 {
        self.container_bytes - self.header_bytes
    }

    /// Raw bytes processed per second.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.raw_bytes as f64 / secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== {} ===", self.direction);
        println!("Raw:       {} bytes", self.raw_bytes);
        println!("Container: {} bytes", self.container_bytes);
        println!(
            "  header:  {} bytes ({} symbols)",
            self.header_bytes, self.distinct_symbols
        );
        println!(
            "  payload: {} bytes ({} bits + {} padding)",
            self.payload_bytes(),
            self.payload_bits,
            self.padding
        );
        println!("Ratio:     {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits/byte: {:.3}", self.bits_per_symbol());
        println!("Duration:  {} µs", self.duration.as_micros());
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "direction={}\n\
             raw_bytes={}\n\
             container_bytes={}\n\
             distinct_symbols={}\n\
             header_bytes={}\n\
             payload_bits={}\n\
             padding={}\n\
             compression_ratio={:.4}\n\
             duration_us={}\n",
            self.direction,
            self.raw_bytes,
            self.container_bytes,
            self.distinct_symbols,
            self.header_bytes,
            self.payload_bits,
            self.padding,
            self.compression_ratio(),
            self.duration.as_micros(),
        )
    }
}
