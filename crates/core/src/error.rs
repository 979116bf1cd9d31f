//! Error types for huffpack.
//!
//! All operations return structured errors rather than panicking. The
//! top-level [`Error`] groups failures into the few kinds a caller actually
//! needs to tell apart (see [`ErrorKind`]); the nested enums carry detail.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// - Invalid input: the symbol set cannot be turned into a code
/// - Invalid format: the container header or payload is inconsistent
/// - Truncated: the payload is shorter than the header implies
/// - Bit I/O: reading past the end of a bit stream
/// - I/O: file system operations (jobs only)
#[derive(Debug, Error)]
pub enum Error {
    /// Tree or code construction failed (e.g., empty frequency table)
    #[error("invalid input: {0}")]
    InvalidInput(#[from] HuffmanError),

    /// Container header or payload is malformed
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// Payload holds fewer bytes than the stored frequencies require
    #[error("truncated payload: header implies {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`], for front ends that map failures to
/// messages without inspecting the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidFormat,
    Truncated,
    Io,
}

impl Error {
    /// Return the kind of this error.
    ///
    /// A bit-level EOF can only escape the decoder when the container lied
    /// about its payload, so it is reported as a format problem.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::InvalidFormat(_) | Error::BitIo(_) => ErrorKind::InvalidFormat,
            Error::Truncated { .. } => ErrorKind::Truncated,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Asked to ignore more trailing bits than the buffer holds
    #[error("cannot drop {padding} padding bits from a {available}-bit buffer")]
    PaddingTooLarge { padding: usize, available: usize },

    /// Invalid bit count (more than 64 bits in one code)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman construction errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build a tree for zero symbols")]
    EmptyFrequencyTable,

    /// A count does not fit the container's 32-bit frequency field
    #[error("symbol {symbol:#04x} occurs {count} times, more than the container can record")]
    FrequencyOverflow { symbol: u8, count: u64 },

    /// Code length exceeds maximum (64 bits)
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: usize },

    /// Asked to encode a byte the code table has no entry for
    #[error("symbol {symbol:#04x} has no code")]
    UnknownSymbol { symbol: u8 },
}

/// Container format errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Buffer is too short to hold the header it declares
    #[error("header too short: need at least {required} bytes, got {actual}")]
    HeaderTooShort { required: usize, actual: usize },

    /// symbol_count is zero
    #[error("header declares an empty symbol alphabet")]
    EmptyAlphabet,

    /// symbol_count is larger than the byte alphabet
    #[error("header declares {count} symbols, at most 256 allowed")]
    TooManySymbols { count: usize },

    /// The same symbol appears twice in the symbol table
    #[error("symbol {symbol:#04x} listed more than once")]
    DuplicateSymbol { symbol: u8 },

    /// A listed symbol has a frequency of zero
    #[error("symbol {symbol:#04x} listed with zero frequency")]
    ZeroFrequency { symbol: u8 },

    /// Padding byte outside the accepted range
    #[error("invalid padding {padding}: at most 7 trailing bits can be ignored")]
    InvalidPadding { padding: u8 },

    /// Padding claims more bits than the payload holds
    #[error("padding of {padding} bits exceeds payload of {payload_bits} bits")]
    PaddingExceedsPayload { padding: u8, payload_bits: usize },

    /// Payload ended in the middle of a code (strict decoding only)
    #[error("payload ends mid-code: {dangling} bits left after symbol {decoded}")]
    DanglingBits { dangling: usize, decoded: usize },

    /// Decoded symbol count disagrees with the header (strict decoding only)
    #[error("decoded {actual} symbols, header frequencies sum to {expected}")]
    SymbolCountMismatch { expected: u64, actual: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
