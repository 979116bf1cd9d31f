//! huffpack-core: static Huffman compression into a self-describing container
//!
//! This library turns a byte buffer into a container holding the symbol
//! frequencies, a padding count, and the packed Huffman codes, and turns such a
//! container back into the exact original bytes.
//!
//! # Architecture
//!
//! Each module depends only on the ones above it:
//! - `frequency`: byte occurrence counts
//! - `tree`: prefix-code tree construction and the tree-walk decoder
//! - `codebook`: symbol → code table derived from the tree
//! - `bitio`: MSB-first bit packing with explicit padding
//! - `container`: header layout, `compress` / `decompress`
//! - `job`: file-to-file runs for front ends
//! - `stats`: numbers describing one run
//!
//! # Example
//! ```
//! let container = huffpack_core::compress(b"aaab").unwrap();
//! assert_eq!(container.len(), 14);
//! assert_eq!(huffpack_core::decompress(&container).unwrap(), b"aaab");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: identical input always yields identical output
//! - **In memory**: whole input in, whole output out, no global state

pub mod bitio;
pub mod codebook;
pub mod container;
pub mod error;
pub mod frequency;
pub mod job;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use container::{
    compress, compress_with_stats, decompress, decompress_with, decompress_with_stats,
    ContainerHeader,
};
pub use error::{Error, ErrorKind, Result};
pub use job::Job;
pub use stats::{CompressionStats, Direction};
pub use tree::DecodeMode;
