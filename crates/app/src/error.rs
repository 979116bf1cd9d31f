//! Error reporting for the CLI.
//!
//! Core errors are mapped to a message per [`ErrorKind`], so users see what
//! went wrong in terms of their files rather than the codec's internals.

use std::process;

use huffpack_core::{Error, ErrorKind};
use thiserror::Error;

/// Exit codes for the CLI.
pub const EXIT_ERROR: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {0}", describe(.0.kind()))]
    Core(#[from] Error),

    /// Demo output did not match its input
    #[error("round-trip verification failed: crc32 {expected:#010x} != {actual:#010x}")]
    Verification { expected: u32, actual: u32 },
}

/// User-facing summary of an error kind.
pub fn describe(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidInput => "cannot build a code for this input",
        ErrorKind::InvalidFormat => "not a valid huffpack container",
        ErrorKind::Truncated => "container is truncated",
        ErrorKind::Io => "file access failed",
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Core(Error::Io(e))
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Print the error to stderr and exit.
pub fn exit_with_error(error: CliError) -> ! {
    eprintln!("error: {error}");
    process::exit(EXIT_ERROR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use huffpack_core::decompress;

    #[test]
    fn test_message_names_the_kind() {
        let err = CliError::from(decompress(&[0x00, 0x00, 0x00]).unwrap_err());
        let message = err.to_string();
        assert!(message.starts_with("not a valid huffpack container: "));
        assert!(message.contains("empty symbol alphabet"));
    }

    #[test]
    fn test_io_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CliError::from(io);
        assert!(err.to_string().starts_with("file access failed"));
    }

    #[test]
    fn test_verification_message() {
        let err = CliError::Verification {
            expected: 0xDEADBEEF,
            actual: 0x1,
        };
        assert_eq!(
            err.to_string(),
            "round-trip verification failed: crc32 0xdeadbeef != 0x00000001"
        );
    }
}
