//! File-to-file jobs.
//!
//! A [`Job`] is what a front end hands to the core: a source path, a
//! destination path and a direction. The whole source is read into memory,
//! transformed, and written out in one go. Nothing is written when the
//! transformation fails.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::container::{compress_with_stats, decompress_with_stats};
use crate::error::Result;
use crate::stats::{CompressionStats, Direction};
use crate::tree::DecodeMode;

/// One source → destination transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub direction: Direction,
    /// Only consulted when decompressing
    pub mode: DecodeMode,
}

impl Job {
    pub fn compress(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            direction: Direction::Compress,
            mode: DecodeMode::default(),
        }
    }

    pub fn decompress(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            direction: Direction::Decompress,
            mode: DecodeMode::default(),
        }
    }

    /// Use `mode` when decompressing.
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Read the source, transform it, write the destination.
    ///
    /// # Errors
    /// `Error::Io` for file access failures, otherwise whatever the
    /// compress/decompress step reports.
    pub fn run(&self) -> Result<CompressionStats> {
        let input = read_file(&self.source)?;

        let (output, stats) = match self.direction {
            Direction::Compress => compress_with_stats(&input)?,
            Direction::Decompress => decompress_with_stats(&input, self.mode)?,
        };

        fs::write(&self.destination, &output)?;

        info!(
            direction = %self.direction,
            source = %self.source.display(),
            destination = %self.destination.display(),
            read = input.len(),
            written = output.len(),
            "job complete"
        );

        Ok(stats)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read source");
    Ok(data)
}
