//! Command-line parsing and resolved configuration.
//!
//! The CLI itself is a thin clap layer. Settings that need defaults computed at
//! runtime (the demo's random seed) are resolved into a [`DemoConfig`] and
//! printed, so every run can be reproduced.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use huffpack_core::DecodeMode;

/// Default size of the generated demo input.
pub const DEFAULT_DEMO_BYTES: usize = 256 * 1024;

#[derive(Parser, Debug)]
#[command(name = "huffpack", about = "Static Huffman file compressor", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress SOURCE into a container at DESTINATION
    Compress {
        source: PathBuf,
        destination: PathBuf,
    },

    /// Restore the original bytes of the container SOURCE into DESTINATION
    Decompress {
        source: PathBuf,
        destination: PathBuf,

        /// Reject payloads that end mid-code or decode to the wrong length
        #[arg(long)]
        strict: bool,
    },

    /// Print the header, code table and payload layout of a container
    Inspect { file: PathBuf },

    /// Round-trip generated sample data and report statistics
    Demo {
        /// Random seed for the sample data (default: time-based)
        #[arg(long)]
        seed: Option<u64>,

        /// Sample size in bytes
        #[arg(long, default_value_t = DEFAULT_DEMO_BYTES)]
        size: usize,

        /// Also write the container to this path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print resolved configuration
        #[arg(long)]
        print_config: bool,

        /// Don't print the statistics summary
        #[arg(long)]
        no_stats: bool,
    },
}

impl Cli {
    /// Log filter implied by the verbosity flags, used when RUST_LOG is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Decode policy selected by `--strict`.
pub fn decode_mode(strict: bool) -> DecodeMode {
    if strict {
        DecodeMode::Strict
    } else {
        DecodeMode::Permissive
    }
}

/// Fully resolved settings for a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Seed used for sample generation
    pub seed: u64,

    /// Sample size in bytes
    pub size_bytes: usize,

    /// Optional container output path
    pub output_file: Option<PathBuf>,

    pub print_config: bool,

    pub print_stats: bool,
}

impl DemoConfig {
    /// Resolve demo arguments, deriving a seed from the clock if none given.
    pub fn resolve(
        seed: Option<u64>,
        size_bytes: usize,
        output_file: Option<PathBuf>,
        print_config: bool,
        print_stats: bool,
    ) -> Self {
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Self {
            seed,
            size_bytes,
            output_file,
            print_config,
            print_stats,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Seed:        {}", self.seed);
        println!(
            "Sample size: {} bytes ({} KiB)",
            self.size_bytes,
            self.size_bytes / 1024
        );
        match &self.output_file {
            Some(path) => println!("Container:   {}", path.display()),
            None => println!("Container:   (not written)"),
        }
        println!();
    }
}
