//! huffpack: compress and decompress files with a static Huffman code.
//!
//! ```bash
//! huffpack compress notes.txt notes.huff
//! huffpack decompress notes.huff notes.txt --strict
//! huffpack inspect notes.huff
//! huffpack demo --seed 42
//! ```
//!
//! Logging goes to stderr. `-v`/`-vv`/`-vvv` raise the level, `--quiet`
//! silences it, and `RUST_LOG` overrides both.

mod config;
mod error;
mod input_gen;

use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::info;

use config::{decode_mode, Cli, Command, DemoConfig};
use error::{exit_with_error, CliError, CliResult};
use huffpack_core::{
    codebook::CodeTable, compress_with_stats, container::parse_container, decompress_with_stats,
    tree::HuffmanTree, DecodeMode, Job,
};

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Compress {
            source,
            destination,
        } => {
            let stats = Job::compress(source, destination).run()?;
            println!(
                "compressed {} -> {} bytes ({:.1}%)",
                stats.raw_bytes,
                stats.container_bytes,
                stats.compression_ratio() * 100.0
            );
            Ok(())
        }

        Command::Decompress {
            source,
            destination,
            strict,
        } => {
            let stats = Job::decompress(source, destination)
                .with_mode(decode_mode(strict))
                .run()?;
            println!(
                "decompressed {} -> {} bytes",
                stats.container_bytes, stats.raw_bytes
            );
            Ok(())
        }

        Command::Inspect { file } => inspect(&file),

        Command::Demo {
            seed,
            size,
            out,
            print_config,
            no_stats,
        } => demo(DemoConfig::resolve(seed, size, out, print_config, !no_stats)),
    }
}

/// Print what a container holds without decoding it.
fn inspect(path: &Path) -> CliResult<()> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        println!("{}: empty container (empty original)", path.display());
        return Ok(());
    }

    let parsed = parse_container(&bytes)?;
    let tree = HuffmanTree::from_frequencies(&parsed.header.frequencies)?;
    let codes = CodeTable::from_tree(&tree)?;

    println!("{}", path.display());
    println!("Symbols:  {}", parsed.header.symbol_count());
    println!("Header:   {} bytes", parsed.header.encoded_len());
    println!(
        "Payload:  {} bytes, {} padding bits (expects {} bits)",
        parsed.payload.len(),
        parsed.header.padding,
        tree.encoded_bit_len()
    );
    println!("Original: {} bytes", tree.weight());
    println!();
    println!("{:>6}  {:>5}  {:>10}  code", "symbol", "char", "count");

    for (symbol, code) in codes.iter() {
        let shown = if symbol.is_ascii_graphic() {
            (symbol as char).to_string()
        } else {
            String::from("·")
        };
        println!(
            "  {:#04x}  {:>5}  {:>10}  {}",
            symbol,
            shown,
            parsed.header.frequencies.get(symbol),
            code
        );
    }

    Ok(())
}

/// Generate sample data, round-trip it, and verify the result by CRC.
fn demo(config: DemoConfig) -> CliResult<()> {
    if config.print_config {
        config.print();
    }

    let input = input_gen::generate_sample_data(config.seed, config.size_bytes);
    info!(seed = config.seed, bytes = input.len(), "generated sample");

    let (container, compress_stats) = compress_with_stats(&input)?;
    if let Some(path) = &config.output_file {
        fs::write(path, &container)?;
        info!(path = %path.display(), "wrote container");
    }

    let (output, decompress_stats) = decompress_with_stats(&container, DecodeMode::Strict)?;

    let expected = crc32fast::hash(&input);
    let actual = crc32fast::hash(&output);
    if expected != actual {
        return Err(CliError::Verification { expected, actual });
    }

    if config.print_stats {
        compress_stats.print_summary();
        decompress_stats.print_summary();
    }
    println!(
        "✓ round trip verified (seed {}, crc32 {:#010x})",
        config.seed, expected
    );

    Ok(())
}
