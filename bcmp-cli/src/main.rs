//! BCMP CLI - bit-level LZ78 compressor
//!
//! Packs any file into a self-describing `BCMP1` container and restores it.

mod commands;

use clap::{Parser, Subcommand};
use commands::{cmd_compress, cmd_decompress, cmd_info};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "bcmp")]
#[command(author, version, about = "Bit-level LZ78 compressor")]
#[command(long_about = "
bcmp treats its input as a stream of bits, learns a dictionary of bit
patterns while reading it, and stores that dictionary followed by the
pattern indices in a BCMP1 container.

Examples:
  bcmp compress notes.txt
  bcmp compress notes.txt -o notes.bcmp --max-index 65535
  bcmp decompress notes.txt.bcmp
  bcmp info notes.txt.bcmp --json

Set RUST_LOG (e.g. RUST_LOG=bcmp_lz78=trace) for finer logging.
")]
struct Cli {
    /// Log stage boundaries (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a BCMP1 container
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Container to write (default: <input>.bcmp)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Largest dictionary index to allocate
        #[arg(long, default_value_t = bcmp_lz78::MAX_INDEX)]
        max_index: u32,

        /// Keep the payload in memory instead of a temporary file
        #[arg(long)]
        in_memory: bool,
    },

    /// Restore a file from a BCMP1 container
    #[command(alias = "d", alias = "x")]
    Decompress {
        /// Container to read
        input: PathBuf,

        /// File to write (default: <input> without .bcmp, or <input>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show container header and dictionary statistics
    #[command(alias = "i")]
    Info {
        /// Container to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            max_index,
            in_memory,
        } => cmd_compress(&input, output.as_deref(), max_index, in_memory),
        Commands::Decompress { input, output } => cmd_decompress(&input, output.as_deref()),
        Commands::Info { input, json } => cmd_info(&input, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compress_flags() {
        let cli = Cli::parse_from(["bcmp", "-v", "c", "in.txt", "--max-index", "4096", "--in-memory"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Compress {
                input,
                output,
                max_index,
                in_memory,
            } => {
                assert_eq!(input, PathBuf::from("in.txt"));
                assert_eq!(output, None);
                assert_eq!(max_index, 4096);
                assert!(in_memory);
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_parse_decompress_alias() {
        let cli = Cli::parse_from(["bcmp", "x", "in.bcmp", "-o", "out.bin"]);
        assert!(matches!(
            cli.command,
            Commands::Decompress { output: Some(ref o), .. } if o == &PathBuf::from("out.bin")
        ));
    }
}
