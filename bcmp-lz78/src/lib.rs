//! # BCMP-LZ78: Bit-level LZ78 Compression
//!
//! This crate compresses arbitrary byte streams by treating them as a
//! sequence of bits and running LZ78 over that sequence. The result is
//! stored in a self-describing `BCMP1` container: the full dictionary
//! first, then the indices that reference it.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Bit-level dictionary**: Patterns are bit strings, seeded with "0" and "1"
//! - **3-tier varint**: Indices take 1, 2 or 3 bytes depending on magnitude
//! - **Streaming**: Input is consumed bit by bit; the payload is spooled
//!   until the dictionary is final
//!
//! ## Format
//!
//! ```text
//! "BCMP1" | entry count (u32 BE) | entries | payload
//! ```
//!
//! Each entry is an index (u32 BE), a bit length (u16 BE) and the pattern
//! as ASCII `'0'`/`'1'`. See [`container`] for the full layout and
//! [`varint`] for the index encoding.
//!
//! ## Example
//!
//! ```rust
//! use bcmp_lz78::{compress_to_vec, decompress_from_slice};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let container = compress_to_vec(original).unwrap();
//! assert!(container.starts_with(b"BCMP1"));
//!
//! let restored = decompress_from_slice(&container).unwrap();
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod container;
mod decoder;
pub mod dictionary;
mod encoder;
pub mod pattern;
mod report;
mod spool;
pub mod varint;

pub use config::{Lz78Config, MAX_INDEX, SpoolMode};
pub use container::{ContainerInfo, MAGIC};
pub use decoder::{DecodeSummary, Lz78Decoder};
pub use encoder::{EncodeSummary, Lz78Encoder};
pub use pattern::Pattern;
pub use report::{CompressReport, DecompressReport, DecompressStats};

use bcmp_core::{BcmpError, BitReader, BitWriter, Result};
use spool::Spool;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

/// Compress `input` into a `BCMP1` container written to `output`.
///
/// The payload is spooled according to `config.spool` until the
/// dictionary is complete, then written after the dictionary section.
///
/// # Errors
///
/// - [`BcmpError::InvalidConfig`](bcmp_core::BcmpError::InvalidConfig) if `config` is rejected
/// - [`BcmpError::DictionaryOverflow`](bcmp_core::BcmpError::DictionaryOverflow) if the
///   input needs more indices than `config.max_index`
/// - [`BcmpError::Io`](bcmp_core::BcmpError::Io) on read or write failure
pub fn compress<R: Read, W: Write>(
    input: R,
    mut output: W,
    config: &Lz78Config,
) -> Result<CompressReport> {
    let mut encoder = Lz78Encoder::new(*config)?;
    let mut sink = BitWriter::new(Spool::new(config.spool)?);
    let summary = encoder.encode(input, &mut sink)?;
    let spool = sink.finish()?;

    let header_bytes = container::write_dictionary(&mut output, encoder.dictionary())?;
    let payload_bytes = spool.drain_into(&mut output)?;
    output.flush()?;

    Ok(CompressReport {
        entry_count: summary.entry_count,
        bits_processed: summary.bits_processed,
        indices_emitted: summary.indices_emitted,
        payload_bytes,
        container_bytes: header_bytes + payload_bytes,
    })
}

/// Decompress a `BCMP1` container from `input`, writing the original
/// bytes to `output`.
///
/// The dictionary is loaded in full before the payload is touched; the
/// payload is then read from the same source starting right after it.
///
/// # Errors
///
/// - [`BcmpError::BadMagic`](bcmp_core::BcmpError::BadMagic) if the tag is wrong
/// - `Truncated*` variants if the header or dictionary section is cut short
/// - [`BcmpError::UnknownDictionaryIndex`](bcmp_core::BcmpError::UnknownDictionaryIndex)
///   if the payload references an index the dictionary lacks
pub fn decompress<R: Read + Seek, W: Write>(mut input: R, output: W) -> Result<DecompressStats> {
    let section = container::read_dictionary(&mut input)?;
    let payload_offset = input.stream_position()?;
    let entry_count = section.entry_count;

    let mut reader = BitReader::new(&mut input);
    reader.seek_to_byte(payload_offset)?;
    let mut writer = BitWriter::new(output);

    let decoder = Lz78Decoder::new(section.table);
    let summary = decoder.decode(&mut reader, &mut writer)?;
    writer.finish()?.flush()?;

    Ok(DecompressStats {
        entry_count,
        indices_decoded: summary.indices_decoded,
        bytes_written: summary.bits_written.div_ceil(8),
    })
}

/// Refuse to write over the file being read.
///
/// Paths are compared after canonicalization, so `./f` and `f` match. An
/// output that does not exist yet cannot be the input.
fn ensure_distinct(input_path: &Path, output_path: &Path) -> Result<()> {
    let Ok(output) = output_path.canonicalize() else {
        return Ok(());
    };
    let input = input_path.canonicalize()?;
    if input == output {
        return Err(BcmpError::SameFile { path: input });
    }
    Ok(())
}

/// Compress the file at `input_path` into a container at `output_path`.
pub fn compress_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<CompressReport> {
    compress_file_with_config(input_path, output_path, &Lz78Config::default())
}

/// Compress a file with explicit configuration.
pub fn compress_file_with_config(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &Lz78Config,
) -> Result<CompressReport> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    tracing::debug!(input = %input_path.display(), output = %output_path.display(), "compressing");
    config.validate()?;
    ensure_distinct(input_path, output_path)?;

    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(output_path)?);
    let report = compress(input, output, config)?;

    tracing::info!(
        input = %input_path.display(),
        entries = report.entry_count,
        bits = report.bits_processed,
        bytes = report.container_bytes,
        "compressed"
    );
    Ok(report)
}

/// Restore the file at `output_path` from the container at `input_path`.
pub fn decompress_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<DecompressReport> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    tracing::debug!(input = %input_path.display(), output = %output_path.display(), "decompressing");
    ensure_distinct(input_path, output_path)?;

    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(output_path)?);
    let stats = decompress(input, output)?;

    tracing::info!(
        restored = %output_path.display(),
        entries = stats.entry_count,
        bytes = stats.bytes_written,
        "decompressed"
    );
    Ok(DecompressReport::new(output_path.to_path_buf(), stats))
}

/// Summarize the container at `path` without decoding its payload.
pub fn inspect_file(path: impl AsRef<Path>) -> Result<ContainerInfo> {
    let mut input = BufReader::new(File::open(path)?);
    container::inspect(&mut input)
}

/// Compress a byte slice into an in-memory container.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(data, &mut out, &Lz78Config::IN_MEMORY)?;
    Ok(out)
}

/// Decompress an in-memory container.
pub fn decompress_from_slice(container: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(Cursor::new(container), &mut out)?;
    Ok(out)
}
