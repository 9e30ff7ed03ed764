//! Bit-level LZ78 decoder (decompression).

use crate::dictionary::PatternTable;
use crate::varint;
use bcmp_core::{BitReader, BitWriter, Result};
use std::io::{Read, Write};

/// Counters produced by one decoding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    /// Indices read from the payload.
    pub indices_decoded: u64,
    /// Bits emitted to the output.
    pub bits_written: u64,
}

/// Bit-level LZ78 decoder over a fixed, fully loaded dictionary.
#[derive(Debug)]
pub struct Lz78Decoder {
    /// Dictionary loaded from the container.
    table: PatternTable,
}

impl Lz78Decoder {
    /// Create a decoder over a loaded table.
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    /// Decode varint indices from `reader` until the payload runs out,
    /// writing each referenced pattern to `writer`.
    ///
    /// An index missing from the table aborts decoding; bits already
    /// written stay written.
    pub fn decode<R: Read, W: Write>(
        &self,
        reader: &mut BitReader<R>,
        writer: &mut BitWriter<W>,
    ) -> Result<DecodeSummary> {
        let mut summary = DecodeSummary::default();
        let start = writer.bits_written();

        while let Some(index) = varint::decode(reader)? {
            let pattern = self.table.get(index)?;
            pattern.write_to(writer)?;
            summary.indices_decoded += 1;
        }

        summary.bits_written = writer.bits_written() - start;
        tracing::debug!(
            indices = summary.indices_decoded,
            bits = summary.bits_written,
            "decoding pass complete"
        );
        Ok(summary)
    }

    /// The loaded table.
    pub fn table(&self) -> &PatternTable {
        &self.table
    }
}
