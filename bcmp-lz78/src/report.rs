//! Results returned by the compression and decompression drivers.

use std::path::PathBuf;

/// Outcome of a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressReport {
    /// Dictionary entries written to the container, seeds included.
    pub entry_count: u32,
    /// Input bits consumed.
    pub bits_processed: u64,
    /// Indices written to the payload.
    pub indices_emitted: u64,
    /// Payload length in bytes, padding included.
    pub payload_bytes: u64,
    /// Total container length in bytes.
    pub container_bytes: u64,
}

impl CompressReport {
    /// Input length in bytes.
    pub fn input_bytes(&self) -> u64 {
        self.bits_processed / 8
    }

    /// Container size as a percentage of the input, if the input was non-empty.
    pub fn ratio_percent(&self) -> Option<f64> {
        let input = self.input_bytes();
        (input > 0).then(|| self.container_bytes as f64 / input as f64 * 100.0)
    }
}

/// Counters from a stream decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecompressStats {
    /// Entry count declared by the container.
    pub entry_count: u32,
    /// Indices decoded from the payload.
    pub indices_decoded: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
}

/// Outcome of a file decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressReport {
    /// Path of the restored file.
    pub restored: PathBuf,
    /// Entry count declared by the container.
    pub entry_count: u32,
    /// Indices decoded from the payload.
    pub indices_decoded: u64,
    /// Bytes written to the restored file.
    pub bytes_written: u64,
}

impl DecompressReport {
    pub(crate) fn new(restored: PathBuf, stats: DecompressStats) -> Self {
        Self {
            restored,
            entry_count: stats.entry_count,
            indices_decoded: stats.indices_decoded,
            bytes_written: stats.bytes_written,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let report = CompressReport {
            bits_processed: 800,
            container_bytes: 150,
            ..Default::default()
        };
        assert_eq!(report.input_bytes(), 100);
        assert_eq!(report.ratio_percent(), Some(150.0));
        assert_eq!(CompressReport::default().ratio_percent(), None);
    }
}
