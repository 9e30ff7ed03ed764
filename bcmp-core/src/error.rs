//! Error types for BCMP operations.
//!
//! One error type covers the whole pipeline: bit-level I/O, the varint
//! codec, dictionary construction and container parsing. Every variant is
//! fatal to the operation that raised it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for BCMP operations.
#[derive(Debug, Error)]
pub enum BcmpError {
    /// I/O error from the underlying byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container does not start with the expected magic tag.
    #[error("Bad magic: expected \"BCMP1\", found {found:02x?}")]
    BadMagic {
        /// The bytes found where the tag was expected.
        found: Vec<u8>,
    },

    /// Container ended inside the magic tag or entry count.
    #[error("Truncated container header")]
    TruncatedHeader,

    /// Container ended inside a dictionary entry's index or length field.
    #[error("Truncated dictionary entry #{entry}")]
    TruncatedDictionaryEntry {
        /// Zero-based position of the entry in the dictionary section.
        entry: u32,
    },

    /// Container ended inside a dictionary entry's pattern bytes.
    #[error("Truncated pattern for dictionary index {index}")]
    TruncatedPattern {
        /// Index of the entry whose pattern was cut short.
        index: u32,
    },

    /// Payload references an index absent from the dictionary.
    #[error("Unknown dictionary index: {index}")]
    UnknownDictionaryIndex {
        /// The unresolved index.
        index: u32,
    },

    /// Compression ran out of representable dictionary indices.
    #[error("Dictionary overflow: no index left above {max}")]
    DictionaryOverflow {
        /// Largest index the dictionary may allocate.
        max: u32,
    },

    /// Value does not fit the largest varint tier.
    #[error("Value {value} out of varint range (max 2097151)")]
    ValueOutOfRange {
        /// The rejected value.
        value: u64,
    },

    /// A pattern would exceed the 16-bit length field of the container.
    #[error("Pattern too long: {len} bits (max 65535)")]
    PatternTooLong {
        /// Length the pattern would have had.
        len: usize,
    },

    /// A pattern byte other than ASCII '0' or '1'.
    #[error("Invalid pattern byte {byte:#04x} in dictionary index {index}")]
    InvalidPatternByte {
        /// Index of the offending entry.
        index: u32,
        /// The offending byte.
        byte: u8,
    },

    /// Structurally invalid dictionary entry.
    #[error("Invalid dictionary entry {index}: {message}")]
    InvalidDictionaryEntry {
        /// Index of the offending entry.
        index: u32,
        /// Description of the problem.
        message: String,
    },

    /// The same index appears twice in the dictionary section.
    #[error("Duplicate dictionary index: {index}")]
    DuplicateIndex {
        /// The repeated index.
        index: u32,
    },

    /// Input and output name the same file.
    #[error("Input and output are the same file: {}", path.display())]
    SameFile {
        /// The shared path, canonicalized.
        path: PathBuf,
    },

    /// Invalid codec configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

/// Result type alias for BCMP operations.
pub type Result<T> = std::result::Result<T, BcmpError>;

impl BcmpError {
    /// Create a bad magic error.
    pub fn bad_magic(found: impl Into<Vec<u8>>) -> Self {
        Self::BadMagic {
            found: found.into(),
        }
    }

    /// Create an unknown dictionary index error.
    pub fn unknown_index(index: u32) -> Self {
        Self::UnknownDictionaryIndex { index }
    }

    /// Create an invalid dictionary entry error.
    pub fn invalid_entry(index: u32, message: impl Into<String>) -> Self {
        Self::InvalidDictionaryEntry {
            index,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error came from malformed container contents rather
    /// than from I/O or from the compressor's own limits.
    pub fn is_corrupt_container(&self) -> bool {
        matches!(
            self,
            Self::BadMagic { .. }
                | Self::TruncatedHeader
                | Self::TruncatedDictionaryEntry { .. }
                | Self::TruncatedPattern { .. }
                | Self::UnknownDictionaryIndex { .. }
                | Self::InvalidPatternByte { .. }
                | Self::InvalidDictionaryEntry { .. }
                | Self::DuplicateIndex { .. }
        )
    }
}
