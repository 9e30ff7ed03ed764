//! Compression configuration.

use bcmp_core::{BcmpError, Result};

/// Largest index the tier-3 varint can carry (2^21 - 1).
pub const MAX_INDEX: u32 = 2_097_151;

/// First index handed out after the two seeded single-bit patterns.
pub const FIRST_FREE_INDEX: u32 = 3;

/// Where the encoded payload is held while the dictionary is still growing.
///
/// The container stores the dictionary before the payload, but the
/// dictionary is only complete once the whole input has been encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpoolMode {
    /// Keep the payload in a growable buffer.
    Memory,
    /// Spill the payload to an anonymous temporary file.
    #[default]
    TempFile,
}

/// Compression parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz78Config {
    /// Largest dictionary index compression may allocate.
    pub max_index: u32,
    /// Payload spooling strategy.
    pub spool: SpoolMode,
}

impl Lz78Config {
    /// Full index space, payload spooled to a temporary file.
    pub const DEFAULT: Self = Self {
        max_index: MAX_INDEX,
        spool: SpoolMode::TempFile,
    };

    /// Full index space, payload kept in memory.
    pub const IN_MEMORY: Self = Self {
        max_index: MAX_INDEX,
        spool: SpoolMode::Memory,
    };

    /// Create a configuration with the given index cap.
    pub fn new(max_index: u32) -> Self {
        Self {
            max_index,
            ..Self::DEFAULT
        }
    }

    /// Replace the index cap.
    pub fn with_max_index(mut self, max_index: u32) -> Self {
        self.max_index = max_index;
        self
    }

    /// Replace the spooling strategy.
    pub fn with_spool(mut self, spool: SpoolMode) -> Self {
        self.spool = spool;
        self
    }

    /// Check that the cap leaves room for the seeds and fits the varint.
    pub fn validate(&self) -> Result<()> {
        if self.max_index < FIRST_FREE_INDEX - 1 || self.max_index > MAX_INDEX {
            return Err(BcmpError::invalid_config(format!(
                "max_index {} outside {}..={}",
                self.max_index,
                FIRST_FREE_INDEX - 1,
                MAX_INDEX
            )));
        }
        Ok(())
    }
}

impl Default for Lz78Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
