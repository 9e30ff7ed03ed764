//! Bit patterns stored in the dictionary.

use bcmp_core::{BcmpError, BitWriter, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Longest pattern the container's 16-bit length field can describe.
pub const MAX_PATTERN_LEN: usize = u16::MAX as usize;

/// An owned sequence of bits, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    bits: Vec<bool>,
}

impl Pattern {
    /// Create an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a one-bit pattern.
    pub fn single(bit: bool) -> Self {
        Self { bits: vec![bit] }
    }

    /// Create a pattern from bits in order.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Parse the container's ASCII rendering (`'0'`/`'1'` per bit).
    ///
    /// `index` is only used to label the error.
    pub fn from_ascii(index: u32, ascii: &[u8]) -> Result<Self> {
        let bits = ascii
            .iter()
            .map(|&byte| match byte {
                b'0' => Ok(false),
                b'1' => Ok(true),
                _ => Err(BcmpError::InvalidPatternByte { index, byte }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the pattern has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, first bit first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Last bit, if any.
    pub fn last(&self) -> Option<bool> {
        self.bits.last().copied()
    }

    /// The pattern with its last bit dropped, for patterns longer than one bit.
    pub fn prefix(&self) -> Option<Pattern> {
        if self.bits.len() < 2 {
            return None;
        }
        Some(Self {
            bits: self.bits[..self.bits.len() - 1].to_vec(),
        })
    }

    /// ASCII rendering, one `'0'`/`'1'` byte per bit.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| if b { b'1' } else { b'0' }).collect()
    }

    /// Emit every bit through a bit writer.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        for &bit in &self.bits {
            writer.write_bit(bit)?;
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = BcmpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_ascii(0, s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_roundtrip() {
        let pattern = Pattern::from_ascii(7, b"10110").unwrap();
        assert_eq!(pattern.len(), 5);
        assert_eq!(pattern.bits(), &[true, false, true, true, false]);
        assert_eq!(pattern.to_ascii(), b"10110");
        assert_eq!(pattern.to_string(), "10110");
    }

    #[test]
    fn test_invalid_ascii() {
        let err = Pattern::from_ascii(9, b"10x1").unwrap_err();
        assert!(matches!(
            err,
            BcmpError::InvalidPatternByte {
                index: 9,
                byte: b'x'
            }
        ));
    }

    #[test]
    fn test_prefix() {
        let pattern: Pattern = "101".parse().unwrap();
        assert_eq!(pattern.prefix(), Some("10".parse().unwrap()));
        assert_eq!(pattern.last(), Some(true));
        assert_eq!(Pattern::single(false).prefix(), None);
    }

    #[test]
    fn test_write_to() {
        let mut writer = BitWriter::new(Vec::new());
        "1010".parse::<Pattern>().unwrap().write_to(&mut writer).unwrap();
        "1010".parse::<Pattern>().unwrap().write_to(&mut writer).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0xAA]);
    }

    #[test]
    fn test_push_and_equality() {
        let mut pattern = Pattern::new();
        assert!(pattern.is_empty());
        pattern.push(true);
        pattern.push(false);
        assert_eq!(pattern, Pattern::from_bits([true, false]));
    }
}
