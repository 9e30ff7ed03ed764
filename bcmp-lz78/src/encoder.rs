//! Bit-level LZ78 encoder (compression).

use crate::config::Lz78Config;
use crate::dictionary::{Dictionary, seed_index};
use crate::varint;
use bcmp_core::{BitReader, BitWriter, Result};
use std::io::{Read, Write};

/// Counters produced by one encoding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    /// Input bits consumed.
    pub bits_processed: u64,
    /// Indices written to the payload.
    pub indices_emitted: u64,
    /// Dictionary entries at the end of the pass, seeds included.
    pub entry_count: u32,
}

/// Bit-level LZ78 encoder.
#[derive(Debug)]
pub struct Lz78Encoder {
    /// Dictionary grown during encoding.
    dict: Dictionary,
}

impl Lz78Encoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: Lz78Config) -> Result<Self> {
        let dict = Dictionary::new(&config)?;
        Ok(Self { dict })
    }

    /// Encode `input` bit by bit, writing varint indices to `sink`.
    ///
    /// # Algorithm
    ///
    /// 1. Start with an empty current pattern
    /// 2. Extend it with the next input bit
    /// 3. If the extension is known, keep it as the current pattern
    /// 4. Otherwise emit the current pattern's index, store the extension
    ///    under the next index, and restart from the bit alone
    /// 5. At end of input, emit the current pattern if there is one
    ///
    /// The only state besides the dictionary is the current pattern's index.
    pub fn encode<R: Read, W: Write>(
        &mut self,
        input: R,
        sink: &mut BitWriter<W>,
    ) -> Result<EncodeSummary> {
        let mut reader = BitReader::new(input);
        let mut summary = EncodeSummary::default();

        // Index of the current pattern; None while it is empty
        let mut current: Option<u32> = None;

        while let Some(bit) = reader.read_bit()? {
            summary.bits_processed += 1;

            let Some(prefix) = current else {
                current = Some(seed_index(bit));
                continue;
            };

            if let Some(extended) = self.dict.child(prefix, bit) {
                current = Some(extended);
                continue;
            }

            varint::encode(sink, prefix)?;
            summary.indices_emitted += 1;

            let index = self.dict.insert(prefix, bit)?;
            if index.is_power_of_two() && index >= 128 {
                tracing::trace!(index, bits = summary.bits_processed, "dictionary grew");
            }

            current = Some(seed_index(bit));
        }

        if let Some(prefix) = current {
            varint::encode(sink, prefix)?;
            summary.indices_emitted += 1;
        }

        summary.entry_count = self.dict.len() as u32;
        tracing::debug!(
            bits = summary.bits_processed,
            indices = summary.indices_emitted,
            entries = summary.entry_count,
            "encoding pass complete"
        );
        Ok(summary)
    }

    /// The dictionary built so far.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Reset the encoder to its seeded state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcmp_core::BcmpError;
    use std::io::Cursor;

    fn encode_indices(input: &[u8], config: Lz78Config) -> Result<(Vec<u32>, Lz78Encoder)> {
        let mut encoder = Lz78Encoder::new(config)?;
        let mut sink = BitWriter::new(Vec::new());
        encoder.encode(input, &mut sink)?;
        let payload = sink.finish()?;

        let mut reader = BitReader::new(Cursor::new(payload));
        let mut indices = Vec::new();
        while let Some(index) = varint::decode(&mut reader)? {
            indices.push(index);
        }
        Ok((indices, encoder))
    }

    #[test]
    fn test_worked_example() {
        let (indices, encoder) = encode_indices(&[0xAA], Lz78Config::default()).unwrap();
        assert_eq!(indices, vec![2, 1, 3, 5, 1]);

        let dict: Vec<(u32, String)> = encoder
            .dictionary()
            .entries()
            .map(|(i, p)| (i, p.to_string()))
            .collect();
        assert_eq!(
            dict,
            vec![
                (1, "0".to_string()),
                (2, "1".to_string()),
                (3, "10".to_string()),
                (4, "01".to_string()),
                (5, "101".to_string()),
                (6, "1010".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = Lz78Encoder::new(Lz78Config::default()).unwrap();
        let mut sink = BitWriter::new(Vec::new());
        let summary = encoder.encode(&b""[..], &mut sink).unwrap();
        assert_eq!(summary.bits_processed, 0);
        assert_eq!(summary.indices_emitted, 0);
        assert_eq!(summary.entry_count, 2);
        assert!(sink.finish().unwrap().is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let mut encoder = Lz78Encoder::new(Lz78Config::default()).unwrap();
        let mut sink = BitWriter::new(Vec::new());
        let summary = encoder.encode(&b"abc"[..], &mut sink).unwrap();
        assert_eq!(summary.bits_processed, 24);
        assert_eq!(summary.entry_count as usize, encoder.dictionary().len());
        // One insertion per emitted index except the final flush
        assert_eq!(
            summary.indices_emitted,
            encoder.dictionary().learned() as u64 + 1
        );
    }

    #[test]
    fn test_every_emitted_index_is_known() {
        let input: Vec<u8> = (0..=255).collect();
        let (indices, encoder) = encode_indices(&input, Lz78Config::default()).unwrap();
        let dict = encoder.dictionary();
        let total_bits: usize = indices
            .iter()
            .map(|&i| dict.pattern_len(i).unwrap())
            .sum();
        assert_eq!(total_bits, input.len() * 8);
    }

    #[test]
    fn test_all_zero_input_grows_long_patterns() {
        let (indices, encoder) = encode_indices(&[0u8; 64], Lz78Config::default()).unwrap();
        // 512 zero bits split into runs 1, 2, 3, ... -> about sqrt(2 * 512) phrases
        assert!(indices.len() < 40);
        let longest = (1..encoder.dictionary().next_index())
            .filter_map(|i| encoder.dictionary().pattern_len(i))
            .max()
            .unwrap();
        assert!(longest > 25);
    }

    #[test]
    fn test_overflow_aborts() {
        let result = encode_indices(
            b"this input needs more than a handful of entries",
            Lz78Config::new(10),
        );
        assert!(matches!(
            result,
            Err(BcmpError::DictionaryOverflow { max: 10 })
        ));
    }

    #[test]
    fn test_reset() {
        let mut encoder = Lz78Encoder::new(Lz78Config::default()).unwrap();
        let mut sink = BitWriter::new(Vec::new());
        encoder.encode(&[0xAAu8][..], &mut sink).unwrap();
        assert_eq!(encoder.dictionary().len(), 6);
        encoder.reset();
        assert_eq!(encoder.dictionary().len(), 2);
    }
}
