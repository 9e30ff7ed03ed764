//! Pattern dictionary (index table) management.
//!
//! [`Dictionary`] is the growing table used while compressing. Each entry
//! is stored as its parent index plus one trailing bit, so the prefix of
//! every pattern is present by construction and lookups cost one hash probe
//! per input bit.
//!
//! [`PatternTable`] is the read-only table rebuilt from a container when
//! decompressing.

use crate::config::{FIRST_FREE_INDEX, Lz78Config};
use crate::pattern::{MAX_PATTERN_LEN, Pattern};
use bcmp_core::{BcmpError, Result};
use std::collections::HashMap;

/// Index of the seeded pattern "0".
pub const ZERO_INDEX: u32 = 1;

/// Index of the seeded pattern "1".
pub const ONE_INDEX: u32 = 2;

/// Seeded index for a single-bit pattern.
#[inline]
pub fn seed_index(bit: bool) -> u32 {
    if bit { ONE_INDEX } else { ZERO_INDEX }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Index of the pattern this one extends (0 for the seeds).
    parent: u32,
    /// Trailing bit.
    bit: bool,
    /// Pattern length in bits.
    len: u16,
}

/// Compression-side dictionary.
#[derive(Debug)]
pub struct Dictionary {
    /// `nodes[i]` describes index `i`; slot 0 is unused.
    nodes: Vec<Node>,
    /// (parent index, bit) -> child index.
    children: HashMap<(u32, bool), u32>,
    /// Largest index that may be allocated.
    max_index: u32,
}

impl Dictionary {
    /// Create a dictionary seeded with "0" and "1".
    pub fn new(config: &Lz78Config) -> Result<Self> {
        config.validate()?;

        let mut dict = Self {
            nodes: Vec::new(),
            children: HashMap::new(),
            max_index: config.max_index,
        };
        dict.reset();
        Ok(dict)
    }

    /// Drop every learned pattern, keeping only the seeds.
    pub fn reset(&mut self) {
        let root = Node {
            parent: 0,
            bit: false,
            len: 0,
        };
        self.nodes.clear();
        self.children.clear();
        self.nodes.push(root);
        self.nodes.push(Node {
            parent: 0,
            bit: false,
            len: 1,
        });
        self.nodes.push(Node {
            parent: 0,
            bit: true,
            len: 1,
        });
    }

    /// Index of `parent`'s pattern extended by `bit`, if already known.
    #[inline]
    pub fn child(&self, parent: u32, bit: bool) -> Option<u32> {
        self.children.get(&(parent, bit)).copied()
    }

    /// Insert `parent`'s pattern extended by `bit` under the next index.
    ///
    /// Returns the new index.
    pub fn insert(&mut self, parent: u32, bit: bool) -> Result<u32> {
        let parent_len = self
            .nodes
            .get(parent as usize)
            .filter(|_| parent != 0)
            .map(|node| node.len as usize)
            .ok_or(BcmpError::unknown_index(parent))?;

        if let Some(existing) = self.child(parent, bit) {
            return Err(BcmpError::invalid_entry(existing, "pattern already present"));
        }

        let len = parent_len + 1;
        if len > MAX_PATTERN_LEN {
            return Err(BcmpError::PatternTooLong { len });
        }

        let index = self.next_index();
        if index > self.max_index {
            return Err(BcmpError::DictionaryOverflow {
                max: self.max_index,
            });
        }

        self.nodes.push(Node {
            parent,
            bit,
            len: len as u16,
        });
        self.children.insert((parent, bit), index);
        Ok(index)
    }

    /// Find the index holding `pattern`.
    pub fn find(&self, pattern: &Pattern) -> Option<u32> {
        let (&first, rest) = pattern.bits().split_first()?;
        rest.iter()
            .try_fold(seed_index(first), |index, &bit| self.child(index, bit))
    }

    /// Pattern length in bits for `index`.
    pub fn pattern_len(&self, index: u32) -> Option<usize> {
        if index == 0 {
            return None;
        }
        self.nodes.get(index as usize).map(|node| node.len as usize)
    }

    /// Write the ASCII rendering of `index` into `buf`, replacing its contents.
    pub fn render_ascii(&self, index: u32, buf: &mut Vec<u8>) -> Result<()> {
        buf.clear();
        if index == 0 || index as usize >= self.nodes.len() {
            return Err(BcmpError::unknown_index(index));
        }

        let mut cursor = index;
        while cursor != 0 {
            let node = self.nodes[cursor as usize];
            buf.push(if node.bit { b'1' } else { b'0' });
            cursor = node.parent;
        }
        buf.reverse();
        Ok(())
    }

    /// Rebuild the pattern stored at `index`.
    pub fn pattern(&self, index: u32) -> Option<Pattern> {
        let mut ascii = Vec::new();
        self.render_ascii(index, &mut ascii).ok()?;
        Pattern::from_ascii(index, &ascii).ok()
    }

    /// All entries in ascending index order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, Pattern)> + '_ {
        (1..self.next_index()).filter_map(|index| Some((index, self.pattern(index)?)))
    }

    /// Number of entries, seeds included.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Always false; the seeds are never removed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The index the next insertion will receive.
    pub fn next_index(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Largest index that may be allocated.
    pub fn max_index(&self) -> u32 {
        self.max_index
    }

    /// Whether the next insertion would overflow.
    pub fn is_full(&self) -> bool {
        self.next_index() > self.max_index
    }

    /// Number of learned (non-seed) entries.
    pub fn learned(&self) -> usize {
        self.len() - (FIRST_FREE_INDEX as usize - 1)
    }
}

/// Decompression-side dictionary, loaded once and then only read.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: HashMap<u32, Pattern>,
}

impl PatternTable {
    /// Create a table holding only the seeds.
    pub fn new() -> Self {
        let mut patterns = HashMap::new();
        patterns.insert(ZERO_INDEX, Pattern::single(false));
        patterns.insert(ONE_INDEX, Pattern::single(true));
        Self { patterns }
    }

    /// Add a loaded entry.
    ///
    /// Seed indices are accepted only with their seeded pattern. Any other
    /// repeated index is an error.
    pub fn insert(&mut self, index: u32, pattern: Pattern) -> Result<()> {
        if index == 0 {
            return Err(BcmpError::invalid_entry(index, "index 0 is reserved"));
        }
        if pattern.is_empty() {
            return Err(BcmpError::invalid_entry(index, "empty pattern"));
        }

        if index == ZERO_INDEX || index == ONE_INDEX {
            if self.patterns.get(&index) != Some(&pattern) {
                return Err(BcmpError::invalid_entry(
                    index,
                    format!("seeded index redefined as \"{pattern}\""),
                ));
            }
            return Ok(());
        }

        if self.patterns.contains_key(&index) {
            return Err(BcmpError::DuplicateIndex { index });
        }
        self.patterns.insert(index, pattern);
        Ok(())
    }

    /// Look up `index`.
    pub fn get(&self, index: u32) -> Result<&Pattern> {
        self.patterns
            .get(&index)
            .ok_or(BcmpError::unknown_index(index))
    }

    /// Whether `index` is present.
    pub fn contains(&self, index: u32) -> bool {
        self.patterns.contains_key(&index)
    }

    /// Number of entries, seeds included.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always false; the seeds are always present.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Length of the longest pattern.
    pub fn longest(&self) -> usize {
        self.patterns.values().map(Pattern::len).max().unwrap_or(0)
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::new(&Lz78Config::default()).unwrap()
    }

    #[test]
    fn test_dictionary_init() {
        let dict = dict();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.next_index(), 3);
        assert_eq!(dict.learned(), 0);
        assert_eq!(dict.pattern(ZERO_INDEX), Some(Pattern::single(false)));
        assert_eq!(dict.pattern(ONE_INDEX), Some(Pattern::single(true)));
        assert_eq!(dict.pattern(0), None);
        assert_eq!(dict.pattern(3), None);
    }

    #[test]
    fn test_insert_assigns_consecutive_indices() {
        let mut dict = dict();
        assert_eq!(dict.insert(ONE_INDEX, false).unwrap(), 3); // "10"
        assert_eq!(dict.insert(ZERO_INDEX, true).unwrap(), 4); // "01"
        assert_eq!(dict.insert(3, true).unwrap(), 5); // "101"

        assert_eq!(dict.pattern(5).unwrap().to_string(), "101");
        assert_eq!(dict.pattern_len(5), Some(3));
        assert_eq!(dict.find(&"01".parse().unwrap()), Some(4));
        assert_eq!(dict.find(&"11".parse().unwrap()), None);
        assert_eq!(dict.find(&Pattern::new()), None);
        assert_eq!(dict.child(3, true), Some(5));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_unknown_parents() {
        let mut dict = dict();
        dict.insert(ONE_INDEX, false).unwrap();
        assert!(matches!(
            dict.insert(ONE_INDEX, false),
            Err(BcmpError::InvalidDictionaryEntry { index: 3, .. })
        ));
        assert!(matches!(
            dict.insert(42, true),
            Err(BcmpError::UnknownDictionaryIndex { index: 42 })
        ));
        assert!(matches!(
            dict.insert(0, true),
            Err(BcmpError::UnknownDictionaryIndex { index: 0 })
        ));
        assert_eq!(dict.next_index(), 4);
    }

    #[test]
    fn test_overflow_is_a_hard_limit() {
        let mut dict = Dictionary::new(&Lz78Config::new(4)).unwrap();
        assert_eq!(dict.insert(ONE_INDEX, false).unwrap(), 3);
        assert_eq!(dict.insert(ONE_INDEX, true).unwrap(), 4);
        assert!(dict.is_full());
        assert!(matches!(
            dict.insert(ZERO_INDEX, true),
            Err(BcmpError::DictionaryOverflow { max: 4 })
        ));
        // Nothing was half-inserted
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.child(ZERO_INDEX, true), None);
    }

    #[test]
    fn test_pattern_length_cap() {
        let mut dict = dict();
        let mut index = ZERO_INDEX;
        for _ in 1..MAX_PATTERN_LEN {
            index = dict.insert(index, false).unwrap();
        }
        assert_eq!(dict.pattern_len(index), Some(MAX_PATTERN_LEN));
        assert!(matches!(
            dict.insert(index, false),
            Err(BcmpError::PatternTooLong { len }) if len == MAX_PATTERN_LEN + 1
        ));
    }

    #[test]
    fn test_entries_are_prefix_closed() {
        let mut dict = dict();
        dict.insert(ONE_INDEX, false).unwrap();
        dict.insert(ZERO_INDEX, true).unwrap();
        dict.insert(3, true).unwrap();
        dict.insert(4, false).unwrap();

        let entries: Vec<_> = dict.entries().collect();
        assert_eq!(entries.len(), 6);
        for (position, (index, pattern)) in entries.iter().enumerate() {
            assert_eq!(*index as usize, position + 1);
            if let Some(prefix) = pattern.prefix() {
                let prefix_index = dict.find(&prefix).unwrap();
                assert!(prefix_index < *index);
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut dict = dict();
        dict.insert(ONE_INDEX, false).unwrap();
        dict.reset();
        assert_eq!(dict.next_index(), 3);
        assert_eq!(dict.child(ONE_INDEX, false), None);
    }

    #[test]
    fn test_table_seeds_and_lookup() {
        let mut table = PatternTable::new();
        assert_eq!(table.len(), 2);
        table.insert(3, "10".parse().unwrap()).unwrap();
        assert_eq!(table.get(3).unwrap().to_string(), "10");
        assert_eq!(table.longest(), 2);
        assert!(matches!(
            table.get(99),
            Err(BcmpError::UnknownDictionaryIndex { index: 99 })
        ));
    }

    #[test]
    fn test_table_rejects_bad_entries() {
        let mut table = PatternTable::new();
        // Seeds may be restated, not redefined
        table.insert(ZERO_INDEX, "0".parse().unwrap()).unwrap();
        assert!(table.insert(ONE_INDEX, "0".parse().unwrap()).is_err());
        assert!(table.insert(0, "1".parse().unwrap()).is_err());
        assert!(table.insert(5, Pattern::new()).is_err());

        table.insert(5, "11".parse().unwrap()).unwrap();
        assert!(matches!(
            table.insert(5, "11".parse().unwrap()),
            Err(BcmpError::DuplicateIndex { index: 5 })
        ));
    }
}
