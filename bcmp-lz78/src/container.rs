//! BCMP1 container layout.
//!
//! ```text
//! offset 0   magic "BCMP1"                          5 bytes
//! offset 5   entry count                            u32 BE
//! offset 9   entry count x {
//!                index                              u32 BE
//!                pattern length in bits             u16 BE
//!                pattern, one ASCII '0'/'1' per bit length bytes
//!            }
//! ...        payload: varint indices, MSB-first, zero-padded to a byte
//! ```
//!
//! The payload carries no length or index count; it ends with the file.

use crate::dictionary::{Dictionary, PatternTable};
use crate::pattern::Pattern;
use bcmp_core::{BcmpError, Result};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Container magic tag.
pub const MAGIC: [u8; 5] = *b"BCMP1";

/// Magic tag plus entry count.
pub const HEADER_LEN: u64 = 9;

/// Index and length fields of one dictionary entry.
const ENTRY_FIXED_LEN: u64 = 6;

/// Dictionary section as read back from a container.
#[derive(Debug, Clone)]
pub struct DictionarySection {
    /// Entry count declared in the header.
    pub entry_count: u32,
    /// Loaded index -> pattern table.
    pub table: PatternTable,
}

/// Summary of a container, gathered without decoding the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Entry count declared in the header.
    pub entry_count: u32,
    /// Longest pattern in the dictionary, in bits.
    pub longest_pattern: usize,
    /// Byte offset where the payload starts.
    pub payload_offset: u64,
    /// Payload length in bytes.
    pub payload_len: u64,
}

/// Write the magic tag, entry count and every entry in ascending index order.
///
/// Returns the number of bytes written.
pub fn write_dictionary<W: Write>(out: &mut W, dict: &Dictionary) -> Result<u64> {
    let entry_count = dict.len() as u32;
    out.write_all(&MAGIC)?;
    out.write_all(&entry_count.to_be_bytes())?;

    let mut written = HEADER_LEN;
    let mut ascii = Vec::new();
    for index in 1..dict.next_index() {
        dict.render_ascii(index, &mut ascii)?;
        let len =
            u16::try_from(ascii.len()).map_err(|_| BcmpError::PatternTooLong { len: ascii.len() })?;

        out.write_all(&index.to_be_bytes())?;
        out.write_all(&len.to_be_bytes())?;
        out.write_all(&ascii)?;
        written += ENTRY_FIXED_LEN + u64::from(len);
    }

    tracing::debug!(entries = entry_count, bytes = written, "dictionary section written");
    Ok(written)
}

/// Fill `buf` as far as the source allows; returns the bytes read.
fn fill<R: Read>(src: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

fn read_field<R: Read>(
    src: &mut R,
    buf: &mut [u8],
    truncated: impl FnOnce() -> BcmpError,
) -> Result<()> {
    if fill(src, buf)? < buf.len() {
        return Err(truncated());
    }
    Ok(())
}

/// Check the magic tag.
///
/// A short file whose bytes agree with the tag so far is a truncated
/// header; anything else that disagrees is bad magic.
pub fn read_magic<R: Read>(src: &mut R) -> Result<()> {
    let mut magic = [0u8; MAGIC.len()];
    let n = fill(src, &mut magic)?;
    if magic[..n] != MAGIC[..n] {
        return Err(BcmpError::bad_magic(&magic[..n]));
    }
    if n < MAGIC.len() {
        return Err(BcmpError::TruncatedHeader);
    }
    Ok(())
}

/// Read the header and the dictionary section.
///
/// On success the source is positioned at the first payload byte.
pub fn read_dictionary<R: Read>(src: &mut R) -> Result<DictionarySection> {
    read_magic(src)?;

    let mut count = [0u8; 4];
    read_field(src, &mut count, || BcmpError::TruncatedHeader)?;
    let entry_count = u32::from_be_bytes(count);

    let mut table = PatternTable::new();
    let mut ascii = Vec::new();
    for entry in 0..entry_count {
        let mut fixed = [0u8; ENTRY_FIXED_LEN as usize];
        read_field(src, &mut fixed, || BcmpError::TruncatedDictionaryEntry {
            entry,
        })?;
        let index = u32::from_be_bytes([fixed[0], fixed[1], fixed[2], fixed[3]]);
        let len = u16::from_be_bytes([fixed[4], fixed[5]]) as usize;

        ascii.resize(len, 0);
        read_field(src, &mut ascii, || BcmpError::TruncatedPattern { index })?;
        table.insert(index, Pattern::from_ascii(index, &ascii)?)?;
    }

    tracing::debug!(entries = entry_count, "dictionary section loaded");
    Ok(DictionarySection { entry_count, table })
}

/// Parse header and dictionary, then measure the payload.
///
/// The source is left positioned at the start of the payload.
pub fn inspect<R: Read + Seek>(src: &mut R) -> Result<ContainerInfo> {
    let section = read_dictionary(src)?;
    let payload_offset = src.stream_position()?;
    let end = src.seek(SeekFrom::End(0))?;
    src.seek(SeekFrom::Start(payload_offset))?;

    Ok(ContainerInfo {
        entry_count: section.entry_count,
        longest_pattern: section.table.longest(),
        payload_offset,
        payload_len: end - payload_offset,
    })
}
