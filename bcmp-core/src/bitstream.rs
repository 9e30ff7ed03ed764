//! MSB-first bit-level I/O.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data one bit at a time. Both pack bits most-significant-bit first within
//! each byte, so the first bit written lands in bit 7 of the first byte.
//!
//! # Example
//!
//! ```
//! use bcmp_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(4).unwrap(), Some(0b1100));
//! assert_eq!(reader.read_bit().unwrap(), Some(false)); // padding
//! assert_eq!(reader.read_bits(8).unwrap(), None); // end of stream
//! ```

use crate::error::Result;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// The reader holds at most one byte of lookahead. A fresh byte is fetched
/// from the source only once every bit of the previous one has been handed
/// out, so the source position is always the byte after the current one.
///
/// End of stream is reported as `Ok(None)`, distinct from a zero bit.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Most recently fetched byte.
    current: u8,
    /// Unread bits remaining in `current` (0-8).
    bits_left: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    ///
    /// Pass `&mut source` to borrow a source that stays owned elsewhere.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get a mutable reference to the underlying reader.
    ///
    /// Reading from it directly skips any bits left in the current byte.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Whether the next bit starts a new byte.
    pub fn is_byte_aligned(&self) -> bool {
        self.bits_left == 0
    }

    fn fetch_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a single bit, or `None` at end of stream.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 {
            match self.fetch_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.bits_left = 8;
                }
                None => return Ok(None),
            }
        }

        self.bits_left -= 1;
        self.total_bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1 == 1))
    }

    /// Read up to 32 bits, first bit read in the most significant position.
    ///
    /// Returns `None` if the stream ends before `count` bits are available;
    /// the bits consumed up to that point are lost.
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | u32::from(bit),
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Seek the underlying source to `offset` and restart on a fresh byte.
    ///
    /// Any bits left over from the previously fetched byte are discarded.
    pub fn seek_to_byte(&mut self, offset: u64) -> Result<()> {
        self.reader.seek(SeekFrom::Start(offset))?;
        self.current = 0;
        self.bits_left = 0;
        Ok(())
    }

    /// Byte offset of the next byte the source will deliver.
    pub fn byte_position(&mut self) -> Result<u64> {
        Ok(self.reader.stream_position()?)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// Bits accumulate MSB-first and every completed byte goes straight to the
/// sink. [`BitWriter::finish`] zero-pads the last partial byte and returns
/// the sink. A writer dropped without `finish` (an early `?` return, for
/// instance) performs the same padding and flush on a best-effort basis.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer; `None` only after `finish`.
    writer: Option<W>,
    /// Pending bits, right-aligned.
    buffer: u64,
    /// Number of pending bits (0-7 between calls).
    bits_in_buffer: u8,
    /// Total bits written, excluding padding.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting for their byte to fill up.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    fn sink(&mut self) -> io::Result<&mut W> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("bit writer already finished"))
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };
        self.buffer = (self.buffer << count) | u64::from(value & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        // At most 39 pending bits here, so five bytes is enough.
        let mut bytes = [0u8; 5];
        let mut n = 0;
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[n] = (self.buffer >> self.bits_in_buffer) as u8;
            n += 1;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;

        if n > 0 {
            self.sink()?.write_all(&bytes[..n])?;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u32::from(bit), 1)
    }

    fn pad_and_flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let byte = (self.buffer << (8 - self.bits_in_buffer)) as u8;
            self.buffer = 0;
            self.bits_in_buffer = 0;
            self.sink()?.write_all(&[byte])?;
        }
        self.sink()?.flush()?;
        Ok(())
    }

    /// Zero-pad the final partial byte, flush, and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.pad_and_flush()?;
        self.writer
            .take()
            .ok_or_else(|| io::Error::other("bit writer already finished").into())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if self.writer.is_some() {
            // Best-effort flush on drop
            let _ = self.pad_and_flush();
        }
    }
}
