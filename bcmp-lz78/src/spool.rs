//! Payload spooling.
//!
//! The dictionary section precedes the payload in the container, but the
//! dictionary is only final after the last input bit. The payload is held
//! here until the header has been written.

use crate::config::SpoolMode;
use bcmp_core::Result;
use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};

/// Temporary home for the encoded payload.
#[derive(Debug)]
pub enum Spool {
    /// Growable buffer.
    Memory(Vec<u8>),
    /// Anonymous temporary file, removed by the OS once closed.
    File(BufWriter<File>),
}

impl Spool {
    /// Open a spool of the requested kind.
    pub fn new(mode: SpoolMode) -> Result<Self> {
        match mode {
            SpoolMode::Memory => Ok(Spool::Memory(Vec::new())),
            SpoolMode::TempFile => Ok(Spool::File(BufWriter::new(tempfile::tempfile()?))),
        }
    }

    /// Copy everything spooled so far to `out`, consuming the spool.
    ///
    /// Returns the number of bytes copied.
    pub fn drain_into<W: Write>(self, out: &mut W) -> Result<u64> {
        match self {
            Spool::Memory(buf) => {
                out.write_all(&buf)?;
                Ok(buf.len() as u64)
            }
            Spool::File(writer) => {
                let mut file = writer.into_inner().map_err(|e| e.into_error())?;
                file.seek(SeekFrom::Start(0))?;
                Ok(io::copy(&mut file, out)?)
            }
        }
    }
}

impl Write for Spool {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Spool::Memory(v) => v.write(buf),
            Spool::File(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Spool::Memory(_) => Ok(()),
            Spool::File(f) => f.flush(),
        }
    }
}
