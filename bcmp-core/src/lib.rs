//! # BCMP Core
//!
//! Core components for the BCMP bit-level dictionary compressor.
//!
//! - [`bitstream`]: MSB-first bit-level I/O over `Read`/`Write` sources
//! - [`error`]: Error types shared by every layer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     bcmp compress / decompress / info                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Container + Drivers                                     │
//! │     "BCMP1" header, dictionary section, payload         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     bit-level LZ78 dictionary, 3-tier bit varint        │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitReader/BitWriter, BcmpError                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bcmp_core::bitstream::BitReader;
//! use std::io::Cursor;
//!
//! let mut reader = BitReader::new(Cursor::new(vec![0xAA]));
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_bit().unwrap(), Some(false));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{BcmpError, Result};
