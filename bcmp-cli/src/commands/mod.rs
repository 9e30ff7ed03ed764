//! Command implementations for the BCMP CLI.

pub mod compress;
pub mod decompress;
pub mod info;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;

/// Extension given to containers when no output path is named.
pub const CONTAINER_EXT: &str = "bcmp";
