//! Decompress command implementation.

use super::CONTAINER_EXT;
use bcmp_lz78::decompress_file;
use std::path::{Path, PathBuf};

/// Strip a trailing `.bcmp`, or append `.out` when there is none.
pub fn default_output(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == CONTAINER_EXT) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);

    let report = decompress_file(input, &output)?;

    println!("Restored: {}", report.restored.display());
    println!("  Dictionary entries: {}", report.entry_count);
    println!("  Indices decoded: {}", report.indices_decoded);
    println!("  Bytes written: {}", report.bytes_written);
    Ok(())
}
