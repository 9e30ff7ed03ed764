//! Compress command implementation.

use super::CONTAINER_EXT;
use bcmp_lz78::{Lz78Config, SpoolMode, compress_file_with_config};
use std::path::{Path, PathBuf};

/// `<input>.bcmp`, keeping any existing extension.
pub fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(CONTAINER_EXT);
    PathBuf::from(name)
}

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    max_index: u32,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    let spool = if in_memory {
        SpoolMode::Memory
    } else {
        SpoolMode::TempFile
    };
    let config = Lz78Config::new(max_index).with_spool(spool);

    let report = compress_file_with_config(input, &output, &config)?;

    println!("Compressed: {} -> {}", input.display(), output.display());
    println!("  Dictionary entries: {}", report.entry_count);
    println!("  Bits processed: {}", report.bits_processed);
    println!("  Indices emitted: {}", report.indices_emitted);
    println!("  Container size: {} bytes", report.container_bytes);
    if let Some(ratio) = report.ratio_percent() {
        println!("  Ratio: {:.1}%", ratio);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("dir/notes.txt")),
            PathBuf::from("dir/notes.txt.bcmp")
        );
        assert_eq!(default_output(Path::new("raw")), PathBuf::from("raw.bcmp"));
    }

    #[test]
    fn test_cmd_compress_writes_container() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, b"some notes worth packing").unwrap();

        cmd_compress(&input, None, bcmp_lz78::MAX_INDEX, false).unwrap();
        let container = std::fs::read(dir.path().join("notes.txt.bcmp")).unwrap();
        assert!(container.starts_with(&bcmp_lz78::MAGIC));
    }

    #[test]
    fn test_cmd_compress_keeps_input_when_output_is_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("keep.txt");
        std::fs::write(&input, b"eighteen byte file").unwrap();

        let err = cmd_compress(&input, Some(&input), bcmp_lz78::MAX_INDEX, false).unwrap_err();
        assert!(err.to_string().contains("same file"));
        assert_eq!(std::fs::read(&input).unwrap(), b"eighteen byte file");
    }

    #[test]
    fn test_cmd_compress_rejects_bad_cap() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::write(&input, b"x").unwrap();
        let err = cmd_compress(&input, None, bcmp_lz78::MAX_INDEX + 1, true).unwrap_err();
        assert!(err.to_string().contains("max_index"));
    }
}
