//! Info command implementation.

use bcmp_lz78::{ContainerInfo, inspect_file};
use serde::Serialize;
use std::path::Path;

/// JSON output for container information.
#[derive(Debug, Serialize)]
struct ContainerInfoJson {
    container: String,
    size: u64,
    entry_count: u32,
    learned_entries: u32,
    longest_pattern: usize,
    payload_offset: u64,
    payload_len: u64,
}

impl ContainerInfoJson {
    fn new(path: &Path, size: u64, info: &ContainerInfo) -> Self {
        Self {
            container: path.display().to_string(),
            size,
            entry_count: info.entry_count,
            learned_entries: info.entry_count.saturating_sub(2),
            longest_pattern: info.longest_pattern,
            payload_offset: info.payload_offset,
            payload_len: info.payload_len,
        }
    }
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let info = inspect_file(input)?;
    let size = std::fs::metadata(input)?.len();
    let output = ContainerInfoJson::new(input, size, &info);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Container Information");
    println!("=====================");
    println!("File: {}", output.container);
    println!("Size: {} bytes", output.size);
    println!();
    println!("Dictionary:");
    println!("  Entries: {}", output.entry_count);
    println!("  Learned: {}", output.learned_entries);
    println!("  Longest pattern: {} bits", output.longest_pattern);
    println!();
    println!("Payload:");
    println!("  Offset: {}", output.payload_offset);
    println!("  Length: {} bytes", output.payload_len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let info = ContainerInfo {
            entry_count: 5,
            longest_pattern: 3,
            payload_offset: 48,
            payload_len: 4,
        };
        let value = serde_json::to_value(ContainerInfoJson::new(Path::new("a.bcmp"), 52, &info)).unwrap();
        assert_eq!(value["container"], "a.bcmp");
        assert_eq!(value["entry_count"], 5);
        assert_eq!(value["learned_entries"], 3);
        assert_eq!(value["payload_len"], 4);
    }

    #[test]
    fn test_cmd_info_on_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.bcmp");
        std::fs::write(&path, bcmp_lz78::compress_to_vec(b"info").unwrap()).unwrap();
        cmd_info(&path, false).unwrap();
        cmd_info(&path, true).unwrap();
    }
}
