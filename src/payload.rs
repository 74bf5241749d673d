use anyhow::{Context, Result};

use std::fs;
use std::path::Path;

pub fn load_program(path: &Path) -> Result<Vec<u8>> {
    let program = fs::read(path)
        .with_context(|| format!("Failed to read program image {}", path.display()))?;
    log::info!("Loaded program image of size: {}", program.len());

    if program.is_empty() {
        log::warn!("Program image {} is empty", path.display());
    } else if program.len() % 4 != 0 {
        log::warn!("Program size {} is not a whole number of words", program.len());
    }

    Ok(program)
}

/// Parses decimal, or hex with a `0x` prefix.
pub fn parse_u32(text: &str) -> Result<u32> {
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.with_context(|| format!("Invalid unsigned integer: {text}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_program_loads() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_program(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_program_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x00, 0x00, 0x00, 0x08, 0x03]).unwrap();
        assert_eq!(load_program(file.path()).unwrap(), [0, 0, 0, 8, 3]);
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_program(&dir.path().join("missing.mips")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read program image"));
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("2048").unwrap(), 2048);
        assert_eq!(parse_u32("0x800").unwrap(), 0x800);
        assert!(parse_u32("0x").is_err());
        assert!(parse_u32("-1").is_err());
    }
}
