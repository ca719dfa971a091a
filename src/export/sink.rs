//! Destinations for exported reports.

use crate::error::{Error, Result};
use arboard::Clipboard;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy text to the system clipboard.
///
/// The clipboard is opened per call. Fails when no clipboard is available,
/// e.g. on a headless Linux box.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| Error::clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| Error::clipboard(e.to_string()))?;
    Ok(())
}

/// Write a report into `dir`, creating it if needed. Returns the file path.
pub fn write_report(dir: &Path, filename: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, text)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");

        let path = write_report(&out, "market-intelligence-fintech.md", "# Report\n").unwrap();
        assert_eq!(path, out.join("market-intelligence-fintech.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# Report\n");
    }
}
