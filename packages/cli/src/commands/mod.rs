pub mod check;
pub mod render;
pub mod update;

pub use check::{check, CheckArgs};
pub use render::{render, RenderArgs};
pub use update::{update, UpdateArgs};

use anyhow::{Context, Result};
use ebl_corpus::Chapter;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub(crate) fn read_chapter(path: &Path) -> Result<Chapter> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid chapter {}", path.display()))
}

/// A single file, or every `.json` file below a directory
pub(crate) fn chapter_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(anyhow::anyhow!("Input path does not exist: {}", input.display()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_chapter_files_in_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("nested").join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = chapter_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("b.json"), dir.path().join("nested").join("a.json")]
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        assert!(chapter_files(&dir.path().join("missing")).is_err());
    }
}
