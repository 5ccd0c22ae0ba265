use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use ebl_corpus::{Chapter, ChapterId, ChapterService, ChapterUpdate, JsonFileRepository};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Edit file: `{ "chapter": <id>, "update": <update> }`
    pub edit: PathBuf,

    /// Chapter store, overriding `dataDir` from the config
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// One edit of one stored chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    pub chapter: ChapterId,
    pub update: ChapterUpdate,
}

pub fn read_request(path: &Path) -> Result<EditRequest> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid edit {}", path.display()))
}

pub fn apply_request(data_dir: &Path, request: EditRequest) -> Result<Chapter> {
    let mut service = ChapterService::new(JsonFileRepository::new(data_dir));
    match service.apply(&request.chapter, request.update) {
        Ok(chapter) => Ok(chapter),
        Err(error) if error.is_conflict() => Err(anyhow::Error::new(error)
            .context("Edit does not match the stored chapter, retry against the latest version")),
        Err(error) => Err(error.into()),
    }
}

pub fn update(args: UpdateArgs, config: &Config, cwd: &Path) -> Result<()> {
    let data_dir = args
        .data_dir
        .unwrap_or_else(|| config.get_data_dir(cwd));
    let request = read_request(&args.edit)?;
    let id = request.chapter.clone();
    let kind = request.update.name();

    println!("✏️  {} {} update", "Applying".green().bold(), kind);
    println!("   Chapter: {}", id);
    println!("   Store: {}", data_dir.display());

    let chapter = apply_request(&data_dir, request)?;

    println!();
    println!(
        "   {} {} manuscripts, {} lines",
        "✓".green(),
        chapter.manuscripts.len(),
        chapter.lines.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebl_corpus::{ChapterRepository, Manuscript, ManuscriptsUpdate, Stage, TextId};
    use tempfile::TempDir;

    fn chapter_id() -> ChapterId {
        ChapterId::new(TextId::new("L", 1, 2), Stage::StandardBabylonian, "II")
    }

    #[test]
    fn test_parse_edit_request() {
        let json = r#"{
            "chapter": {
                "text_id": { "genre": "L", "category": 1, "index": 2 },
                "stage": "StandardBabylonian",
                "name": "II"
            },
            "update": { "type": "Manuscripts", "manuscripts": [] }
        }"#;

        let request: EditRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.chapter, chapter_id());
        assert_eq!(request.update.name(), "manuscripts");
    }

    #[test]
    fn test_apply_request_stores_chapter() {
        let dir = TempDir::new().unwrap();
        let mut repository = JsonFileRepository::new(dir.path());
        repository.update(&chapter_id(), Chapter::new(chapter_id())).unwrap();

        let request = EditRequest {
            chapter: chapter_id(),
            update: ChapterUpdate::Manuscripts(ManuscriptsUpdate {
                manuscripts: vec![Manuscript::new(1)],
                uncertain_fragments: vec![],
            }),
        };
        let path = dir.path().join("edit.json");
        fs::write(&path, serde_json::to_string(&request).unwrap()).unwrap();

        let chapter = apply_request(dir.path(), read_request(&path).unwrap()).unwrap();

        assert_eq!(chapter.manuscripts, vec![Manuscript::new(1)]);
        assert_eq!(repository.find(&chapter_id()).unwrap(), chapter);
    }

    #[test]
    fn test_apply_request_to_missing_chapter() {
        let dir = TempDir::new().unwrap();
        let request = EditRequest {
            chapter: chapter_id(),
            update: ChapterUpdate::Manuscripts(ManuscriptsUpdate::default()),
        };

        assert!(apply_request(dir.path(), request).is_err());
    }
}
