//! Whole-chapter persistence

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::chapter::{Chapter, ChapterId};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Chapter {0} not found")]
    NotFound(ChapterId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid chapter JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage of chapters; reads and writes whole aggregates only.
pub trait ChapterRepository {
    fn find(&self, id: &ChapterId) -> RepositoryResult<Chapter>;

    fn update(&mut self, id: &ChapterId, chapter: Chapter) -> RepositoryResult<()>;
}

/// In-memory store for tests and tooling
#[derive(Debug, Default)]
pub struct InMemoryChapterRepository {
    chapters: HashMap<ChapterId, Chapter>,
}

impl InMemoryChapterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.insert(chapter.id(), chapter);
        self
    }
}

impl ChapterRepository for InMemoryChapterRepository {
    fn find(&self, id: &ChapterId) -> RepositoryResult<Chapter> {
        self.chapters
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    fn update(&mut self, id: &ChapterId, chapter: Chapter) -> RepositoryResult<()> {
        self.chapters.insert(id.clone(), chapter);
        Ok(())
    }
}

/// One pretty-printed JSON file per chapter under `root`
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
}

impl JsonFileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, id: &ChapterId) -> PathBuf {
        self.root.join(id.file_name())
    }
}

impl ChapterRepository for JsonFileRepository {
    fn find(&self, id: &ChapterId) -> RepositoryResult<Chapter> {
        let path = self.path(id);
        if !path.exists() {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        debug!(path = %path.display(), "Reading chapter");
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| RepositoryError::Json { path, source })
    }

    fn update(&mut self, id: &ChapterId, chapter: Chapter) -> RepositoryResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path(id);
        let json = serde_json::to_string_pretty(&chapter).map_err(|source| RepositoryError::Json {
            path: path.clone(),
            source,
        })?;

        // staged write, then rename over the target
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;
        debug!(path = %path.display(), "Wrote chapter");
        Ok(())
    }
}
