//! Load, update and store a chapter.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::chapter::{Chapter, ChapterId};
use crate::error::{UpdateError, UpdateResult};
use crate::repository::{ChapterRepository, RepositoryError};
use crate::update::{update_chapter, ChapterEdit, ChapterUpdate};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Update(#[from] UpdateError),
}

impl ServiceError {
    /// The edit was made against an outdated chapter and should be retried
    /// against the latest version.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Update(error) if error.is_conflict())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Applies edits to stored chapters. Callers serialize edits per chapter.
pub struct ChapterService<R> {
    repository: R,
}

impl<R: ChapterRepository> ChapterService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn find(&self, id: &ChapterId) -> ServiceResult<Chapter> {
        Ok(self.repository.find(id)?)
    }

    /// Store the edited chapter; nothing is written when the edit fails.
    pub fn update<E: ChapterEdit + ?Sized>(&mut self, id: &ChapterId, edit: &mut E) -> ServiceResult<Chapter> {
        self.update_with(id, |chapter| update_chapter(chapter, edit))
    }

    pub fn apply(&mut self, id: &ChapterId, update: ChapterUpdate) -> ServiceResult<Chapter> {
        info!(kind = update.name(), chapter = %id, "Applying chapter update");
        self.update_with(id, |chapter| update.apply(chapter))
    }

    #[instrument(skip_all, fields(chapter = %id))]
    fn update_with<F>(&mut self, id: &ChapterId, edit: F) -> ServiceResult<Chapter>
    where
        F: FnOnce(&Chapter) -> UpdateResult<Chapter>,
    {
        let chapter = self.repository.find(id)?;
        debug!(
            manuscripts = chapter.manuscripts.len(),
            lines = chapter.lines.len(),
            "Loaded chapter"
        );

        let updated = edit(&chapter).inspect_err(|error| {
            warn!(%error, conflict = error.is_conflict(), "Chapter update rejected");
        })?;

        self.repository.update(id, updated.clone())?;
        info!(lines = updated.lines.len(), "Chapter updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::{Stage, TextId};
    use crate::manuscript::Manuscript;
    use crate::repository::InMemoryChapterRepository;
    use crate::update::{ChapterAlignment, ManuscriptsEdit, ManuscriptsUpdate};

    fn id() -> ChapterId {
        ChapterId::new(TextId::new("L", 1, 1), Stage::StandardBabylonian, "I")
    }

    fn service() -> ChapterService<InMemoryChapterRepository> {
        ChapterService::new(InMemoryChapterRepository::new().with_chapter(Chapter::new(id())))
    }

    #[test]
    fn test_update_stores_result() {
        let mut service = service();
        let mut edit = ManuscriptsEdit::new(ManuscriptsUpdate {
            manuscripts: vec![Manuscript::new(1)],
            uncertain_fragments: vec![],
        });

        let updated = service.update(&id(), &mut edit).unwrap();
        assert_eq!(service.find(&id()).unwrap(), updated);
        assert_eq!(updated.manuscripts.len(), 1);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let mut service = service();
        let update = ChapterUpdate::Alignment(ChapterAlignment {
            lines: vec![vec![]],
        });

        let error = service.apply(&id(), update).unwrap_err();
        assert!(error.is_conflict());
        assert_eq!(service.find(&id()).unwrap(), Chapter::new(id()));
    }

    #[test]
    fn test_missing_chapter() {
        let mut service = ChapterService::new(InMemoryChapterRepository::new());
        let update = ChapterUpdate::Manuscripts(ManuscriptsUpdate::default());
        assert!(matches!(
            service.apply(&id(), update),
            Err(ServiceError::Repository(RepositoryError::NotFound(_)))
        ));
    }
}
