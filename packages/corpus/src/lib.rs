//! # eBL Corpus
//!
//! Edition aggregate for chapters of cuneiform texts, the structural
//! update engine that applies alignment, lemmatization, manuscript and
//! line edits to a chapter, and the persistence contract around it.
//!
//! Everything below [`service`] is pure: edits consume a chapter and
//! return a new validated one or a typed error, and never log.

pub mod chapter;
pub mod error;
pub mod line;
pub mod manuscript;
pub mod manuscript_line;
pub mod merger;
pub mod repository;
pub mod service;
pub mod update;
pub mod validators;

pub use chapter::{Chapter, ChapterId, Stage, Text, TextId};
pub use error::{EditLocation, NotFoundError, StructuralError, UpdateError, UpdateResult};
pub use line::{Line, LineNumber, LineNumberLabel, LineVariant, OldLineNumber, TranslationLine};
pub use manuscript::{
    Manuscript, ManuscriptType, MuseumNumber, Period, PeriodModifier, Provenance, Reference,
    ReferenceType,
};
pub use manuscript_line::{ManuscriptLine, ManuscriptLineContent};
pub use merger::{merge_by_key, merge_by_position};
pub use repository::{
    ChapterRepository, InMemoryChapterRepository, JsonFileRepository, RepositoryError,
};
pub use service::{ChapterService, ServiceError};
pub use update::{
    update_chapter, update_text, AlignmentEdit, ChapterAlignment, ChapterEdit,
    ChapterLemmatization, ChapterUpdate, LemmatizationEdit, LineVariantLemmatization, LinesEdit,
    LinesUpdate, ManuscriptLineAlignment, ManuscriptsEdit, ManuscriptsUpdate,
};
pub use validators::validate_chapter;
