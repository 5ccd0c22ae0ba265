//! Error types for chapter updates

use std::fmt;
use thiserror::Error;

use ebl_transliteration::{AlignmentError, EnclosureError, LemmatizationError};

pub type UpdateResult<T> = Result<T, UpdateError>;

/// Chapter-level invariant violation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Duplicate manuscript id {0}")]
    DuplicateManuscriptId(u32),

    #[error("Duplicate siglum {0}")]
    DuplicateSiglum(String),

    #[error("Manuscript {0} has both a museum number and an accession")]
    MuseumNumberAndAccession(u32),

    #[error("Duplicate line number {0}")]
    DuplicateLineNumber(String),

    #[error("Line {0} has no variants")]
    NoVariants(String),

    #[error("Line {line} refers to unknown manuscript {manuscript_id}")]
    UnknownManuscript { line: String, manuscript_id: u32 },

    #[error("Duplicate line {labels} in manuscript {manuscript_id}")]
    DuplicateLabels { manuscript_id: u32, labels: String },

    #[error("Invalid translation extent on line {line}: {reason}")]
    InvalidTranslationExtent { line: String, reason: String },

    #[error("Line {0} is both edited and deleted")]
    ConflictingLineEdit(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Chapter {0} not found")]
    Chapter(usize),

    #[error("Line {0} not found")]
    Line(usize),
}

/// Where in a chapter an edit failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditLocation {
    pub line: Option<usize>,
    pub variant: Option<usize>,
    pub manuscript: Option<usize>,
}

impl EditLocation {
    pub fn chapter() -> Self {
        Self::default()
    }

    pub fn line(index: usize) -> Self {
        Self {
            line: Some(index),
            ..Self::default()
        }
    }

    pub fn variant(self, index: usize) -> Self {
        Self {
            variant: Some(index),
            ..self
        }
    }

    pub fn manuscript(self, index: usize) -> Self {
        Self {
            manuscript: Some(index),
            ..self
        }
    }
}

impl fmt::Display for EditLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(line) = self.line {
            parts.push(format!("line {line}"));
        }
        if let Some(variant) = self.variant {
            parts.push(format!("variant {variant}"));
        }
        if let Some(manuscript) = self.manuscript {
            parts.push(format!("manuscript line {manuscript}"));
        }
        if parts.is_empty() {
            f.write_str("chapter")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Every way a chapter update can fail. On error nothing is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("Invalid alignment at {location}: {source}")]
    Alignment {
        location: EditLocation,
        source: AlignmentError,
    },

    #[error("Invalid lemmatization at {location}: {source}")]
    Lemmatization {
        location: EditLocation,
        source: LemmatizationError,
    },

    #[error("Invalid enclosures at {location}: {source}")]
    Enclosure {
        location: EditLocation,
        source: EnclosureError,
    },

    #[error("Invalid chapter: {0}")]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl UpdateError {
    pub fn alignment(location: EditLocation, source: AlignmentError) -> Self {
        Self::Alignment { location, source }
    }

    pub fn lemmatization(location: EditLocation, source: LemmatizationError) -> Self {
        Self::Lemmatization { location, source }
    }

    pub fn enclosure(location: EditLocation, source: EnclosureError) -> Self {
        Self::Enclosure { location, source }
    }

    /// The edit was made against an older version of the chapter.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Alignment { .. } | Self::Lemmatization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(EditLocation::chapter().to_string(), "chapter");
        assert_eq!(
            EditLocation::line(2).variant(0).manuscript(1).to_string(),
            "line 2, variant 0, manuscript line 1"
        );
    }

    #[test]
    fn test_error_message_names_location() {
        let error = UpdateError::alignment(
            EditLocation::line(3),
            AlignmentError::CountMismatch {
                expected: 2,
                actual: 1,
            },
        );
        assert_eq!(
            error.to_string(),
            "Invalid alignment at line 3: Expected 2 alignment entries, got 1"
        );
        assert!(error.is_conflict());
    }
}
