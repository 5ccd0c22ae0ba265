use thiserror::Error;

use crate::enclosure_type::EnclosureType;
use crate::flags::Flag;

pub type TokenResult<T> = Result<T, TokenError>;

/// Invalid token construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Flag {flag} is not allowed on {kind}")]
    InvalidFlag { kind: String, flag: Flag },

    #[error("Flag {flag} is repeated on {kind}")]
    DuplicateFlag { kind: String, flag: Flag },

    #[error("Invalid modifier '{modifier}'")]
    InvalidModifier { modifier: String },

    #[error("{kind} must have at least one part")]
    EmptyParts { kind: String },
}

impl TokenError {
    pub fn invalid_flag(kind: impl Into<String>, flag: Flag) -> Self {
        Self::InvalidFlag {
            kind: kind.into(),
            flag,
        }
    }

    pub fn duplicate_flag(kind: impl Into<String>, flag: Flag) -> Self {
        Self::DuplicateFlag {
            kind: kind.into(),
            flag,
        }
    }

    pub fn invalid_modifier(modifier: impl Into<String>) -> Self {
        Self::InvalidModifier {
            modifier: modifier.into(),
        }
    }

    pub fn empty_parts(kind: impl Into<String>) -> Self {
        Self::EmptyParts { kind: kind.into() }
    }
}

/// Enclosure nesting violation. `index` is the top-level token position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnclosureError {
    #[error("Cannot open {opening} at token {index}: {conflicting} is open")]
    Forbidden {
        index: usize,
        opening: EnclosureType,
        conflicting: EnclosureType,
    },

    #[error("Cannot open {opening} at token {index}: {required} is not open")]
    MissingRequirement {
        index: usize,
        opening: EnclosureType,
        required: EnclosureType,
    },

    #[error("Cannot close {closing} at token {index}: it is not open")]
    UnmatchedClose { index: usize, closing: EnclosureType },

    #[error("Cannot close {closing} at token {index}: {dependent} is still open")]
    StillRequired {
        index: usize,
        closing: EnclosureType,
        dependent: EnclosureType,
    },

    #[error("Invalid erasure at token {index}")]
    InvalidErasure { index: usize },

    #[error("Variant alternatives at token {index} leave different enclosures open")]
    VariantDivergence { index: usize },

    #[error("Unclosed enclosures at end of line: {}", format_types(open))]
    Unclosed { open: Vec<EnclosureType> },

    #[error("Unclosed erasure at end of line")]
    UnclosedErasure,
}

impl EnclosureError {
    /// Top-level token position the error refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Forbidden { index, .. }
            | Self::MissingRequirement { index, .. }
            | Self::UnmatchedClose { index, .. }
            | Self::StillRequired { index, .. }
            | Self::InvalidErasure { index }
            | Self::VariantDivergence { index } => Some(*index),
            Self::Unclosed { .. } | Self::UnclosedErasure => None,
        }
    }
}

fn format_types(types: &[EnclosureType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LemmatizationError {
    #[error("Cannot lemmatize '{value}' with a lemmatization for '{expected}'")]
    ValueMismatch { value: String, expected: String },

    #[error("'{value}' is not lemmatizable")]
    NotLemmatizable { value: String },

    #[error("Expected {expected} lemmatization entries, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Cannot align '{value}' with an alignment for '{expected}'")]
    ValueMismatch { value: String, expected: String },

    #[error("'{value}' is not alignable")]
    NotAlignable { value: String },

    #[error("Expected {expected} alignment entries, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Reconstruction position {index} does not exist (length {length})")]
    IndexOutOfRange { index: usize, length: usize },
}
