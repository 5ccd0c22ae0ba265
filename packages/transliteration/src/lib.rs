//! # eBL Transliteration
//!
//! Token model for cuneiform transliterations and the enclosure checker.
//!
//! ```text
//! line text ──LineParser──▶ tokens ──validate──▶ annotate ──▶ edition aggregate
//!    ▲                         │
//!    └──────render_tokens──────┘
//! ```
//!
//! Parsing is delegated to a [`LineParser`]; this crate guarantees that the
//! tokens render back to the parsed text and that their enclosures nest
//! consistently.

pub mod alignment;
#[cfg(feature = "pretty-errors")]
pub mod diagnostics;
pub mod enclosure;
pub mod enclosure_type;
pub mod error;
pub mod flags;
pub mod import;
pub mod language;
pub mod lemmatization;
pub mod merge;
pub mod parser;
pub mod rendering;
pub mod sign_tokens;
pub mod tokens;
pub mod visitor;

pub use alignment::{align_tokens, AlignmentToken};
pub use enclosure::{annotate, validate, validate_and_annotate, EnclosureState};
pub use enclosure_type::{Bracket, EnclosureSet, EnclosureType};
pub use error::{AlignmentError, EnclosureError, LemmatizationError, TokenError, TokenResult};
pub use flags::Flag;
pub use import::{import_line, ImportError};
pub use language::Language;
pub use lemmatization::{lemmatize_tokens, LemmatizationToken};
pub use merge::{alignment_map, merge_tokens};
pub use parser::{LineParser, ParseError, ParseResult};
pub use rendering::{clean_tokens, render_tokens};
pub use sign_tokens::{CompoundGrapheme, Divider, Grapheme, NamedSign, NamedSignKind, SubIndex};
pub use tokens::{
    Break, BreakKind, EnclosureBoundary, ErasureSide, ErasureState, Gloss, GlossKind, JoinerKind,
    Lacuna, Side, Token, TokenKind, Variant, Word,
};
pub use visitor::{unique_lemmas, Visitor};
