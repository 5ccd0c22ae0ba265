//! # Token model
//!
//! A transliterated line is an ordered sequence of [`Token`]s. Composite
//! tokens (words, named signs, glosses, variants, lacunae) own their parts,
//! so a line is a finite tree.
//!
//! Every token renders back to exactly the text it was parsed from
//! ([`Token::value`]) and to a cleaned form without flags, modifiers and
//! brackets ([`Token::clean_value`]) used for search and change detection.
//! Tokens are immutable values: the `with_*` methods return new tokens.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::mem;

use crate::enclosure_type::{Bracket, EnclosureSet};
use crate::error::{TokenError, TokenResult};
use crate::flags::{render_flags, validate_flags, Flag, NORMALIZED_WORD_FLAGS, UNKNOWN_SIGN_FLAGS};
use crate::language::Language;
use crate::sign_tokens::{CompoundGrapheme, Divider, Grapheme, NamedSign};
use crate::visitor::{walk_lacuna, Visitor};

/// Position of a token relative to an erasure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErasureState {
    #[default]
    None,
    /// Between `°` and `\`
    Erased,
    /// Between `\` and the closing `°`
    OverErased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErasureSide {
    Open,
    Center,
    Close,
}

impl ErasureSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErasureSide::Open | ErasureSide::Close => "°",
            ErasureSide::Center => "\\",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinerKind {
    Hyphen,
    Plus,
    Dot,
    Colon,
}

impl JoinerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinerKind::Hyphen => "-",
            JoinerKind::Plus => "+",
            JoinerKind::Dot => ".",
            JoinerKind::Colon => ":",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakKind {
    Caesura,
    MetricalFootSeparator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlossKind {
    Determinative,
    PhoneticGloss,
    LinguisticGloss,
}

impl GlossKind {
    fn brackets(&self) -> (&'static str, &'static str) {
        match self {
            GlossKind::Determinative => ("{", "}"),
            GlossKind::PhoneticGloss => ("{+", "}"),
            GlossKind::LinguisticGloss => ("{{", "}}"),
        }
    }
}

/// Opening or closing bracket of an enclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnclosureBoundary {
    pub bracket: Bracket,
    pub side: Side,
}

impl EnclosureBoundary {
    pub fn value(&self) -> &'static str {
        match self.side {
            Side::Open => self.bracket.open(),
            Side::Close => self.bracket.close(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub parts: Vec<Token>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub normalized: bool,
    #[serde(default)]
    pub unique_lemma: Vec<String>,
    /// Index of the reconstruction word this manuscript word realizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<usize>,
    /// Variant form recorded together with the alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Box<Token>>,
    /// Only normalized words carry flags of their own.
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl Word {
    pub fn new(parts: Vec<Token>) -> TokenResult<Self> {
        if parts.is_empty() {
            return Err(TokenError::empty_parts("Word"));
        }
        Ok(Self {
            parts,
            language: Language::default(),
            normalized: false,
            unique_lemma: Vec::new(),
            alignment: None,
            variant: None,
            flags: Vec::new(),
        })
    }

    /// Normalized Akkadian word as used in reconstructions
    pub fn normalized(parts: Vec<Token>) -> TokenResult<Self> {
        let mut word = Self::new(parts)?;
        word.normalized = true;
        Ok(word)
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_flags(mut self, flags: Vec<Flag>) -> TokenResult<Self> {
        let allowed: &[Flag] = if self.normalized { NORMALIZED_WORD_FLAGS } else { &[] };
        validate_flags("Word", &flags, allowed)?;
        self.flags = flags;
        Ok(self)
    }

    pub fn value(&self) -> String {
        let mut value: String = self.parts.iter().map(Token::value).collect();
        value.push_str(&render_flags(&self.flags));
        value
    }

    pub fn clean_value(&self) -> String {
        self.parts.iter().map(Token::clean_value).collect()
    }

    pub fn is_lemmatizable(&self) -> bool {
        if !self.language.is_lemmatizable() {
            return false;
        }
        let mut finder = UnreadableFinder::default();
        for part in &self.parts {
            part.accept(&mut finder);
        }
        !finder.found
    }
}

impl From<Word> for Token {
    fn from(word: Word) -> Self {
        Token::new(TokenKind::Word(word))
    }
}

/// Finds parts that cannot be read, which makes a word unlemmatizable.
#[derive(Default)]
struct UnreadableFinder {
    found: bool,
}

impl Visitor for UnreadableFinder {
    fn visit_leaf(&mut self, token: &Token) {
        if matches!(
            token.kind,
            TokenKind::UnknownNumberOfSigns
                | TokenKind::UnidentifiedSign { .. }
                | TokenKind::UnclearSign { .. }
        ) {
            self.found = true;
        }
    }

    fn visit_lacuna(&mut self, lacuna: &Lacuna) {
        self.found = true;
        walk_lacuna(self, lacuna);
    }
}

/// `...` in a reconstruction, with the brackets attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lacuna {
    #[serde(default)]
    pub before: Vec<Token>,
    #[serde(default)]
    pub after: Vec<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub kind: BreakKind,
    pub uncertain: bool,
}

impl Break {
    pub fn clean_value(&self) -> &'static str {
        match self.kind {
            BreakKind::Caesura => "||",
            BreakKind::MetricalFootSeparator => "|",
        }
    }

    pub fn value(&self) -> String {
        if self.uncertain {
            format!("({})", self.clean_value())
        } else {
            self.clean_value().to_string()
        }
    }
}

/// Alternative readings at one position, written `a/b`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub alternatives: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gloss {
    pub kind: GlossKind,
    pub parts: Vec<Token>,
}

/// Closed set of token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    ValueToken { value: String },
    LanguageShift { value: String },
    UnknownNumberOfSigns,
    Word(Word),
    NamedSign(NamedSign),
    Divider(Divider),
    Grapheme(Grapheme),
    CompoundGrapheme(CompoundGrapheme),
    Joiner { joiner: JoinerKind },
    Enclosure(EnclosureBoundary),
    Erasure { side: ErasureSide },
    UnidentifiedSign {
        #[serde(default)]
        flags: Vec<Flag>,
    },
    UnclearSign {
        #[serde(default)]
        flags: Vec<Flag>,
    },
    Lacuna(Lacuna),
    Break(Break),
    Variant(Variant),
    Gloss(Gloss),
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::ValueToken { .. } => "ValueToken",
            TokenKind::LanguageShift { .. } => "LanguageShift",
            TokenKind::UnknownNumberOfSigns => "UnknownNumberOfSigns",
            TokenKind::Word(_) => "Word",
            TokenKind::NamedSign(sign) => sign.sign_kind.as_str(),
            TokenKind::Divider(_) => "Divider",
            TokenKind::Grapheme(_) => "Grapheme",
            TokenKind::CompoundGrapheme(_) => "CompoundGrapheme",
            TokenKind::Joiner { .. } => "Joiner",
            TokenKind::Enclosure(_) => "Enclosure",
            TokenKind::Erasure { .. } => "Erasure",
            TokenKind::UnidentifiedSign { .. } => "UnidentifiedSign",
            TokenKind::UnclearSign { .. } => "UnclearSign",
            TokenKind::Lacuna(_) => "Lacuna",
            TokenKind::Break(_) => "Break",
            TokenKind::Variant(_) => "Variant",
            TokenKind::Gloss(_) => "Gloss",
        }
    }
}

/// A token together with the enclosure annotations stamped on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub enclosure_type: EnclosureSet,
    #[serde(default)]
    pub erasure: ErasureState,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            enclosure_type: EnclosureSet::new(),
            erasure: ErasureState::None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(TokenKind::ValueToken {
            value: value.into(),
        })
    }

    pub fn language_shift(value: impl Into<String>) -> Self {
        Self::new(TokenKind::LanguageShift {
            value: value.into(),
        })
    }

    pub fn unknown_number_of_signs() -> Self {
        Self::new(TokenKind::UnknownNumberOfSigns)
    }

    pub fn joiner(joiner: JoinerKind) -> Self {
        Self::new(TokenKind::Joiner { joiner })
    }

    pub fn hyphen() -> Self {
        Self::joiner(JoinerKind::Hyphen)
    }

    pub fn open(bracket: Bracket) -> Self {
        Self::new(TokenKind::Enclosure(EnclosureBoundary {
            bracket,
            side: Side::Open,
        }))
    }

    pub fn close(bracket: Bracket) -> Self {
        Self::new(TokenKind::Enclosure(EnclosureBoundary {
            bracket,
            side: Side::Close,
        }))
    }

    pub fn erasure(side: ErasureSide) -> Self {
        Self::new(TokenKind::Erasure { side })
    }

    pub fn unidentified_sign(flags: Vec<Flag>) -> TokenResult<Self> {
        validate_flags("UnidentifiedSign", &flags, UNKNOWN_SIGN_FLAGS)?;
        Ok(Self::new(TokenKind::UnidentifiedSign { flags }))
    }

    pub fn unclear_sign(flags: Vec<Flag>) -> TokenResult<Self> {
        validate_flags("UnclearSign", &flags, UNKNOWN_SIGN_FLAGS)?;
        Ok(Self::new(TokenKind::UnclearSign { flags }))
    }

    pub fn lacuna(before: Vec<Token>, after: Vec<Token>) -> Self {
        Self::new(TokenKind::Lacuna(Lacuna { before, after }))
    }

    pub fn caesura(uncertain: bool) -> Self {
        Self::new(TokenKind::Break(Break {
            kind: BreakKind::Caesura,
            uncertain,
        }))
    }

    pub fn metrical_foot_separator(uncertain: bool) -> Self {
        Self::new(TokenKind::Break(Break {
            kind: BreakKind::MetricalFootSeparator,
            uncertain,
        }))
    }

    pub fn variant(alternatives: Vec<Token>) -> TokenResult<Self> {
        if alternatives.len() < 2 {
            return Err(TokenError::empty_parts("Variant"));
        }
        Ok(Self::new(TokenKind::Variant(Variant { alternatives })))
    }

    pub fn gloss(kind: GlossKind, parts: Vec<Token>) -> TokenResult<Self> {
        if parts.is_empty() {
            return Err(TokenError::empty_parts("Gloss"));
        }
        Ok(Self::new(TokenKind::Gloss(Gloss { kind, parts })))
    }

    /// Exact text of the token, flags and brackets included
    pub fn value(&self) -> String {
        match &self.kind {
            TokenKind::ValueToken { value } | TokenKind::LanguageShift { value } => value.clone(),
            TokenKind::UnknownNumberOfSigns => "...".to_string(),
            TokenKind::Word(word) => word.value(),
            TokenKind::NamedSign(sign) => sign.value(),
            TokenKind::Divider(divider) => divider.value(),
            TokenKind::Grapheme(grapheme) => grapheme.value(),
            TokenKind::CompoundGrapheme(compound) => compound.value(),
            TokenKind::Joiner { joiner } => joiner.as_str().to_string(),
            TokenKind::Enclosure(boundary) => boundary.value().to_string(),
            TokenKind::Erasure { side } => side.as_str().to_string(),
            TokenKind::UnidentifiedSign { flags } => format!("X{}", render_flags(flags)),
            TokenKind::UnclearSign { flags } => format!("x{}", render_flags(flags)),
            TokenKind::Lacuna(lacuna) => {
                let before: String = lacuna.before.iter().map(Token::value).collect();
                let after: String = lacuna.after.iter().map(Token::value).collect();
                format!("{before}...{after}")
            }
            TokenKind::Break(separator) => separator.value(),
            TokenKind::Variant(variant) => variant
                .alternatives
                .iter()
                .map(Token::value)
                .collect::<Vec<_>>()
                .join("/"),
            TokenKind::Gloss(gloss) => {
                let (open, close) = gloss.kind.brackets();
                let parts: String = gloss.parts.iter().map(Token::value).collect();
                format!("{open}{parts}{close}")
            }
        }
    }

    /// Text without flags, modifiers, enclosures or erasure markers
    pub fn clean_value(&self) -> String {
        match &self.kind {
            TokenKind::Word(word) => word.clean_value(),
            TokenKind::NamedSign(sign) => sign.clean_value(),
            TokenKind::Divider(divider) => divider.divider.clone(),
            TokenKind::Grapheme(grapheme) => grapheme.name.clone(),
            TokenKind::CompoundGrapheme(compound) => compound.clean_value(),
            TokenKind::Enclosure(_) | TokenKind::Erasure { .. } => String::new(),
            TokenKind::UnidentifiedSign { .. } => "X".to_string(),
            TokenKind::UnclearSign { .. } => "x".to_string(),
            TokenKind::Lacuna(_) => "...".to_string(),
            TokenKind::Break(separator) => separator.clean_value().to_string(),
            TokenKind::Variant(variant) => variant
                .alternatives
                .iter()
                .map(Token::clean_value)
                .collect::<Vec<_>>()
                .join("/"),
            TokenKind::Gloss(gloss) => {
                let (open, close) = gloss.kind.brackets();
                let parts: String = gloss.parts.iter().map(Token::clean_value).collect();
                format!("{open}{parts}{close}")
            }
            _ => self.value(),
        }
    }

    pub fn as_word(&self) -> Option<&Word> {
        match &self.kind {
            TokenKind::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn is_lemmatizable(&self) -> bool {
        self.as_word().is_some_and(Word::is_lemmatizable)
    }

    pub fn is_alignable(&self) -> bool {
        self.is_lemmatizable()
    }

    /// Same kind of token, ignoring contents
    pub fn same_kind(&self, other: &Token) -> bool {
        mem::discriminant(&self.kind) == mem::discriminant(&other.kind)
    }

    pub fn with_enclosure_type(&self, enclosure_type: EnclosureSet) -> Token {
        Token {
            enclosure_type,
            ..self.clone()
        }
    }

    pub fn with_erasure(&self, erasure: ErasureState) -> Token {
        Token {
            erasure,
            ..self.clone()
        }
    }

    /// Reconcile this (previously annotated) token with `new`, found at the
    /// same position in a fresh parse. Lemma and alignment carry over only
    /// when both are words with the same cleaned text.
    pub fn merge(&self, new: &Token) -> Token {
        match (&self.kind, &new.kind) {
            (TokenKind::Word(old), TokenKind::Word(fresh))
                if old.clean_value() == fresh.clean_value() =>
            {
                let merged = Word {
                    unique_lemma: old.unique_lemma.clone(),
                    alignment: old.alignment,
                    variant: old.variant.clone(),
                    ..fresh.clone()
                };
                Token {
                    kind: TokenKind::Word(merged),
                    ..new.clone()
                }
            }
            _ => new.clone(),
        }
    }
}
