use serde::{Deserialize, Serialize};

use ebl_transliteration::{
    align_tokens, clean_tokens, lemmatize_tokens, merge_tokens, render_tokens, AlignmentError,
    AlignmentToken, LemmatizationError, LemmatizationToken, Token, TokenKind, Word,
};

use crate::line::LineNumber;

/// Transliterated text of a manuscript line, or a placeholder for a
/// manuscript that does not preserve the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ManuscriptLineContent {
    Text { number: LineNumber, content: Vec<Token> },
    Empty,
}

impl ManuscriptLineContent {
    pub fn text(number: LineNumber, content: Vec<Token>) -> Self {
        ManuscriptLineContent::Text { number, content }
    }

    pub fn number(&self) -> Option<&LineNumber> {
        match self {
            ManuscriptLineContent::Text { number, .. } => Some(number),
            ManuscriptLineContent::Empty => None,
        }
    }

    pub fn content(&self) -> &[Token] {
        match self {
            ManuscriptLineContent::Text { content, .. } => content,
            ManuscriptLineContent::Empty => &[],
        }
    }

    fn with_content(&self, content: Vec<Token>) -> Self {
        match self {
            ManuscriptLineContent::Text { number, .. } => ManuscriptLineContent::Text {
                number: number.clone(),
                content,
            },
            ManuscriptLineContent::Empty => ManuscriptLineContent::Empty,
        }
    }
}

/// One manuscript's realisation of a line variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptLine {
    pub manuscript_id: u32,
    #[serde(default)]
    pub labels: Vec<String>,
    pub line: ManuscriptLineContent,
    #[serde(default)]
    pub paratext: Vec<String>,
    /// Reconstruction positions this manuscript leaves out
    #[serde(default)]
    pub omitted_words: Vec<usize>,
}

impl ManuscriptLine {
    pub fn new(manuscript_id: u32, line: ManuscriptLineContent) -> Self {
        Self {
            manuscript_id,
            labels: Vec::new(),
            line,
            paratext: Vec::new(),
            omitted_words: Vec::new(),
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Identity used when merging: manuscript id and label path.
    pub fn key(&self) -> (u32, Vec<String>) {
        (self.manuscript_id, self.labels.clone())
    }

    pub fn content(&self) -> &[Token] {
        self.line.content()
    }

    /// ATF of the line: number and text, or nothing for an empty line.
    pub fn atf(&self) -> String {
        match &self.line {
            ManuscriptLineContent::Text { number, content } => {
                format!("{number}. {}", render_tokens(content))
            }
            ManuscriptLineContent::Empty => String::new(),
        }
    }

    pub fn clean_text(&self) -> String {
        clean_tokens(self.content())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.line, ManuscriptLineContent::Empty)
    }

    pub fn update_alignment(
        &self,
        alignment: &[AlignmentToken],
        omitted_words: Vec<usize>,
    ) -> Result<Self, AlignmentError> {
        let content = align_tokens(self.content(), alignment)?;
        Ok(Self {
            line: self.line.with_content(content),
            omitted_words,
            ..self.clone()
        })
    }

    pub fn update_lemmatization(
        &self,
        lemmatization: &[LemmatizationToken],
    ) -> Result<Self, LemmatizationError> {
        let content = lemmatize_tokens(self.content(), lemmatization)?;
        Ok(Self {
            line: self.line.with_content(content),
            ..self.clone()
        })
    }

    /// Move alignments and omitted words to new reconstruction positions.
    /// Positions without a target are dropped.
    pub fn update_alignments(&self, map: &[Option<usize>]) -> Self {
        let remap = |index: usize| map.get(index).copied().flatten();
        let content = self
            .content()
            .iter()
            .map(|token| match &token.kind {
                TokenKind::Word(word) if word.alignment.is_some() => {
                    let alignment = word.alignment.and_then(remap);
                    let variant = alignment.and(word.variant.clone());
                    Token {
                        kind: TokenKind::Word(Word {
                            alignment,
                            variant,
                            ..word.clone()
                        }),
                        ..token.clone()
                    }
                }
                _ => token.clone(),
            })
            .collect();
        Self {
            line: self.line.with_content(content),
            omitted_words: self.omitted_words.iter().copied().filter_map(remap).collect(),
            ..self.clone()
        }
    }

    /// Reconcile `new` with this line after the reconstruction moved
    /// according to `map`. Alignments and omitted words carried over from
    /// this line are remapped; those submitted with `new` are kept as they
    /// are. Omitted words carry over only while the cleaned text is
    /// unchanged.
    pub fn merge(&self, new: ManuscriptLine, map: &[Option<usize>]) -> ManuscriptLine {
        let previous = self.update_alignments(map);
        let content = merge_tokens(previous.content(), new.content());
        let omitted_words = if self.clean_text() == new.clean_text() {
            previous.omitted_words
        } else {
            new.omitted_words.clone()
        };
        ManuscriptLine {
            line: new.line.with_content(content),
            omitted_words,
            ..new
        }
    }
}
