use serde::{Deserialize, Serialize};

use crate::error::AlignmentError;
use crate::tokens::{Token, TokenKind, Word};

/// Alignment of the manuscript token whose text was `value` to a
/// reconstruction position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentToken {
    pub value: String,
    #[serde(default)]
    pub alignment: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Token>,
}

impl AlignmentToken {
    pub fn new(value: impl Into<String>, alignment: Option<usize>) -> Self {
        Self {
            value: value.into(),
            alignment,
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: Token) -> Self {
        self.variant = Some(variant);
        self
    }

    fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.variant.is_none()
    }
}

impl Token {
    /// Attach `alignment` if it was made for this token's current text.
    pub fn with_alignment(&self, alignment: &AlignmentToken) -> Result<Token, AlignmentError> {
        let value = self.value();
        if value != alignment.value {
            return Err(AlignmentError::ValueMismatch {
                value,
                expected: alignment.value.clone(),
            });
        }

        match &self.kind {
            TokenKind::Word(word) if word.is_lemmatizable() => {
                let kind = TokenKind::Word(Word {
                    alignment: alignment.alignment,
                    variant: alignment.variant.clone().map(Box::new),
                    ..word.clone()
                });
                Ok(Token {
                    kind,
                    ..self.clone()
                })
            }
            _ if alignment.is_empty() => Ok(self.clone()),
            _ => Err(AlignmentError::NotAlignable { value }),
        }
    }

    pub fn alignment(&self) -> Option<usize> {
        self.as_word().and_then(|word| word.alignment)
    }
}

/// Align a token sequence entry by entry.
pub fn align_tokens(tokens: &[Token], alignment: &[AlignmentToken]) -> Result<Vec<Token>, AlignmentError> {
    if tokens.len() != alignment.len() {
        return Err(AlignmentError::CountMismatch {
            expected: tokens.len(),
            actual: alignment.len(),
        });
    }
    tokens
        .iter()
        .zip(alignment)
        .map(|(token, entry)| token.with_alignment(entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign_tokens::NamedSign;

    fn word(name: &str) -> Token {
        Word::new(vec![NamedSign::reading(name).into()]).unwrap().into()
    }

    #[test]
    fn test_align_word() {
        let aligned = word("ku")
            .with_alignment(&AlignmentToken::new("ku", Some(3)).with_variant(word("ka")))
            .unwrap();
        let aligned_word = aligned.as_word().unwrap();

        assert_eq!(aligned.alignment(), Some(3));
        assert_eq!(aligned_word.variant.as_deref(), Some(&word("ka")));
    }

    #[test]
    fn test_value_mismatch() {
        assert!(matches!(
            word("ku").with_alignment(&AlignmentToken::new("nu", Some(0))),
            Err(AlignmentError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn test_not_alignable() {
        let token = Token::unknown_number_of_signs();
        assert!(matches!(
            token.with_alignment(&AlignmentToken::new("...", Some(0))),
            Err(AlignmentError::NotAlignable { .. })
        ));
        assert_eq!(
            token.with_alignment(&AlignmentToken::new("...", None)),
            Ok(token.clone())
        );
    }

    #[test]
    fn test_align_tokens_count() {
        assert_eq!(
            align_tokens(&[word("ku")], &[]),
            Err(AlignmentError::CountMismatch {
                expected: 1,
                actual: 0
            })
        );
    }
}
