use serde::{Deserialize, Serialize};

use crate::error::LemmatizationError;
use crate::tokens::{Token, TokenKind, Word};

/// Lemma ids for the token whose text was `value` when the lemmatization
/// was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmatizationToken {
    pub value: String,
    #[serde(default)]
    pub unique_lemma: Option<Vec<String>>,
}

impl LemmatizationToken {
    pub fn new(value: impl Into<String>, unique_lemma: Option<Vec<String>>) -> Self {
        Self {
            value: value.into(),
            unique_lemma,
        }
    }

    /// Lemmatization entry mirroring the current state of `token`
    pub fn from_token(token: &Token) -> Self {
        let unique_lemma = token
            .as_word()
            .filter(|word| word.is_lemmatizable())
            .map(|word| word.unique_lemma.clone());
        Self::new(token.value(), unique_lemma)
    }
}

impl Token {
    /// Attach `lemma` if it was made for this token's current text.
    ///
    /// A missing lemma clears a word's lemmatization; non-lemmatizable
    /// tokens only accept entries without lemma.
    pub fn with_unique_lemma(&self, lemma: &LemmatizationToken) -> Result<Token, LemmatizationError> {
        let value = self.value();
        if value != lemma.value {
            return Err(LemmatizationError::ValueMismatch {
                value,
                expected: lemma.value.clone(),
            });
        }

        match (&self.kind, &lemma.unique_lemma) {
            (TokenKind::Word(word), unique_lemma) if word.is_lemmatizable() => {
                let kind = TokenKind::Word(Word {
                    unique_lemma: unique_lemma.clone().unwrap_or_default(),
                    ..word.clone()
                });
                Ok(Token {
                    kind,
                    ..self.clone()
                })
            }
            (_, None) => Ok(self.clone()),
            (_, Some(_)) => Err(LemmatizationError::NotLemmatizable { value }),
        }
    }
}

/// Lemmatize a token sequence entry by entry.
pub fn lemmatize_tokens(
    tokens: &[Token],
    lemmatization: &[LemmatizationToken],
) -> Result<Vec<Token>, LemmatizationError> {
    if tokens.len() != lemmatization.len() {
        return Err(LemmatizationError::CountMismatch {
            expected: tokens.len(),
            actual: lemmatization.len(),
        });
    }
    tokens
        .iter()
        .zip(lemmatization)
        .map(|(token, lemma)| token.with_unique_lemma(lemma))
        .collect()
}
