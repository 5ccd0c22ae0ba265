use thiserror::Error;

use crate::tokens::Token;

pub type ParseResult<T> = Result<T, ParseError>;

/// Located failure reported by a transliteration parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid line {line_number}: {description}")]
pub struct ParseError {
    pub line_number: usize,
    pub description: String,
}

impl ParseError {
    pub fn new(line_number: usize, description: impl Into<String>) -> Self {
        Self {
            line_number,
            description: description.into(),
        }
    }
}

/// Turns one line of transliteration text into top-level tokens.
///
/// The grammar lives outside this crate; implementations must produce
/// tokens whose [`render_tokens`](crate::rendering::render_tokens) output is
/// the input text.
pub trait LineParser {
    fn parse_line(&self, line_number: usize, text: &str) -> ParseResult<Vec<Token>>;
}

impl<F> LineParser for F
where
    F: Fn(usize, &str) -> ParseResult<Vec<Token>>,
{
    fn parse_line(&self, line_number: usize, text: &str) -> ParseResult<Vec<Token>> {
        self(line_number, text)
    }
}
