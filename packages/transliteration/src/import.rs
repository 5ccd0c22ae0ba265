use thiserror::Error;

use crate::enclosure::validate_and_annotate;
use crate::error::EnclosureError;
use crate::parser::{LineParser, ParseError};
use crate::rendering::render_tokens;
use crate::tokens::Token;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid line {line_number}: {source}")]
    Enclosure {
        line_number: usize,
        source: EnclosureError,
    },

    #[error("Line {line_number} renders as '{rendered}' instead of '{text}'")]
    RoundTrip {
        line_number: usize,
        text: String,
        rendered: String,
    },
}

/// Parse one line, check that it renders back to `text` and that its
/// enclosures are consistent, and return the annotated tokens.
pub fn import_line<P: LineParser + ?Sized>(
    parser: &P,
    line_number: usize,
    text: &str,
) -> Result<Vec<Token>, ImportError> {
    let tokens = parser.parse_line(line_number, text)?;

    let rendered = render_tokens(&tokens);
    if rendered != text {
        return Err(ImportError::RoundTrip {
            line_number,
            text: text.to_string(),
            rendered,
        });
    }

    validate_and_annotate(&tokens).map_err(|source| ImportError::Enclosure {
        line_number,
        source,
    })
}
