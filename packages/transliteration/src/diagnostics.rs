use crate::error::EnclosureError;
use crate::rendering::{render_tokens, token_spans};
use crate::tokens::Token;

/// ariadne sources are indexed by char, token spans by byte.
fn char_offset(text: &str, byte: usize) -> usize {
    text.get(..byte).map_or(byte, |prefix| prefix.chars().count())
}

/// Pretty-print an enclosure error against the rendered line using ariadne
pub fn format_enclosure_error(tokens: &[Token], filename: &str, error: &EnclosureError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let source = render_tokens(tokens);
    let spans = token_spans(tokens);
    let span = match error.index().and_then(|index| spans.get(index)) {
        Some(bytes) => char_offset(&source, bytes.start)..char_offset(&source, bytes.end),
        None => {
            let length = source.chars().count();
            length.saturating_sub(1)..length
        }
    };

    let label = match error {
        EnclosureError::Unclosed { .. } | EnclosureError::UnclosedErasure => {
            "line ends here".to_string()
        }
        _ => "in this token".to_string(),
    };

    let mut output = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_color(Color::Red)
                .with_message(label),
        )
        .finish()
        .write((filename, Source::from(source.as_str())), &mut output);

    match written {
        Ok(()) => String::from_utf8(output).unwrap_or_else(|_| error.to_string()),
        Err(_) => error.to_string(),
    }
}
