use crate::tokens::{ErasureSide, Side, Token, TokenKind};

/// No space is written after this token.
fn attaches_right(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Enclosure(boundary) => boundary.side == Side::Open,
        TokenKind::Erasure { side } => matches!(side, ErasureSide::Open | ErasureSide::Center),
        TokenKind::Joiner { .. } => true,
        _ => false,
    }
}

/// No space is written before this token.
fn attaches_left(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Enclosure(boundary) => boundary.side == Side::Close,
        TokenKind::Erasure { side } => matches!(side, ErasureSide::Center | ErasureSide::Close),
        TokenKind::Joiner { .. } => true,
        _ => false,
    }
}

/// Byte range of every top-level token in [`render_tokens`] output.
pub fn token_spans(tokens: &[Token]) -> Vec<std::ops::Range<usize>> {
    let mut spans = Vec::with_capacity(tokens.len());
    let mut offset = 0;
    let mut previous: Option<&Token> = None;

    for token in tokens {
        if let Some(previous) = previous {
            if !attaches_right(previous) && !attaches_left(token) {
                offset += 1;
            }
        }
        let length = token.value().len();
        spans.push(offset..offset + length);
        offset += length;
        previous = Some(token);
    }

    spans
}

/// Join top-level tokens into line text.
///
/// Tokens are separated by one space, except after an opening bracket or
/// erasure marker, before a closing one, and around joiners.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut text = String::new();
    let mut previous: Option<&Token> = None;

    for token in tokens {
        if let Some(previous) = previous {
            if !attaches_right(previous) && !attaches_left(token) {
                text.push(' ');
            }
        }
        text.push_str(&token.value());
        previous = Some(token);
    }

    text
}

/// Cleaned line text used for search and change detection
pub fn clean_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::clean_value)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enclosure_type::Bracket;
    use crate::flags::Flag;
    use crate::sign_tokens::NamedSign;
    use crate::tokens::Word;

    fn word(name: &str) -> Token {
        Word::new(vec![NamedSign::reading(name).into()]).unwrap().into()
    }

    #[test]
    fn test_brackets_attach_to_neighbours() {
        let tokens = vec![
            word("ku"),
            Token::open(Bracket::BrokenAway),
            Token::unknown_number_of_signs(),
            Token::close(Bracket::BrokenAway),
            word("nu"),
        ];

        assert_eq!(render_tokens(&tokens), "ku [...] nu");
        assert_eq!(clean_tokens(&tokens), "ku ... nu");
    }

    #[test]
    fn test_reconstruction_line() {
        let damaged = Word::normalized(vec![Token::literal("buāru")])
            .unwrap()
            .with_flags(vec![Flag::Damage])
            .unwrap();
        let tokens = vec![
            Word::normalized(vec![Token::literal("buāru")]).unwrap().into(),
            Token::metrical_foot_separator(true),
            Token::lacuna(
                vec![Token::open(Bracket::BrokenAway)],
                vec![Token::close(Bracket::BrokenAway)],
            ),
            Token::caesura(false),
            damaged.into(),
        ];

        assert_eq!(render_tokens(&tokens), "buāru (|) [...] || buāru#");
    }

    #[test]
    fn test_token_spans_match_rendering() {
        let tokens = vec![
            word("ku"),
            Token::open(Bracket::BrokenAway),
            Token::unknown_number_of_signs(),
            Token::close(Bracket::BrokenAway),
        ];
        let text = render_tokens(&tokens);
        let spans = token_spans(&tokens);

        for (token, span) in tokens.iter().zip(spans) {
            assert_eq!(&text[span], token.value());
        }
    }
}
