//! # Enclosure consistency
//!
//! Enclosures are tracked as a *set* of open [`EnclosureType`]s rather than
//! a stack: spans may overlap as long as every opening respects the
//! forbidden/required tables and every span is closed by the end of the line.
//!
//! Two passes share the same bookkeeping:
//! - [`validate`] rejects sequences that break the nesting rules.
//! - [`annotate`] stamps every token, sub-parts included, with the
//!   enclosures and erasure state in effect at its position.
//!
//! Both are folds over the tokens with the open set threaded through as an
//! accumulator; nothing is mutated in place.

use crate::enclosure_type::{EnclosureSet, EnclosureType};
use crate::error::EnclosureError;
use crate::tokens::{
    EnclosureBoundary, ErasureSide, ErasureState, Gloss, Lacuna, Side, Token, TokenKind, Word,
};

/// Enclosure types currently open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnclosureState {
    open: EnclosureSet,
}

impl EnclosureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_types(&self) -> &EnclosureSet {
        &self.open
    }

    pub fn contains(&self, enclosure: EnclosureType) -> bool {
        self.open.contains(&enclosure)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open `enclosure`, failing if a forbidden type is open or a required
    /// type is not.
    pub fn open(&self, enclosure: EnclosureType, index: usize) -> Result<Self, EnclosureError> {
        if let Some(conflicting) = enclosure.forbidden().iter().find(|t| self.open.contains(t)) {
            return Err(EnclosureError::Forbidden {
                index,
                opening: enclosure,
                conflicting: *conflicting,
            });
        }
        if let Some(required) = enclosure.required().iter().find(|t| !self.open.contains(t)) {
            return Err(EnclosureError::MissingRequirement {
                index,
                opening: enclosure,
                required: *required,
            });
        }
        Ok(self.inserted(enclosure))
    }

    /// Close `enclosure`, failing if it is not open or another open type
    /// still requires it.
    pub fn close(&self, enclosure: EnclosureType, index: usize) -> Result<Self, EnclosureError> {
        if !self.open.contains(&enclosure) {
            return Err(EnclosureError::UnmatchedClose {
                index,
                closing: enclosure,
            });
        }
        if let Some(dependent) = self
            .open
            .iter()
            .find(|open| open.required().contains(&enclosure))
        {
            return Err(EnclosureError::StillRequired {
                index,
                closing: enclosure,
                dependent: *dependent,
            });
        }
        Ok(self.removed(enclosure))
    }

    pub fn apply(&self, boundary: &EnclosureBoundary, index: usize) -> Result<Self, EnclosureError> {
        match boundary.side {
            Side::Open => self.open(boundary.bracket.opening_type(&self.open), index),
            Side::Close => self.close(boundary.bracket.closing_type(&self.open), index),
        }
    }

    /// Same transition as [`apply`](Self::apply) without the checks.
    fn apply_unchecked(&self, boundary: &EnclosureBoundary) -> Self {
        match boundary.side {
            Side::Open => self.inserted(boundary.bracket.opening_type(&self.open)),
            Side::Close => self.removed(boundary.bracket.closing_type(&self.open)),
        }
    }

    fn inserted(&self, enclosure: EnclosureType) -> Self {
        let mut open = self.open.clone();
        open.insert(enclosure);
        Self { open }
    }

    fn removed(&self, enclosure: EnclosureType) -> Self {
        let mut open = self.open.clone();
        open.remove(&enclosure);
        Self { open }
    }
}

/// Accumulator threaded through a line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineState {
    enclosures: EnclosureState,
    erasure: ErasureState,
}

fn next_erasure(
    current: ErasureState,
    side: ErasureSide,
    index: usize,
) -> Result<ErasureState, EnclosureError> {
    match (current, side) {
        (ErasureState::None, ErasureSide::Open) => Ok(ErasureState::Erased),
        (ErasureState::Erased, ErasureSide::Center) => Ok(ErasureState::OverErased),
        (ErasureState::OverErased, ErasureSide::Close) => Ok(ErasureState::None),
        _ => Err(EnclosureError::InvalidErasure { index }),
    }
}

fn next_erasure_unchecked(side: ErasureSide) -> ErasureState {
    match side {
        ErasureSide::Open => ErasureState::Erased,
        ErasureSide::Center => ErasureState::OverErased,
        ErasureSide::Close => ErasureState::None,
    }
}

/// Check that `tokens` form a line with consistent enclosures.
pub fn validate(tokens: &[Token]) -> Result<(), EnclosureError> {
    let end = tokens
        .iter()
        .enumerate()
        .try_fold(LineState::default(), |state, (index, token)| {
            check_token(state, token, index)
        })?;

    if !end.enclosures.is_empty() {
        return Err(EnclosureError::Unclosed {
            open: end.enclosures.open.into_iter().collect(),
        });
    }
    if end.erasure != ErasureState::None {
        return Err(EnclosureError::UnclosedErasure);
    }
    Ok(())
}

fn check_all(state: LineState, tokens: &[Token], index: usize) -> Result<LineState, EnclosureError> {
    tokens
        .iter()
        .try_fold(state, |state, token| check_token(state, token, index))
}

fn check_token(state: LineState, token: &Token, index: usize) -> Result<LineState, EnclosureError> {
    match &token.kind {
        TokenKind::Enclosure(boundary) => Ok(LineState {
            enclosures: state.enclosures.apply(boundary, index)?,
            ..state
        }),
        TokenKind::Erasure { side } => Ok(LineState {
            erasure: next_erasure(state.erasure, *side, index)?,
            ..state
        }),
        TokenKind::Word(word) => check_all(state, &word.parts, index),
        TokenKind::NamedSign(sign) => {
            let state = check_all(state, &sign.name_parts, index)?;
            match &sign.sign {
                Some(sign) => check_token(state, sign, index),
                None => Ok(state),
            }
        }
        TokenKind::Gloss(gloss) => check_all(state, &gloss.parts, index),
        TokenKind::Lacuna(lacuna) => {
            let state = check_all(state, &lacuna.before, index)?;
            check_all(state, &lacuna.after, index)
        }
        TokenKind::Variant(variant) => {
            let mut outcome: Option<LineState> = None;
            for alternative in &variant.alternatives {
                let post = check_token(state.clone(), alternative, index)?;
                match &outcome {
                    Some(first) if *first != post => {
                        return Err(EnclosureError::VariantDivergence { index });
                    }
                    Some(_) => {}
                    None => outcome = Some(post),
                }
            }
            Ok(outcome.unwrap_or(state))
        }
        _ => Ok(state),
    }
}

/// Stamp every token with the enclosures open at its position.
///
/// Opening brackets carry the set including their own enclosure, closing
/// brackets the set before they close. Meant for sequences that passed
/// [`validate`]; running it again on its own output yields the same tokens.
pub fn annotate(tokens: &[Token]) -> Vec<Token> {
    annotate_all(tokens, LineState::default()).0
}

/// [`validate`] followed by [`annotate`]
pub fn validate_and_annotate(tokens: &[Token]) -> Result<Vec<Token>, EnclosureError> {
    validate(tokens)?;
    Ok(annotate(tokens))
}

fn annotate_all(tokens: &[Token], state: LineState) -> (Vec<Token>, LineState) {
    tokens.iter().fold(
        (Vec::with_capacity(tokens.len()), state),
        |(mut annotated, state), token| {
            let (token, next) = annotate_token(token, state);
            annotated.push(token);
            (annotated, next)
        },
    )
}

fn stamped(kind: TokenKind, enclosures: &EnclosureState, erasure: ErasureState) -> Token {
    Token {
        kind,
        enclosure_type: enclosures.open.clone(),
        erasure,
    }
}

fn annotate_token(token: &Token, state: LineState) -> (Token, LineState) {
    match &token.kind {
        TokenKind::Enclosure(boundary) => {
            let next = state.enclosures.apply_unchecked(boundary);
            let stamp = match boundary.side {
                Side::Open => &next,
                Side::Close => &state.enclosures,
            };
            let token = stamped(token.kind.clone(), stamp, state.erasure);
            (
                token,
                LineState {
                    enclosures: next,
                    ..state
                },
            )
        }
        TokenKind::Erasure { side } => {
            let next = next_erasure_unchecked(*side);
            let stamp = match side {
                ErasureSide::Close => state.erasure,
                ErasureSide::Open | ErasureSide::Center => next,
            };
            let token = stamped(token.kind.clone(), &state.enclosures, stamp);
            (
                token,
                LineState {
                    erasure: next,
                    ..state
                },
            )
        }
        TokenKind::Word(word) => {
            let (parts, next) = annotate_all(&word.parts, state.clone());
            let kind = TokenKind::Word(Word {
                parts,
                ..word.clone()
            });
            (stamped(kind, &state.enclosures, state.erasure), next)
        }
        TokenKind::NamedSign(sign) => {
            let (name_parts, after_name) = annotate_all(&sign.name_parts, state.clone());
            let (override_sign, next) = match &sign.sign {
                Some(inner) => {
                    let (inner, next) = annotate_token(inner, after_name);
                    (Some(Box::new(inner)), next)
                }
                None => (None, after_name),
            };
            let mut sign = sign.clone();
            sign.name_parts = name_parts;
            sign.sign = override_sign;
            let kind = TokenKind::NamedSign(sign);
            (stamped(kind, &state.enclosures, state.erasure), next)
        }
        TokenKind::Gloss(gloss) => {
            let (parts, next) = annotate_all(&gloss.parts, state.clone());
            let kind = TokenKind::Gloss(Gloss {
                kind: gloss.kind,
                parts,
            });
            (stamped(kind, &state.enclosures, state.erasure), next)
        }
        TokenKind::Lacuna(lacuna) => {
            let (before, middle) = annotate_all(&lacuna.before, state.clone());
            let (after, next) = annotate_all(&lacuna.after, middle);
            let kind = TokenKind::Lacuna(Lacuna { before, after });
            (stamped(kind, &state.enclosures, state.erasure), next)
        }
        TokenKind::Variant(variant) => {
            let mut next = None;
            let mut alternatives = Vec::with_capacity(variant.alternatives.len());
            for alternative in &variant.alternatives {
                let (annotated, post) = annotate_token(alternative, state.clone());
                alternatives.push(annotated);
                next.get_or_insert(post);
            }
            let mut variant = variant.clone();
            variant.alternatives = alternatives;
            let kind = TokenKind::Variant(variant);
            let token = stamped(kind, &state.enclosures, state.erasure);
            (token, next.unwrap_or(state))
        }
        _ => {
            let token = stamped(token.kind.clone(), &state.enclosures, state.erasure);
            (token, state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enclosure_type::Bracket;
    use crate::sign_tokens::NamedSign;
    use EnclosureType::*;

    fn reading(name: &str) -> Token {
        NamedSign::reading(name).into()
    }

    fn set(types: &[EnclosureType]) -> EnclosureSet {
        types.iter().copied().collect()
    }

    #[test]
    fn test_open_and_close() {
        let state = EnclosureState::new().open(BrokenAway, 0).unwrap();
        assert!(state.contains(BrokenAway));
        assert!(state.close(BrokenAway, 1).unwrap().is_empty());
    }

    #[test]
    fn test_forbidden_combination() {
        let state = EnclosureState::new().open(AccidentalOmission, 0).unwrap();
        assert_eq!(
            state.open(Removal, 1),
            Err(EnclosureError::Forbidden {
                index: 1,
                opening: Removal,
                conflicting: AccidentalOmission,
            })
        );
    }

    #[test]
    fn test_missing_requirement() {
        assert_eq!(
            EnclosureState::new().open(PerhapsBrokenAway, 0),
            Err(EnclosureError::MissingRequirement {
                index: 0,
                opening: PerhapsBrokenAway,
                required: BrokenAway,
            })
        );
    }

    #[test]
    fn test_cannot_close_required_enclosure() {
        let state = EnclosureState::new()
            .open(BrokenAway, 0)
            .unwrap()
            .open(PerhapsBrokenAway, 1)
            .unwrap();
        assert_eq!(
            state.close(BrokenAway, 2),
            Err(EnclosureError::StillRequired {
                index: 2,
                closing: BrokenAway,
                dependent: PerhapsBrokenAway,
            })
        );
    }

    #[test]
    fn test_unmatched_close() {
        let tokens = vec![reading("ku"), Token::close(Bracket::BrokenAway)];
        assert_eq!(
            validate(&tokens),
            Err(EnclosureError::UnmatchedClose {
                index: 1,
                closing: BrokenAway,
            })
        );
    }

    #[test]
    fn test_unclosed_at_end_of_line() {
        let tokens = vec![Token::open(Bracket::BrokenAway), Token::unknown_number_of_signs()];
        assert_eq!(
            validate(&tokens),
            Err(EnclosureError::Unclosed {
                open: vec![BrokenAway]
            })
        );
    }

    #[test]
    fn test_perhaps_inside_broken_away() {
        let tokens = vec![
            Token::open(Bracket::BrokenAway),
            Token::open(Bracket::PerhapsBrokenAway),
            Token::unknown_number_of_signs(),
            Token::close(Bracket::PerhapsBrokenAway),
            Token::close(Bracket::BrokenAway),
        ];
        assert_eq!(validate(&tokens), Ok(()));

        let annotated = annotate(&tokens);
        assert_eq!(annotated[2].enclosure_type, set(&[BrokenAway, PerhapsBrokenAway]));
    }

    #[test]
    fn test_invalid_erasure() {
        let tokens = vec![
            Token::erasure(ErasureSide::Open),
            Token::erasure(ErasureSide::Close),
        ];
        assert_eq!(validate(&tokens), Err(EnclosureError::InvalidErasure { index: 1 }));
    }

    #[test]
    fn test_variant_alternatives_must_agree() {
        let diverging = Token::variant(vec![
            Word::new(vec![Token::open(Bracket::BrokenAway), reading("ku")])
                .unwrap()
                .into(),
            Word::new(vec![reading("ka")]).unwrap().into(),
        ])
        .unwrap();
        assert_eq!(
            validate(&[diverging, Token::close(Bracket::BrokenAway)]),
            Err(EnclosureError::VariantDivergence { index: 0 })
        );

        let agreeing = Token::variant(vec![
            Word::new(vec![Token::open(Bracket::BrokenAway), reading("ku")])
                .unwrap()
                .into(),
            Word::new(vec![Token::open(Bracket::BrokenAway), reading("ka")])
                .unwrap()
                .into(),
        ])
        .unwrap();
        assert_eq!(validate(&[agreeing, Token::close(Bracket::BrokenAway)]), Ok(()));
    }

    #[test]
    fn test_annotate_word_parts() {
        let word: Token = Word::new(vec![
            Token::open(Bracket::BrokenAway),
            reading("ku"),
            Token::close(Bracket::BrokenAway),
            Token::hyphen(),
            reading("nu"),
        ])
        .unwrap()
        .into();
        let tokens = vec![word, Token::unknown_number_of_signs()];

        let annotated = annotate(&tokens);
        let parts = &annotated[0].as_word().unwrap().parts;

        assert!(annotated[0].enclosure_type.is_empty());
        assert_eq!(parts[0].enclosure_type, set(&[BrokenAway]));
        assert_eq!(parts[1].enclosure_type, set(&[BrokenAway]));
        assert_eq!(parts[2].enclosure_type, set(&[BrokenAway]));
        assert!(parts[3].enclosure_type.is_empty());
        assert!(parts[4].enclosure_type.is_empty());
        assert!(annotated[1].enclosure_type.is_empty());
    }

    #[test]
    fn test_annotate_erasure() {
        let word: Token = Word::new(vec![
            Token::erasure(ErasureSide::Open),
            reading("ku"),
            Token::erasure(ErasureSide::Center),
            reading("ka"),
            Token::erasure(ErasureSide::Close),
        ])
        .unwrap()
        .into();

        let annotated = annotate(&[word]);
        let erasures: Vec<ErasureState> = annotated[0]
            .as_word()
            .unwrap()
            .parts
            .iter()
            .map(|part| part.erasure)
            .collect();

        assert_eq!(
            erasures,
            vec![
                ErasureState::Erased,
                ErasureState::Erased,
                ErasureState::OverErased,
                ErasureState::OverErased,
                ErasureState::OverErased,
            ]
        );
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let tokens = vec![
            Token::open(Bracket::IntentionalOmission),
            reading("ku"),
            Token::close(Bracket::IntentionalOmission),
        ];
        let once = annotate(&tokens);
        assert_eq!(annotate(&once), once);
    }
}
