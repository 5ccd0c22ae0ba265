use crate::sign_tokens::NamedSign;
use crate::tokens::{EnclosureBoundary, ErasureSide, Gloss, Lacuna, Token, TokenKind, Variant, Word};

/// Visitor pattern for traversing token trees immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_token(&mut self, token: &Token) {
        walk_token(self, token);
    }

    fn visit_word(&mut self, word: &Word) {
        walk_word(self, word);
    }

    fn visit_named_sign(&mut self, sign: &NamedSign) {
        walk_named_sign(self, sign);
    }

    fn visit_variant(&mut self, variant: &Variant) {
        walk_variant(self, variant);
    }

    fn visit_gloss(&mut self, gloss: &Gloss) {
        walk_gloss(self, gloss);
    }

    fn visit_lacuna(&mut self, lacuna: &Lacuna) {
        walk_lacuna(self, lacuna);
    }

    fn visit_enclosure(&mut self, _boundary: &EnclosureBoundary) {
        // Leaf node, no children to walk
    }

    fn visit_erasure(&mut self, _side: ErasureSide) {
        // Leaf node, no children to walk
    }

    fn visit_leaf(&mut self, _token: &Token) {
        // Leaf node, no children to walk
    }
}

impl Token {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_token(self);
    }
}

pub fn walk_token<V: Visitor>(visitor: &mut V, token: &Token) {
    match &token.kind {
        TokenKind::Word(word) => visitor.visit_word(word),
        TokenKind::NamedSign(sign) => visitor.visit_named_sign(sign),
        TokenKind::Variant(variant) => visitor.visit_variant(variant),
        TokenKind::Gloss(gloss) => visitor.visit_gloss(gloss),
        TokenKind::Lacuna(lacuna) => visitor.visit_lacuna(lacuna),
        TokenKind::Enclosure(boundary) => visitor.visit_enclosure(boundary),
        TokenKind::Erasure { side } => visitor.visit_erasure(*side),
        _ => visitor.visit_leaf(token),
    }
}

pub fn walk_word<V: Visitor>(visitor: &mut V, word: &Word) {
    for part in &word.parts {
        visitor.visit_token(part);
    }
}

pub fn walk_named_sign<V: Visitor>(visitor: &mut V, sign: &NamedSign) {
    for part in &sign.name_parts {
        visitor.visit_token(part);
    }
    if let Some(sign) = &sign.sign {
        visitor.visit_token(sign);
    }
}

pub fn walk_variant<V: Visitor>(visitor: &mut V, variant: &Variant) {
    for alternative in &variant.alternatives {
        visitor.visit_token(alternative);
    }
}

pub fn walk_gloss<V: Visitor>(visitor: &mut V, gloss: &Gloss) {
    for part in &gloss.parts {
        visitor.visit_token(part);
    }
}

pub fn walk_lacuna<V: Visitor>(visitor: &mut V, lacuna: &Lacuna) {
    for token in lacuna.before.iter().chain(&lacuna.after) {
        visitor.visit_token(token);
    }
}

/// Collects the lemma ids of every word, in reading order
#[derive(Debug, Default)]
pub struct LemmaCollector {
    pub lemmas: Vec<String>,
}

impl Visitor for LemmaCollector {
    fn visit_word(&mut self, word: &Word) {
        self.lemmas.extend(word.unique_lemma.iter().cloned());
        walk_word(self, word);
    }
}

/// All lemma ids used in a token sequence
pub fn unique_lemmas(tokens: &[Token]) -> Vec<String> {
    let mut collector = LemmaCollector::default();
    for token in tokens {
        token.accept(&mut collector);
    }
    collector.lemmas
}
