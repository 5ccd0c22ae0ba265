//! Reconciling a freshly parsed token sequence with its annotated
//! predecessor.
//!
//! Tokens are matched by the longest common subsequence of their kinds and
//! cleaned values, so inserting or deleting a word does not shift the
//! annotations of the words after it.

use crate::tokens::Token;

fn tokens_match(old: &Token, new: &Token) -> bool {
    old.same_kind(new) && old.clean_value() == new.clean_value()
}

/// For every old position, the new position it was matched to.
pub fn alignment_map(old: &[Token], new: &[Token]) -> Vec<Option<usize>> {
    let old_keys: Vec<String> = old.iter().map(Token::clean_value).collect();
    let new_keys: Vec<String> = new.iter().map(Token::clean_value).collect();
    let matches = |i: usize, j: usize| old_keys[i] == new_keys[j] && old[i].same_kind(&new[j]);

    // lengths[i][j] = LCS length of old[i..] and new[j..]
    let mut lengths = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lengths[i][j] = if matches(i, j) {
                lengths[i + 1][j + 1] + 1
            } else {
                lengths[i + 1][j].max(lengths[i][j + 1])
            };
        }
    }

    let mut map = vec![None; old.len()];
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if matches(i, j) {
            map[i] = Some(j);
            i += 1;
            j += 1;
        } else if lengths[i + 1][j] >= lengths[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    map
}

/// Tokens of `new`, with annotations carried over from matched `old` tokens.
pub fn merge_tokens(old: &[Token], new: &[Token]) -> Vec<Token> {
    let mut matched: Vec<Option<&Token>> = vec![None; new.len()];
    for (old_index, new_index) in alignment_map(old, new).into_iter().enumerate() {
        if let Some(new_index) = new_index {
            matched[new_index] = Some(&old[old_index]);
        }
    }

    new.iter()
        .zip(matched)
        .map(|(new, old)| match old {
            Some(old) if tokens_match(old, new) => old.merge(new),
            _ => new.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign_tokens::NamedSign;
    use crate::tokens::Word;

    fn word(name: &str) -> Token {
        Word::new(vec![NamedSign::reading(name).into()]).unwrap().into()
    }

    fn lemmatized(name: &str, lemma: &str) -> Token {
        let mut word = Word::new(vec![NamedSign::reading(name).into()]).unwrap();
        word.unique_lemma = vec![lemma.to_string()];
        word.into()
    }

    #[test]
    fn test_alignment_map_with_insertion() {
        let old = vec![word("a"), word("b"), word("c")];
        let new = vec![word("a"), word("x"), word("b"), word("c")];
        assert_eq!(alignment_map(&old, &new), vec![Some(0), Some(2), Some(3)]);
    }

    #[test]
    fn test_alignment_map_with_deletion() {
        let old = vec![word("a"), word("b"), word("c")];
        let new = vec![word("a"), word("c")];
        assert_eq!(alignment_map(&old, &new), vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_merge_keeps_lemmas_of_unchanged_words() {
        let old = vec![lemmatized("a", "a I"), lemmatized("b", "b I")];
        let new = vec![word("x"), word("a"), word("c")];

        let merged = merge_tokens(&old, &new);

        assert_eq!(merged[0], word("x"));
        assert_eq!(merged[1].as_word().unwrap().unique_lemma, vec!["a I"]);
        assert_eq!(merged[2], word("c"));
    }

    #[test]
    fn test_kinds_must_match() {
        let old = vec![Token::literal("a")];
        let new = vec![word("a")];
        assert_eq!(alignment_map(&old, &new), vec![None]);
    }
}
