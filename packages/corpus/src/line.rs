//! Lines of a chapter and their reconstructed variants

use serde::{Deserialize, Serialize};
use std::fmt;

use ebl_transliteration::{alignment_map, merge_tokens, render_tokens, Token};

use crate::manuscript_line::ManuscriptLine;
use crate::merger::{merge_by_key, merge_by_position};

/// ATF line number such as `1`, `2'` or `a+3b`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineNumber {
    pub number: u32,
    #[serde(default)]
    pub has_prime: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_modifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix_modifier: Option<char>,
}

impl LineNumber {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            has_prime: false,
            prefix_modifier: None,
            suffix_modifier: None,
        }
    }

    pub fn primed(number: u32) -> Self {
        Self {
            has_prime: true,
            ..Self::new(number)
        }
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix_modifier {
            write!(f, "{prefix}+")?;
        }
        write!(f, "{}", self.number)?;
        if self.has_prime {
            f.write_str("'")?;
        }
        if let Some(suffix) = self.suffix_modifier {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LineNumberLabel {
    Single(LineNumber),
    Range { start: LineNumber, end: LineNumber },
}

impl LineNumberLabel {
    /// Whether the label ends at `number`
    pub fn ends_at(&self, number: &LineNumber) -> bool {
        match self {
            LineNumberLabel::Single(single) => single == number,
            LineNumberLabel::Range { end, .. } => end == number,
        }
    }
}

impl From<LineNumber> for LineNumberLabel {
    fn from(number: LineNumber) -> Self {
        LineNumberLabel::Single(number)
    }
}

impl fmt::Display for LineNumberLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNumberLabel::Single(number) => write!(f, "{number}"),
            LineNumberLabel::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldLineNumber {
    pub number: String,
    pub reference: String,
}

/// Translation of a line, optionally extending over the following lines
/// up to and including `extent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationLine {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<LineNumber>,
    pub text: String,
}

impl TranslationLine {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            extent: None,
            text: text.into(),
        }
    }

    pub fn with_extent(mut self, extent: LineNumber) -> Self {
        self.extent = Some(extent);
        self
    }
}

/// One reconstructed reading of a line and its realisation in the
/// manuscripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineVariant {
    pub reconstruction: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub manuscripts: Vec<ManuscriptLine>,
    #[serde(default)]
    pub parallel_lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intertext: Option<String>,
}

impl LineVariant {
    pub fn new(reconstruction: Vec<Token>, manuscripts: Vec<ManuscriptLine>) -> Self {
        Self {
            reconstruction,
            note: None,
            manuscripts,
            parallel_lines: Vec::new(),
            intertext: None,
        }
    }

    pub fn reconstruction_text(&self) -> String {
        render_tokens(&self.reconstruction)
    }

    pub fn manuscript_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.manuscripts.iter().map(|line| line.manuscript_id)
    }

    /// Reconcile `new` with this variant.
    ///
    /// Reconstruction tokens are merged by sequence alignment and manuscript
    /// lines by manuscript id and labels. Alignments carried over from the
    /// previous manuscript lines are moved to the new reconstruction
    /// positions and dropped when their word was removed. Every alignment
    /// and omitted word past the end of the new reconstruction is dropped.
    pub fn merge(&self, new: LineVariant) -> LineVariant {
        let map = alignment_map(&self.reconstruction, &new.reconstruction);
        let reconstruction = merge_tokens(&self.reconstruction, &new.reconstruction);
        let in_range: Vec<Option<usize>> = (0..reconstruction.len()).map(Some).collect();

        let manuscripts = merge_by_key(
            &self.manuscripts,
            new.manuscripts,
            ManuscriptLine::key,
            |old, new| old.merge(new, &map),
        )
        .into_iter()
        .map(|line| line.update_alignments(&in_range))
        .collect();

        LineVariant {
            reconstruction,
            manuscripts,
            ..new
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub number: LineNumberLabel,
    pub variants: Vec<LineVariant>,
    #[serde(default)]
    pub old_line_numbers: Vec<OldLineNumber>,
    #[serde(default)]
    pub is_second_line_of_parallelism: bool,
    #[serde(default)]
    pub is_beginning_of_section: bool,
    #[serde(default)]
    pub translation: Vec<TranslationLine>,
}

impl Line {
    pub fn new(number: impl Into<LineNumberLabel>, variants: Vec<LineVariant>) -> Self {
        Self {
            number: number.into(),
            variants,
            old_line_numbers: Vec::new(),
            is_second_line_of_parallelism: false,
            is_beginning_of_section: false,
            translation: Vec::new(),
        }
    }

    pub fn manuscript_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.variants.iter().flat_map(LineVariant::manuscript_ids)
    }

    /// Variants are matched by position.
    pub fn merge(&self, new: Line) -> Line {
        let variants = merge_by_position(&self.variants, new.variants, LineVariant::merge);
        Line { variants, ..new }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manuscript_line::ManuscriptLineContent;
    use ebl_transliteration::{AlignmentToken, NamedSign, Word};

    fn word(name: &str) -> Token {
        Word::new(vec![NamedSign::reading(name).into()]).unwrap().into()
    }

    fn manuscript_line(id: u32, words: &[&str]) -> ManuscriptLine {
        ManuscriptLine::new(
            id,
            ManuscriptLineContent::text(LineNumber::new(1), words.iter().map(|w| word(w)).collect()),
        )
    }

    #[test]
    fn test_line_number_display() {
        let number = LineNumber {
            number: 3,
            has_prime: true,
            prefix_modifier: Some("a".to_string()),
            suffix_modifier: Some('b'),
        };
        assert_eq!(number.to_string(), "a+3'b");

        let range = LineNumberLabel::Range {
            start: LineNumber::new(1),
            end: LineNumber::new(2),
        };
        assert_eq!(range.to_string(), "1-2");
        assert!(range.ends_at(&LineNumber::new(2)));
    }

    #[test]
    fn test_variant_merge_remaps_alignment() {
        let aligned = manuscript_line(1, &["ku", "nu"])
            .update_alignment(
                &[
                    AlignmentToken::new("ku", Some(0)),
                    AlignmentToken::new("nu", Some(1)),
                ],
                vec![],
            )
            .unwrap();
        let old = LineVariant::new(vec![word("ku"), word("nu")], vec![aligned]);

        let new = LineVariant::new(
            vec![word("ma"), word("ku"), word("nu")],
            vec![manuscript_line(1, &["ku", "nu"])],
        );

        let merged = old.merge(new);
        let alignments: Vec<Option<usize>> = merged.manuscripts[0]
            .content()
            .iter()
            .map(Token::alignment)
            .collect();
        assert_eq!(alignments, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_variant_merge_drops_alignment_to_removed_word() {
        let aligned = manuscript_line(1, &["ku", "nu"])
            .update_alignment(
                &[
                    AlignmentToken::new("ku", Some(0)),
                    AlignmentToken::new("nu", Some(1)),
                ],
                vec![1],
            )
            .unwrap();
        let old = LineVariant::new(vec![word("ku"), word("nu")], vec![aligned]);
        let new = LineVariant::new(vec![word("ku")], vec![manuscript_line(1, &["ku", "nu"])]);

        let merged = old.merge(new);
        let line = &merged.manuscripts[0];
        assert_eq!(line.content()[0].alignment(), Some(0));
        assert_eq!(line.content()[1].alignment(), None);
        assert!(line.omitted_words.is_empty());
    }

    #[test]
    fn test_submitted_omitted_words_are_not_remapped() {
        let old = LineVariant::new(
            vec![word("a"), word("b"), word("c")],
            vec![manuscript_line(1, &["a", "b"])],
        );
        let mut submitted = manuscript_line(1, &["a", "b", "d"]);
        submitted.omitted_words = vec![3];
        let new = LineVariant::new(
            vec![word("x"), word("a"), word("b"), word("c")],
            vec![submitted],
        );

        let merged = old.merge(new);
        assert_eq!(merged.manuscripts[0].omitted_words, vec![3]);
    }

    #[test]
    fn test_variant_merge_drops_unmatched_manuscript_lines() {
        let old = LineVariant::new(vec![word("ku")], vec![manuscript_line(1, &["ku"])]);
        let new = LineVariant::new(vec![word("ku")], vec![manuscript_line(2, &["ku"])]);

        let merged = old.merge(new);
        assert_eq!(merged.manuscript_ids().collect::<Vec<_>>(), vec![2]);
    }
}
