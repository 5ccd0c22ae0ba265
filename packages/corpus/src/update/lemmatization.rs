use serde::{Deserialize, Serialize};

use ebl_transliteration::{lemmatize_tokens, LemmatizationError, LemmatizationToken};

use super::{walk_line, walk_lines, walk_variant, ChapterEdit};
use crate::chapter::Chapter;
use crate::error::{EditLocation, UpdateError, UpdateResult};
use crate::line::{Line, LineVariant};
use crate::manuscript_line::ManuscriptLine;

/// Lemmas for the reconstruction of a variant and for each of its
/// manuscript lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineVariantLemmatization {
    pub reconstruction: Vec<LemmatizationToken>,
    #[serde(default)]
    pub manuscripts: Vec<Vec<LemmatizationToken>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChapterLemmatization {
    pub lines: Vec<Vec<LineVariantLemmatization>>,
}

pub struct LemmatizationEdit {
    lemmatization: ChapterLemmatization,
}

impl LemmatizationEdit {
    pub fn new(lemmatization: ChapterLemmatization) -> Self {
        Self { lemmatization }
    }

    fn variants(&self, location: EditLocation) -> &[LineVariantLemmatization] {
        location
            .line
            .and_then(|line| self.lemmatization.lines.get(line))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn variant(&self, location: EditLocation) -> UpdateResult<&LineVariantLemmatization> {
        location
            .variant
            .and_then(|variant| self.variants(location).get(variant))
            .ok_or_else(|| count_mismatch(location, 1, 0))
    }
}

fn count_mismatch(location: EditLocation, expected: usize, actual: usize) -> UpdateError {
    UpdateError::lemmatization(location, LemmatizationError::CountMismatch { expected, actual })
}

fn check_count(location: EditLocation, expected: usize, actual: usize) -> UpdateResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(count_mismatch(location, expected, actual))
    }
}

impl ChapterEdit for LemmatizationEdit {
    fn update_lines(&mut self, chapter: &Chapter) -> UpdateResult<Vec<Line>> {
        check_count(
            EditLocation::chapter(),
            chapter.lines.len(),
            self.lemmatization.lines.len(),
        )?;
        walk_lines(self, chapter)
    }

    fn update_line(&mut self, location: EditLocation, line: &Line) -> UpdateResult<Line> {
        check_count(location, line.variants.len(), self.variants(location).len())?;
        walk_line(self, location, line)
    }

    fn update_variant(
        &mut self,
        location: EditLocation,
        variant: &LineVariant,
    ) -> UpdateResult<LineVariant> {
        let lemmatization = self.variant(location)?;
        check_count(
            location,
            variant.manuscripts.len(),
            lemmatization.manuscripts.len(),
        )?;
        let reconstruction = lemmatize_tokens(&variant.reconstruction, &lemmatization.reconstruction)
            .map_err(|error| UpdateError::lemmatization(location, error))?;

        let walked = walk_variant(self, location, variant)?;
        Ok(LineVariant {
            reconstruction,
            ..walked
        })
    }

    fn update_manuscript_line(
        &mut self,
        location: EditLocation,
        line: &ManuscriptLine,
    ) -> UpdateResult<ManuscriptLine> {
        let tokens = location
            .manuscript
            .and_then(|index| self.variant(location).ok()?.manuscripts.get(index))
            .ok_or_else(|| count_mismatch(location, 1, 0))?;

        line.update_lemmatization(tokens)
            .map_err(|error| UpdateError::lemmatization(location, error))
    }
}
