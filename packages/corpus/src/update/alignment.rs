use serde::{Deserialize, Serialize};

use ebl_transliteration::{AlignmentError, AlignmentToken};

use super::{walk_line, walk_lines, walk_variant, ChapterEdit};
use crate::chapter::Chapter;
use crate::error::{EditLocation, UpdateError, UpdateResult};
use crate::line::{Line, LineVariant};
use crate::manuscript_line::ManuscriptLine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptLineAlignment {
    pub alignment: Vec<AlignmentToken>,
    #[serde(default)]
    pub omitted_words: Vec<usize>,
}

impl ManuscriptLineAlignment {
    pub fn new(alignment: Vec<AlignmentToken>, omitted_words: Vec<usize>) -> Self {
        Self {
            alignment,
            omitted_words,
        }
    }
}

/// Alignments for every manuscript line, nested as lines, variants,
/// manuscript lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChapterAlignment {
    pub lines: Vec<Vec<Vec<ManuscriptLineAlignment>>>,
}

pub struct AlignmentEdit {
    alignment: ChapterAlignment,
    reconstruction_length: usize,
}

impl AlignmentEdit {
    pub fn new(alignment: ChapterAlignment) -> Self {
        Self {
            alignment,
            reconstruction_length: 0,
        }
    }

    fn variants(&self, location: EditLocation) -> &[Vec<ManuscriptLineAlignment>] {
        location
            .line
            .and_then(|line| self.alignment.lines.get(line))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn manuscript_lines(&self, location: EditLocation) -> &[ManuscriptLineAlignment] {
        location
            .variant
            .and_then(|variant| self.variants(location).get(variant))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn check_count(location: EditLocation, expected: usize, actual: usize) -> UpdateResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(UpdateError::alignment(
            location,
            AlignmentError::CountMismatch { expected, actual },
        ))
    }
}

fn check_index(location: EditLocation, index: usize, length: usize) -> UpdateResult<()> {
    if index < length {
        Ok(())
    } else {
        Err(UpdateError::alignment(
            location,
            AlignmentError::IndexOutOfRange { index, length },
        ))
    }
}

impl ChapterEdit for AlignmentEdit {
    fn update_lines(&mut self, chapter: &Chapter) -> UpdateResult<Vec<Line>> {
        check_count(
            EditLocation::chapter(),
            chapter.lines.len(),
            self.alignment.lines.len(),
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
        check_count(
            location,
            variant.manuscripts.len(),
            self.manuscript_lines(location).len(),
        )?;
        self.reconstruction_length = variant.reconstruction.len();
        walk_variant(self, location, variant)
    }

    fn update_manuscript_line(
        &mut self,
        location: EditLocation,
        line: &ManuscriptLine,
    ) -> UpdateResult<ManuscriptLine> {
        let entry = location
            .manuscript
            .and_then(|index| self.manuscript_lines(location).get(index))
            .ok_or_else(|| {
                UpdateError::alignment(
                    location,
                    AlignmentError::CountMismatch {
                        expected: 1,
                        actual: 0,
                    },
                )
            })?;

        let length = self.reconstruction_length;
        let targets = entry.alignment.iter().filter_map(|token| token.alignment);
        for index in targets.chain(entry.omitted_words.iter().copied()) {
            check_index(location, index, length)?;
        }

        line.update_alignment(&entry.alignment, entry.omitted_words.clone())
            .map_err(|error| UpdateError::alignment(location, error))
    }
}
