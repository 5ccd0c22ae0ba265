use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use ebl_transliteration::{validate_and_annotate, Token};

use super::ChapterEdit;
use crate::chapter::Chapter;
use crate::error::{EditLocation, NotFoundError, StructuralError, UpdateError, UpdateResult};
use crate::line::{Line, LineVariant};
use crate::manuscript_line::{ManuscriptLine, ManuscriptLineContent};

/// Line edits addressed by index into the current chapter. An edited line
/// is merged with the line it replaces; new lines are appended after the
/// kept ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinesUpdate {
    #[serde(default)]
    pub new: Vec<Line>,
    #[serde(default)]
    pub deleted: BTreeSet<usize>,
    #[serde(default)]
    pub edited: BTreeMap<usize, Line>,
}

pub struct LinesEdit {
    update: LinesUpdate,
}

impl LinesEdit {
    pub fn new(update: LinesUpdate) -> Self {
        Self { update }
    }

    fn check_indices(&self, chapter: &Chapter) -> UpdateResult<()> {
        let length = chapter.lines.len();
        let addressed = self.update.deleted.iter().chain(self.update.edited.keys());
        if let Some(index) = addressed.copied().find(|index| *index >= length) {
            return Err(NotFoundError::Line(index).into());
        }
        if let Some(index) = self
            .update
            .deleted
            .iter()
            .copied()
            .find(|index| self.update.edited.contains_key(index))
        {
            return Err(StructuralError::ConflictingLineEdit(index).into());
        }
        Ok(())
    }
}

fn annotate(location: EditLocation, tokens: &[Token]) -> UpdateResult<Vec<Token>> {
    validate_and_annotate(tokens).map_err(|error| UpdateError::enclosure(location, error))
}

fn prepare_manuscript_line(location: EditLocation, line: &ManuscriptLine) -> UpdateResult<ManuscriptLine> {
    let content = match &line.line {
        ManuscriptLineContent::Text { number, content } => ManuscriptLineContent::Text {
            number: number.clone(),
            content: annotate(location, content)?,
        },
        ManuscriptLineContent::Empty => ManuscriptLineContent::Empty,
    };
    Ok(ManuscriptLine {
        line: content,
        ..line.clone()
    })
}

fn prepare_variant(location: EditLocation, variant: &LineVariant) -> UpdateResult<LineVariant> {
    let reconstruction = annotate(location, &variant.reconstruction)?;
    let manuscripts = variant
        .manuscripts
        .iter()
        .enumerate()
        .map(|(index, line)| prepare_manuscript_line(location.manuscript(index), line))
        .collect::<UpdateResult<Vec<_>>>()?;
    Ok(LineVariant {
        reconstruction,
        manuscripts,
        ..variant.clone()
    })
}

/// Validate and annotate the enclosures of an incoming line.
fn prepare_line(location: EditLocation, line: &Line) -> UpdateResult<Line> {
    let variants = line
        .variants
        .iter()
        .enumerate()
        .map(|(index, variant)| prepare_variant(location.variant(index), variant))
        .collect::<UpdateResult<Vec<_>>>()?;
    Ok(Line {
        variants,
        ..line.clone()
    })
}

impl ChapterEdit for LinesEdit {
    fn update_lines(&mut self, chapter: &Chapter) -> UpdateResult<Vec<Line>> {
        self.check_indices(chapter)?;

        let mut lines = Vec::with_capacity(chapter.lines.len() + self.update.new.len());
        for (index, line) in chapter.lines.iter().enumerate() {
            if self.update.deleted.contains(&index) {
                continue;
            }
            match self.update.edited.get(&index) {
                Some(edited) => {
                    let edited = prepare_line(EditLocation::line(index), edited)?;
                    lines.push(line.merge(edited));
                }
                None => lines.push(line.clone()),
            }
        }
        for (offset, line) in self.update.new.iter().enumerate() {
            let location = EditLocation::line(chapter.lines.len() + offset);
            lines.push(prepare_line(location, line)?);
        }

        Ok(lines)
    }
}
