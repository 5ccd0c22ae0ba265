//! # Chapter updates
//!
//! An edit walks the chapter (manuscripts, then lines, variants and
//! manuscript lines in order) and rebuilds each level through a
//! [`ChapterEdit`] hook. Hooks default to the `walk_*` functions, which
//! rebuild the level from its children, so an edit only overrides the
//! levels it changes. The rebuilt chapter is validated before it is
//! returned; on any error the input chapter is left as it was.

mod alignment;
mod lemmatization;
mod lines;
mod manuscripts;

pub use alignment::{AlignmentEdit, ChapterAlignment, ManuscriptLineAlignment};
pub use lemmatization::{ChapterLemmatization, LemmatizationEdit, LineVariantLemmatization};
pub use lines::{LinesEdit, LinesUpdate};
pub use manuscripts::{ManuscriptsEdit, ManuscriptsUpdate};

use serde::{Deserialize, Serialize};

use crate::chapter::{Chapter, Text};
use crate::error::{EditLocation, NotFoundError, UpdateResult};
use crate::line::{Line, LineVariant};
use crate::manuscript::{Manuscript, MuseumNumber};
use crate::manuscript_line::ManuscriptLine;
use crate::validators::validate_chapter;

pub trait ChapterEdit {
    /// Manuscripts and uncertain fragments of the updated chapter
    fn update_manuscripts(
        &mut self,
        chapter: &Chapter,
    ) -> UpdateResult<(Vec<Manuscript>, Vec<MuseumNumber>)> {
        Ok((chapter.manuscripts.clone(), chapter.uncertain_fragments.clone()))
    }

    fn update_lines(&mut self, chapter: &Chapter) -> UpdateResult<Vec<Line>> {
        walk_lines(self, chapter)
    }

    fn update_line(&mut self, location: EditLocation, line: &Line) -> UpdateResult<Line> {
        walk_line(self, location, line)
    }

    fn update_variant(
        &mut self,
        location: EditLocation,
        variant: &LineVariant,
    ) -> UpdateResult<LineVariant> {
        walk_variant(self, location, variant)
    }

    fn update_manuscript_line(
        &mut self,
        _location: EditLocation,
        line: &ManuscriptLine,
    ) -> UpdateResult<ManuscriptLine> {
        Ok(line.clone())
    }

    /// Last chance to adjust the assembled chapter before validation.
    fn finish(&mut self, _previous: &Chapter, updated: Chapter) -> UpdateResult<Chapter> {
        Ok(updated)
    }
}

pub fn walk_lines<E: ChapterEdit + ?Sized>(edit: &mut E, chapter: &Chapter) -> UpdateResult<Vec<Line>> {
    chapter
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| edit.update_line(EditLocation::line(index), line))
        .collect()
}

pub fn walk_line<E: ChapterEdit + ?Sized>(
    edit: &mut E,
    location: EditLocation,
    line: &Line,
) -> UpdateResult<Line> {
    let variants = line
        .variants
        .iter()
        .enumerate()
        .map(|(index, variant)| edit.update_variant(location.variant(index), variant))
        .collect::<UpdateResult<Vec<_>>>()?;
    Ok(Line {
        variants,
        ..line.clone()
    })
}

pub fn walk_variant<E: ChapterEdit + ?Sized>(
    edit: &mut E,
    location: EditLocation,
    variant: &LineVariant,
) -> UpdateResult<LineVariant> {
    let manuscripts = variant
        .manuscripts
        .iter()
        .enumerate()
        .map(|(index, line)| edit.update_manuscript_line(location.manuscript(index), line))
        .collect::<UpdateResult<Vec<_>>>()?;
    Ok(LineVariant {
        manuscripts,
        ..variant.clone()
    })
}

/// Apply `edit` to `chapter`, returning the validated result.
pub fn update_chapter<E: ChapterEdit + ?Sized>(chapter: &Chapter, edit: &mut E) -> UpdateResult<Chapter> {
    let (manuscripts, uncertain_fragments) = edit.update_manuscripts(chapter)?;
    let lines = edit.update_lines(chapter)?;
    let updated = Chapter {
        text_id: chapter.text_id.clone(),
        stage: chapter.stage,
        name: chapter.name.clone(),
        manuscripts,
        uncertain_fragments,
        lines,
    };
    let updated = edit.finish(chapter, updated)?;
    validate_chapter(&updated)?;
    Ok(updated)
}

/// Apply `edit` to the chapter at `index`, passing the others through.
pub fn update_text<E: ChapterEdit + ?Sized>(text: &Text, index: usize, edit: &mut E) -> UpdateResult<Text> {
    let chapter = text
        .chapters
        .get(index)
        .ok_or(NotFoundError::Chapter(index))?;
    let updated = update_chapter(chapter, edit)?;

    let chapters = text
        .chapters
        .iter()
        .enumerate()
        .map(|(position, chapter)| {
            if position == index {
                updated.clone()
            } else {
                chapter.clone()
            }
        })
        .collect();
    Ok(Text {
        chapters,
        ..text.clone()
    })
}

/// Serialized form of the four edit kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChapterUpdate {
    Alignment(ChapterAlignment),
    Lemmatization(ChapterLemmatization),
    Manuscripts(ManuscriptsUpdate),
    Lines(LinesUpdate),
}

impl ChapterUpdate {
    pub fn name(&self) -> &'static str {
        match self {
            ChapterUpdate::Alignment(_) => "alignment",
            ChapterUpdate::Lemmatization(_) => "lemmatization",
            ChapterUpdate::Manuscripts(_) => "manuscripts",
            ChapterUpdate::Lines(_) => "lines",
        }
    }

    pub fn apply(self, chapter: &Chapter) -> UpdateResult<Chapter> {
        match self {
            ChapterUpdate::Alignment(alignment) => {
                update_chapter(chapter, &mut AlignmentEdit::new(alignment))
            }
            ChapterUpdate::Lemmatization(lemmatization) => {
                update_chapter(chapter, &mut LemmatizationEdit::new(lemmatization))
            }
            ChapterUpdate::Manuscripts(manuscripts) => {
                update_chapter(chapter, &mut ManuscriptsEdit::new(manuscripts))
            }
            ChapterUpdate::Lines(lines) => update_chapter(chapter, &mut LinesEdit::new(lines)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::{ChapterId, Stage, TextId};
    use crate::error::UpdateError;
    use crate::line::LineNumber;

    /// Records the order in which lines and variants are visited.
    #[derive(Default)]
    struct Trace {
        visited: Vec<String>,
    }

    impl ChapterEdit for Trace {
        fn update_variant(
            &mut self,
            location: EditLocation,
            variant: &LineVariant,
        ) -> UpdateResult<LineVariant> {
            self.visited.push(location.to_string());
            walk_variant(self, location, variant)
        }
    }

    fn chapter(name: &str, lines: usize) -> Chapter {
        let mut chapter = Chapter::new(ChapterId::new(TextId::new("L", 1, 1), Stage::StandardBabylonian, name));
        chapter.lines = (0..lines)
            .map(|number| {
                Line::new(
                    LineNumber::new(number as u32 + 1),
                    vec![LineVariant::new(vec![], vec![]), LineVariant::new(vec![], vec![])],
                )
            })
            .collect();
        chapter
    }

    #[test]
    fn test_walk_order() {
        let mut trace = Trace::default();
        let updated = update_chapter(&chapter("I", 2), &mut trace).unwrap();

        assert_eq!(updated, chapter("I", 2));
        assert_eq!(
            trace.visited,
            vec![
                "line 0, variant 0",
                "line 0, variant 1",
                "line 1, variant 0",
                "line 1, variant 1"
            ]
        );
    }

    #[test]
    fn test_update_text_passes_other_chapters_through() {
        let text = Text {
            id: TextId::new("L", 1, 1),
            name: "Ludlul".to_string(),
            chapters: vec![chapter("I", 1), chapter("II", 2)],
        };

        let mut trace = Trace::default();
        let updated = update_text(&text, 1, &mut trace).unwrap();

        assert_eq!(updated, text);
        assert_eq!(trace.visited.len(), 4);
    }

    #[test]
    fn test_update_text_chapter_not_found() {
        let text = Text {
            id: TextId::new("L", 1, 1),
            name: "Ludlul".to_string(),
            chapters: vec![chapter("I", 1)],
        };
        assert_eq!(
            update_text(&text, 3, &mut Trace::default()),
            Err(UpdateError::NotFound(NotFoundError::Chapter(3)))
        );
    }
}
