use serde::{Deserialize, Serialize};

use super::ChapterEdit;
use crate::chapter::Chapter;
use crate::error::UpdateResult;
use crate::line::Line;
use crate::manuscript::{Manuscript, MuseumNumber};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManuscriptsUpdate {
    pub manuscripts: Vec<Manuscript>,
    #[serde(default)]
    pub uncertain_fragments: Vec<MuseumNumber>,
}

/// Replaces the manuscripts wholesale. Lines are kept as they are, so
/// removing a manuscript that is still referenced fails validation.
pub struct ManuscriptsEdit {
    update: ManuscriptsUpdate,
}

impl ManuscriptsEdit {
    pub fn new(update: ManuscriptsUpdate) -> Self {
        Self { update }
    }
}

impl ChapterEdit for ManuscriptsEdit {
    fn update_manuscripts(
        &mut self,
        _chapter: &Chapter,
    ) -> UpdateResult<(Vec<Manuscript>, Vec<MuseumNumber>)> {
        Ok((
            self.update.manuscripts.clone(),
            self.update.uncertain_fragments.clone(),
        ))
    }

    fn update_lines(&mut self, chapter: &Chapter) -> UpdateResult<Vec<Line>> {
        Ok(chapter.lines.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::{ChapterId, Stage, TextId};
    use crate::error::{StructuralError, UpdateError};
    use crate::line::{LineNumber, LineVariant};
    use crate::manuscript::{ManuscriptType, Period, Provenance};
    use crate::manuscript_line::{ManuscriptLine, ManuscriptLineContent};
    use crate::update::update_chapter;

    fn chapter() -> Chapter {
        let mut chapter = Chapter::new(ChapterId::new(TextId::new("L", 1, 1), Stage::StandardBabylonian, "I"));
        chapter.manuscripts = vec![Manuscript::new(1)];
        chapter.lines = vec![Line::new(
            LineNumber::new(1),
            vec![LineVariant::new(
                vec![],
                vec![ManuscriptLine::new(1, ManuscriptLineContent::Empty)],
            )],
        )];
        chapter
    }

    #[test]
    fn test_replace_manuscripts() {
        let manuscripts = vec![
            Manuscript::new(1),
            Manuscript::new(2).with_siglum(Provenance::Babylon, Period::LateBabylonian, ManuscriptType::School, "1"),
        ];
        let update = ManuscriptsUpdate {
            manuscripts: manuscripts.clone(),
            uncertain_fragments: vec![MuseumNumber::new("K", "42")],
        };

        let updated = update_chapter(&chapter(), &mut ManuscriptsEdit::new(update)).unwrap();
        assert_eq!(updated.manuscripts, manuscripts);
        assert_eq!(updated.uncertain_fragments, vec![MuseumNumber::new("K", "42")]);
        assert_eq!(updated.lines, chapter().lines);
    }

    #[test]
    fn test_removing_referenced_manuscript_fails() {
        let update = ManuscriptsUpdate {
            manuscripts: vec![Manuscript::new(2)],
            uncertain_fragments: vec![],
        };

        assert_eq!(
            update_chapter(&chapter(), &mut ManuscriptsEdit::new(update)),
            Err(UpdateError::Structural(StructuralError::UnknownManuscript {
                line: "1".to_string(),
                manuscript_id: 1
            }))
        );
    }
}
