use serde::{Deserialize, Serialize};
use std::fmt;

use crate::line::Line;
use crate::manuscript::{Manuscript, MuseumNumber};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextId {
    pub genre: String,
    pub category: u32,
    pub index: u32,
}

impl TextId {
    pub fn new(genre: impl Into<String>, category: u32, index: u32) -> Self {
        Self {
            genre: genre.into(),
            category,
            index,
        }
    }
}

impl fmt::Display for TextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.genre, self.category, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    OldBabylonian,
    MiddleBabylonian,
    NeoAssyrian,
    NeoBabylonian,
    LateBabylonian,
    Persian,
    Hellenistic,
    Parthian,
    Uncertain,
    #[default]
    StandardBabylonian,
}

impl Stage {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stage::OldBabylonian => "OB",
            Stage::MiddleBabylonian => "MB",
            Stage::NeoAssyrian => "NA",
            Stage::NeoBabylonian => "NB",
            Stage::LateBabylonian => "LB",
            Stage::Persian => "Per",
            Stage::Hellenistic => "Hel",
            Stage::Parthian => "Par",
            Stage::Uncertain => "Unc",
            Stage::StandardBabylonian => "SB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterId {
    pub text_id: TextId,
    pub stage: Stage,
    pub name: String,
}

impl ChapterId {
    pub fn new(text_id: TextId, stage: Stage, name: impl Into<String>) -> Self {
        Self {
            text_id,
            stage,
            name: name.into(),
        }
    }

    /// File name used by the JSON store, e.g. `L-1-2-SB-II.json`
    pub fn file_name(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!(
            "{}-{}-{}-{}-{}.json",
            self.text_id.genre,
            self.text_id.category,
            self.text_id.index,
            self.stage.abbreviation(),
            name
        )
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.text_id, self.stage.abbreviation(), self.name)
    }
}

/// The edition aggregate: witnesses and lines of one chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub text_id: TextId,
    #[serde(default)]
    pub stage: Stage,
    pub name: String,
    #[serde(default)]
    pub manuscripts: Vec<Manuscript>,
    #[serde(default)]
    pub uncertain_fragments: Vec<MuseumNumber>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Chapter {
    pub fn new(id: ChapterId) -> Self {
        Self {
            text_id: id.text_id,
            stage: id.stage,
            name: id.name,
            manuscripts: Vec::new(),
            uncertain_fragments: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> ChapterId {
        ChapterId::new(self.text_id.clone(), self.stage, self.name.clone())
    }

    pub fn get_manuscript(&self, id: u32) -> Option<&Manuscript> {
        self.manuscripts.iter().find(|manuscript| manuscript.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub id: TextId,
    pub name: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_id_file_name() {
        let id = ChapterId::new(TextId::new("L", 1, 2), Stage::StandardBabylonian, "Tablet II");
        assert_eq!(id.file_name(), "L-1-2-SB-Tablet_II.json");
        assert_eq!(id.to_string(), "L 1.2 SB Tablet II");
    }

    #[test]
    fn test_chapter_id_round_trip() {
        let id = ChapterId::new(TextId::new("L", 1, 2), Stage::OldBabylonian, "I");
        assert_eq!(Chapter::new(id.clone()).id(), id);
    }
}
