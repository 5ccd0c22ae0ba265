use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Akkadian,
    Sumerian,
    Emesal,
    Unknown,
}

impl Language {
    /// Only Akkadian words are linked to dictionary entries.
    pub fn is_lemmatizable(&self) -> bool {
        matches!(self, Language::Akkadian)
    }

    /// Language selected by a `%code` shift. Returns the language and
    /// whether the following words are normalized.
    pub fn from_shift(code: &str) -> (Language, bool) {
        match code.trim_start_matches('%') {
            "n" => (Language::Akkadian, true),
            "akk" | "ma" | "mb" | "na" | "nb" | "lb" | "sb" | "a" | "eakk" | "oakk" | "ur3akk"
            | "oa" | "ob" => (Language::Akkadian, false),
            "es" => (Language::Emesal, false),
            "sux" | "eg" => (Language::Sumerian, false),
            _ => (Language::Unknown, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_shifts() {
        assert_eq!(Language::from_shift("%n"), (Language::Akkadian, true));
        assert_eq!(Language::from_shift("%sb"), (Language::Akkadian, false));
        assert_eq!(Language::from_shift("%sux"), (Language::Sumerian, false));
        assert_eq!(Language::from_shift("%es"), (Language::Emesal, false));
        assert_eq!(Language::from_shift("%foo"), (Language::Unknown, false));
    }
}
