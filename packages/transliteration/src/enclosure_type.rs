use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Set of enclosures open at a token's position
pub type EnclosureSet = BTreeSet<EnclosureType>;

/// Kind of an open enclosure span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnclosureType {
    AccidentalOmission,
    IntentionalOmission,
    Removal,
    Emendation,
    BrokenAway,
    /// `(` outside a broken-away span
    Perhaps,
    /// `(` inside a broken-away span
    PerhapsBrokenAway,
    DocumentOrientedGloss,
}

use EnclosureType::*;

impl EnclosureType {
    pub const ALL: [EnclosureType; 8] = [
        AccidentalOmission,
        IntentionalOmission,
        Removal,
        Emendation,
        BrokenAway,
        Perhaps,
        PerhapsBrokenAway,
        DocumentOrientedGloss,
    ];

    /// Types that may not be open when this one opens
    pub fn forbidden(&self) -> &'static [EnclosureType] {
        match self {
            AccidentalOmission | IntentionalOmission | Emendation => {
                &[AccidentalOmission, IntentionalOmission, Removal, Emendation]
            }
            Removal => &[AccidentalOmission, Removal, Emendation],
            BrokenAway => &[BrokenAway, PerhapsBrokenAway],
            Perhaps | PerhapsBrokenAway => &[Perhaps, PerhapsBrokenAway],
            DocumentOrientedGloss => &[DocumentOrientedGloss],
        }
    }

    /// Types that must already be open when this one opens
    pub fn required(&self) -> &'static [EnclosureType] {
        match self {
            PerhapsBrokenAway => &[BrokenAway],
            _ => &[],
        }
    }

    pub fn bracket(&self) -> Bracket {
        match self {
            AccidentalOmission => Bracket::AccidentalOmission,
            IntentionalOmission => Bracket::IntentionalOmission,
            Removal => Bracket::Removal,
            Emendation => Bracket::Emendation,
            BrokenAway => Bracket::BrokenAway,
            Perhaps | PerhapsBrokenAway => Bracket::PerhapsBrokenAway,
            DocumentOrientedGloss => Bracket::DocumentOrientedGloss,
        }
    }
}

impl fmt::Display for EnclosureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccidentalOmission => "accidental omission",
            IntentionalOmission => "intentional omission",
            Removal => "removal",
            Emendation => "emendation",
            BrokenAway => "broken away",
            Perhaps => "perhaps",
            PerhapsBrokenAway => "perhaps broken away",
            DocumentOrientedGloss => "document oriented gloss",
        };
        f.write_str(name)
    }
}

/// Bracket written in the transliteration. `(` maps to two enclosure
/// types depending on whether a broken-away span is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bracket {
    BrokenAway,
    PerhapsBrokenAway,
    AccidentalOmission,
    IntentionalOmission,
    Removal,
    Emendation,
    DocumentOrientedGloss,
}

impl Bracket {
    pub fn open(&self) -> &'static str {
        match self {
            Bracket::BrokenAway => "[",
            Bracket::PerhapsBrokenAway => "(",
            Bracket::AccidentalOmission | Bracket::Emendation => "<",
            Bracket::IntentionalOmission => "<(",
            Bracket::Removal => "<<",
            Bracket::DocumentOrientedGloss => "{(",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            Bracket::BrokenAway => "]",
            Bracket::PerhapsBrokenAway => ")",
            Bracket::AccidentalOmission | Bracket::Emendation => ">",
            Bracket::IntentionalOmission => ")>",
            Bracket::Removal => ">>",
            Bracket::DocumentOrientedGloss => ")}",
        }
    }

    /// Enclosure type this bracket opens given the currently open set.
    pub fn opening_type(&self, open: &EnclosureSet) -> EnclosureType {
        match self {
            Bracket::PerhapsBrokenAway if open.contains(&BrokenAway) => PerhapsBrokenAway,
            Bracket::PerhapsBrokenAway => Perhaps,
            Bracket::BrokenAway => BrokenAway,
            Bracket::AccidentalOmission => AccidentalOmission,
            Bracket::IntentionalOmission => IntentionalOmission,
            Bracket::Removal => Removal,
            Bracket::Emendation => Emendation,
            Bracket::DocumentOrientedGloss => DocumentOrientedGloss,
        }
    }

    /// Enclosure type this bracket closes given the currently open set.
    pub fn closing_type(&self, open: &EnclosureSet) -> EnclosureType {
        match self {
            Bracket::PerhapsBrokenAway if open.contains(&PerhapsBrokenAway) => PerhapsBrokenAway,
            Bracket::PerhapsBrokenAway => Perhaps,
            other => other.opening_type(open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perhaps_resolves_by_context() {
        let empty = EnclosureSet::new();
        let broken: EnclosureSet = [BrokenAway].into_iter().collect();

        assert_eq!(Bracket::PerhapsBrokenAway.opening_type(&empty), Perhaps);
        assert_eq!(Bracket::PerhapsBrokenAway.opening_type(&broken), PerhapsBrokenAway);
    }

    #[test]
    fn test_required_types_are_never_forbidden() {
        for enclosure in EnclosureType::ALL {
            for required in enclosure.required() {
                assert!(!enclosure.forbidden().contains(required));
            }
        }
    }

    #[test]
    fn test_brackets_round_trip_types() {
        for enclosure in EnclosureType::ALL {
            let bracket = enclosure.bracket();
            assert!(!bracket.open().is_empty());
            assert!(!bracket.close().is_empty());
        }
    }
}
