use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StructuralError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Provenance {
    #[default]
    StandardText,
    Assur,
    Babylon,
    Borsippa,
    Kalhu,
    Nineveh,
    Nippur,
    Sippar,
    Ur,
    Uruk,
    Uncertain,
}

impl Provenance {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Provenance::StandardText => "Std",
            Provenance::Assur => "Ašš",
            Provenance::Babylon => "Bab",
            Provenance::Borsippa => "Bor",
            Provenance::Kalhu => "Kal",
            Provenance::Nineveh => "Nin",
            Provenance::Nippur => "Nip",
            Provenance::Sippar => "Sip",
            Provenance::Ur => "Ur",
            Provenance::Uruk => "Urk",
            Provenance::Uncertain => "Unc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    None,
    OldBabylonian,
    MiddleBabylonian,
    MiddleAssyrian,
    NeoAssyrian,
    NeoBabylonian,
    LateBabylonian,
    Persian,
    Hellenistic,
    Uncertain,
}

impl Period {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Period::None => "",
            Period::OldBabylonian => "OB",
            Period::MiddleBabylonian => "MB",
            Period::MiddleAssyrian => "MA",
            Period::NeoAssyrian => "NA",
            Period::NeoBabylonian => "NB",
            Period::LateBabylonian => "LB",
            Period::Persian => "Per",
            Period::Hellenistic => "Hel",
            Period::Uncertain => "Unc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeriodModifier {
    #[default]
    None,
    Early,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ManuscriptType {
    #[default]
    Library,
    School,
    Varia,
    Commentary,
    Quotation,
    Excerpt,
}

impl ManuscriptType {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ManuscriptType::Library => "",
            ManuscriptType::School => "Sch",
            ManuscriptType::Varia => "Var",
            ManuscriptType::Commentary => "Com",
            ManuscriptType::Quotation => "Quo",
            ManuscriptType::Excerpt => "Ex",
        }
    }
}

/// Museum registration number such as `K.1234` or `BM.40717.a`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MuseumNumber {
    pub prefix: String,
    pub number: String,
    #[serde(default)]
    pub suffix: String,
}

impl MuseumNumber {
    pub fn new(prefix: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            number: number.into(),
            suffix: String::new(),
        }
    }
}

impl fmt::Display for MuseumNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.prefix, self.number)?;
        if !self.suffix.is_empty() {
            write!(f, ".{}", self.suffix)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceType {
    #[default]
    Discussion,
    Edition,
    Copy,
    Photo,
}

/// Bibliography reference; the id is resolved elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(default)]
    pub reference_type: ReferenceType,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub notes: String,
}

/// A witness of the chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manuscript {
    pub id: u32,
    #[serde(default)]
    pub siglum_disambiguator: String,
    #[serde(default)]
    pub museum_number: Option<MuseumNumber>,
    #[serde(default)]
    pub accession: String,
    #[serde(default)]
    pub period_modifier: PeriodModifier,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub provenance: Provenance,
    #[serde(default)]
    pub manuscript_type: ManuscriptType,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub colophon: String,
    #[serde(default)]
    pub unplaced_lines: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Manuscript {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            siglum_disambiguator: String::new(),
            museum_number: None,
            accession: String::new(),
            period_modifier: PeriodModifier::None,
            period: Period::None,
            provenance: Provenance::StandardText,
            manuscript_type: ManuscriptType::Library,
            notes: String::new(),
            colophon: String::new(),
            unplaced_lines: String::new(),
            references: Vec::new(),
        }
    }

    pub fn with_siglum(
        mut self,
        provenance: Provenance,
        period: Period,
        manuscript_type: ManuscriptType,
        disambiguator: impl Into<String>,
    ) -> Self {
        self.provenance = provenance;
        self.period = period;
        self.manuscript_type = manuscript_type;
        self.siglum_disambiguator = disambiguator.into();
        self
    }

    pub fn with_museum_number(mut self, museum_number: MuseumNumber) -> Result<Self, StructuralError> {
        self.museum_number = Some(museum_number);
        self.validate()?;
        Ok(self)
    }

    pub fn with_accession(mut self, accession: impl Into<String>) -> Result<Self, StructuralError> {
        self.accession = accession.into();
        self.validate()?;
        Ok(self)
    }

    /// Provenance, period (omitted for standard texts), type and
    /// disambiguator, e.g. `NinNA1` or `StdSch2`.
    pub fn siglum(&self) -> String {
        let period = if self.provenance == Provenance::StandardText {
            ""
        } else {
            self.period.abbreviation()
        };
        format!(
            "{}{}{}{}",
            self.provenance.abbreviation(),
            period,
            self.manuscript_type.abbreviation(),
            self.siglum_disambiguator
        )
    }

    pub fn validate(&self) -> Result<(), StructuralError> {
        if self.museum_number.is_some() && !self.accession.is_empty() {
            return Err(StructuralError::MuseumNumberAndAccession(self.id));
        }
        Ok(())
    }
}
