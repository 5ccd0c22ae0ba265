//! Sign-level tokens: readings, logograms, numbers, graphemes and dividers.

use serde::{Deserialize, Serialize};

use crate::error::{TokenError, TokenResult};
use crate::flags::{render_flags, validate_flags, validate_modifiers, Flag, ALL_FLAGS};
use crate::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedSignKind {
    Reading,
    Logogram,
    Number,
}

impl NamedSignKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedSignKind::Reading => "Reading",
            NamedSignKind::Logogram => "Logogram",
            NamedSignKind::Number => "Number",
        }
    }
}

/// Homophone index written after a sign name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubIndex {
    /// Nothing written; equivalent to index 1
    #[default]
    Default,
    Explicit(u32),
    /// `ₓ`
    Unknown,
}

impl SubIndex {
    pub fn render(&self) -> String {
        match self {
            SubIndex::Default => String::new(),
            SubIndex::Explicit(number) => to_subscript(*number),
            SubIndex::Unknown => "ₓ".to_string(),
        }
    }

    pub fn clean(&self) -> String {
        match self {
            SubIndex::Explicit(1) => String::new(),
            other => other.render(),
        }
    }
}

fn to_subscript(number: u32) -> String {
    number
        .to_string()
        .chars()
        .map(|digit| match digit {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            _ => '₉',
        })
        .collect()
}

/// A sign identified by name: `ku₃`, `KUR@v#`, `1(diš)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSign {
    pub sign_kind: NamedSignKind,
    /// Usually a single value token; broken-away boundaries may split the name.
    pub name_parts: Vec<Token>,
    #[serde(default)]
    pub sub_index: SubIndex,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub flags: Vec<Flag>,
    /// Sign written in parentheses after the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<Box<Token>>,
}

impl NamedSign {
    pub fn new(sign_kind: NamedSignKind, name_parts: Vec<Token>) -> TokenResult<Self> {
        if name_parts.is_empty() {
            return Err(TokenError::empty_parts(sign_kind.as_str()));
        }
        Ok(Self {
            sign_kind,
            name_parts,
            sub_index: SubIndex::Default,
            modifiers: Vec::new(),
            flags: Vec::new(),
            sign: None,
        })
    }

    fn simple(sign_kind: NamedSignKind, name: impl Into<String>) -> Self {
        Self {
            sign_kind,
            name_parts: vec![Token::literal(name)],
            sub_index: SubIndex::Default,
            modifiers: Vec::new(),
            flags: Vec::new(),
            sign: None,
        }
    }

    pub fn reading(name: impl Into<String>) -> Self {
        Self::simple(NamedSignKind::Reading, name)
    }

    pub fn logogram(name: impl Into<String>) -> Self {
        Self::simple(NamedSignKind::Logogram, name)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::simple(NamedSignKind::Number, name)
    }

    pub fn with_sub_index(mut self, sub_index: SubIndex) -> Self {
        self.sub_index = sub_index;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Vec<String>) -> TokenResult<Self> {
        validate_modifiers(&modifiers)?;
        self.modifiers = modifiers;
        Ok(self)
    }

    pub fn with_flags(mut self, flags: Vec<Flag>) -> TokenResult<Self> {
        validate_flags(self.sign_kind.as_str(), &flags, ALL_FLAGS)?;
        self.flags = flags;
        Ok(self)
    }

    pub fn with_sign(mut self, sign: Token) -> Self {
        self.sign = Some(Box::new(sign));
        self
    }

    pub fn name(&self) -> String {
        self.name_parts.iter().map(Token::clean_value).collect()
    }

    pub fn value(&self) -> String {
        let mut value: String = self.name_parts.iter().map(Token::value).collect();
        value.push_str(&self.sub_index.render());
        value.push_str(&self.modifiers.concat());
        value.push_str(&render_flags(&self.flags));
        if let Some(sign) = &self.sign {
            value.push('(');
            value.push_str(&sign.value());
            value.push(')');
        }
        value
    }

    pub fn clean_value(&self) -> String {
        let mut value = self.name();
        value.push_str(&self.sub_index.clean());
        if let Some(sign) = &self.sign {
            value.push('(');
            value.push_str(&sign.clean_value());
            value.push(')');
        }
        value
    }
}

impl From<NamedSign> for Token {
    fn from(sign: NamedSign) -> Self {
        Token::new(TokenKind::NamedSign(sign))
    }
}

/// Word divider such as `:` or `|`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divider {
    pub divider: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl Divider {
    pub fn new(divider: impl Into<String>, modifiers: Vec<String>, flags: Vec<Flag>) -> TokenResult<Self> {
        let divider = divider.into();
        if divider.is_empty() {
            return Err(TokenError::empty_parts("Divider"));
        }
        validate_modifiers(&modifiers)?;
        validate_flags("Divider", &flags, ALL_FLAGS)?;
        Ok(Self {
            divider,
            modifiers,
            flags,
        })
    }

    pub fn value(&self) -> String {
        format!("{}{}{}", self.divider, self.modifiers.concat(), render_flags(&self.flags))
    }
}

impl From<Divider> for Token {
    fn from(divider: Divider) -> Self {
        Token::new(TokenKind::Divider(divider))
    }
}

/// Sign referred to by its sign-list name, e.g. `KUR`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grapheme {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl Grapheme {
    pub fn new(name: impl Into<String>, modifiers: Vec<String>, flags: Vec<Flag>) -> TokenResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TokenError::empty_parts("Grapheme"));
        }
        validate_modifiers(&modifiers)?;
        validate_flags("Grapheme", &flags, ALL_FLAGS)?;
        Ok(Self {
            name,
            modifiers,
            flags,
        })
    }

    pub fn value(&self) -> String {
        format!("{}{}{}", self.name, self.modifiers.concat(), render_flags(&self.flags))
    }
}

impl From<Grapheme> for Token {
    fn from(grapheme: Grapheme) -> Self {
        Token::new(TokenKind::Grapheme(grapheme))
    }
}

/// `|A.KUR|`; `value` holds the text between the bars verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundGrapheme {
    pub value: String,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl CompoundGrapheme {
    pub fn new(value: impl Into<String>, flags: Vec<Flag>) -> TokenResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(TokenError::empty_parts("CompoundGrapheme"));
        }
        validate_flags("CompoundGrapheme", &flags, ALL_FLAGS)?;
        Ok(Self { value, flags })
    }

    pub fn value(&self) -> String {
        format!("|{}|{}", self.value, render_flags(&self.flags))
    }

    pub fn clean_value(&self) -> String {
        format!("|{}|", self.value)
    }
}

impl From<CompoundGrapheme> for Token {
    fn from(compound: CompoundGrapheme) -> Self {
        Token::new(TokenKind::CompoundGrapheme(compound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enclosure_type::Bracket;

    #[test]
    fn test_reading_value() {
        let reading = NamedSign::reading("ku")
            .with_sub_index(SubIndex::Explicit(3))
            .with_modifiers(vec!["@v".to_string()])
            .unwrap()
            .with_flags(vec![Flag::Damage, Flag::Uncertain])
            .unwrap();

        assert_eq!(reading.value(), "ku₃@v#?");
        assert_eq!(reading.clean_value(), "ku₃");
    }

    #[test]
    fn test_sub_index_one_is_cleaned() {
        let reading = NamedSign::reading("du").with_sub_index(SubIndex::Explicit(1));
        assert_eq!(reading.value(), "du₁");
        assert_eq!(reading.clean_value(), "du");
    }

    #[test]
    fn test_multi_digit_sub_index() {
        assert_eq!(SubIndex::Explicit(12).render(), "₁₂");
        assert_eq!(SubIndex::Unknown.render(), "ₓ");
    }

    #[test]
    fn test_logogram_with_sign() {
        let logogram = NamedSign::logogram("KUR")
            .with_sign(Grapheme::new("KUR", vec![], vec![]).unwrap().into());
        assert_eq!(logogram.value(), "KUR(KUR)");
    }

    #[test]
    fn test_number_with_sign() {
        let number = NamedSign::number("1").with_sign(NamedSign::reading("diš").into());
        assert_eq!(number.value(), "1(diš)");
        assert_eq!(number.clean_value(), "1(diš)");
    }

    #[test]
    fn test_split_name_keeps_brackets_in_value_only() {
        let sign = NamedSign::new(
            NamedSignKind::Reading,
            vec![
                Token::literal("k"),
                Token::open(Bracket::BrokenAway),
                Token::literal("u"),
            ],
        )
        .unwrap();

        assert_eq!(sign.value(), "k[u");
        assert_eq!(sign.clean_value(), "ku");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(
            NamedSign::new(NamedSignKind::Logogram, vec![]),
            Err(TokenError::empty_parts("Logogram"))
        );
    }

    #[test]
    fn test_divider_and_graphemes() {
        let divider = Divider::new(":", vec!["@v".to_string()], vec![Flag::Uncertain]).unwrap();
        assert_eq!(divider.value(), ":@v?");

        let compound = CompoundGrapheme::new("A×KUR", vec![Flag::Damage]).unwrap();
        assert_eq!(compound.value(), "|A×KUR|#");
        assert_eq!(compound.clean_value(), "|A×KUR|");

        assert!(Grapheme::new("KUR", vec!["KUR".to_string()], vec![]).is_err());
    }
}
