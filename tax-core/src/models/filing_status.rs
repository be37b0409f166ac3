use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The five federal filing statuses.
///
/// Serialized as the canonical upper-snake names (`"SINGLE"`,
/// `"MARRIED_FILING_JOINTLY"`, ...). Parsing additionally accepts the short
/// codes (`"S"`, `"MFJ"`, `"MFS"`, `"HOH"`, `"QSS"`); anything else is a
/// [`ValidationError::UnrecognizedFilingStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingSurvivingSpouse,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 5] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
        Self::QualifyingSurvivingSpouse,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::MarriedFilingJointly => "MARRIED_FILING_JOINTLY",
            Self::MarriedFilingSeparately => "MARRIED_FILING_SEPARATELY",
            Self::HeadOfHousehold => "HEAD_OF_HOUSEHOLD",
            Self::QualifyingSurvivingSpouse => "QUALIFYING_SURVIVING_SPOUSE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed || status.code() == trimmed)
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::UnrecognizedFilingStatus(s.to_string()))
    }
}

impl TryFrom<String> for FilingStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
