use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity measure used to score a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SimilarityMeasureType {
    #[default]
    #[serde(rename = "Sorensen_Dice")]
    SorensenDice,
    #[serde(rename = "Jaccard")]
    Jaccard,
}

impl SimilarityMeasureType {
    pub const ALL: [SimilarityMeasureType; 2] = [
        SimilarityMeasureType::SorensenDice,
        SimilarityMeasureType::Jaccard,
    ];

    /// Canonical string form, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMeasureType::SorensenDice => "Sorensen_Dice",
            SimilarityMeasureType::Jaccard => "Jaccard",
        }
    }

    /// Parse a stored value, falling back to the default variant for
    /// anything unrecognised. The flag is `false` when the fallback was used.
    pub fn parse_lenient(raw: &str) -> (Self, bool) {
        match raw.parse() {
            Ok(kind) => (kind, true),
            Err(_) => (Self::default(), false),
        }
    }
}

impl fmt::Display for SimilarityMeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMeasureType {
    type Err = Error;

    /// Accepts the canonical form, separator and case variants
    /// (`Sorensen-Dice`, `sorensen dice`) and a type-qualified form
    /// (`SimilarityMeasureType.Jaccard`).
    fn from_str(s: &str) -> Result<Self> {
        let unqualified = s.trim().rsplit('.').next().unwrap_or_default();
        let key: String = unqualified
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "sorensendice" | "dice" => Ok(SimilarityMeasureType::SorensenDice),
            "jaccard" => Ok(SimilarityMeasureType::Jaccard),
            _ => Err(Error::Validation(format!("Unknown similarity measure type: '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_round_trip() {
        for kind in SimilarityMeasureType::ALL {
            assert_eq!(kind.as_str().parse::<SimilarityMeasureType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_tolerant_parsing() {
        assert_eq!(
            "Sorensen-Dice".parse::<SimilarityMeasureType>().unwrap(),
            SimilarityMeasureType::SorensenDice
        );
        assert_eq!(
            "SimilarityMeasureType.Jaccard".parse::<SimilarityMeasureType>().unwrap(),
            SimilarityMeasureType::Jaccard
        );
        assert!("Hamming".parse::<SimilarityMeasureType>().is_err());
    }

    #[test]
    fn test_lenient_fallback() {
        assert_eq!(
            SimilarityMeasureType::parse_lenient("Cosine"),
            (SimilarityMeasureType::SorensenDice, false)
        );
        assert_eq!(
            SimilarityMeasureType::parse_lenient("jaccard"),
            (SimilarityMeasureType::Jaccard, true)
        );
    }

    #[test]
    fn test_serde_uses_canonical_form() {
        let json = serde_json::to_string(&SimilarityMeasureType::SorensenDice).unwrap();
        assert_eq!(json, "\"Sorensen_Dice\"");
    }
}
