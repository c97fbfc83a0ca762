//! FRED tag groups.

use serde::{Deserialize, Serialize};

/// Group a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagGroup {
    /// Frequency.
    Freq,
    /// General or concept.
    Gen,
    /// Geography.
    Geo,
    /// Geography type.
    Geot,
    /// Release.
    Rls,
    /// Seasonal adjustment.
    Seas,
    /// Source.
    Src,
    /// Citation and copyright.
    Cc,
}

impl TagGroup {
    /// Returns the group id as sent to the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Freq => "freq",
            Self::Gen => "gen",
            Self::Geo => "geo",
            Self::Geot => "geot",
            Self::Rls => "rls",
            Self::Seas => "seas",
            Self::Src => "src",
            Self::Cc => "cc",
        }
    }

    /// Returns the human-readable group name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Freq => "Frequency",
            Self::Gen => "General or Concept",
            Self::Geo => "Geography",
            Self::Geot => "Geography Type",
            Self::Rls => "Release",
            Self::Seas => "Seasonal Adjustment",
            Self::Src => "Source",
            Self::Cc => "Citation & Copyright",
        }
    }

    /// Returns all groups.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Freq,
            Self::Gen,
            Self::Geo,
            Self::Geot,
            Self::Rls,
            Self::Seas,
            Self::Src,
            Self::Cc,
        ]
    }
}

impl std::fmt::Display for TagGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown tag group id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tag group: {0}")]
pub struct TagGroupParseError(String);

impl std::str::FromStr for TagGroup {
    type Err = TagGroupParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| TagGroupParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_group_round_trip_through_str() {
        for group in TagGroup::all() {
            assert_eq!(group.as_str().parse::<TagGroup>().unwrap(), *group);
        }
        assert_eq!("GEO".parse::<TagGroup>().unwrap(), TagGroup::Geo);
    }

    #[test]
    fn test_tag_group_unknown() {
        assert!("weekly".parse::<TagGroup>().is_err());
    }

    #[test]
    fn test_tag_group_label() {
        assert_eq!(TagGroup::Seas.label(), "Seasonal Adjustment");
        assert_eq!(TagGroup::Cc.to_string(), "cc");
    }
}
