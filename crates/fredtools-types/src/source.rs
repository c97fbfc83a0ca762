//! Data source records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::SourceId;

/// An institution that provides data to FRED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Source identifier.
    #[serde(alias = "source_id")]
    pub id: SourceId,
    /// Start of the realtime window the record is valid for.
    #[serde(default)]
    pub realtime_start: Option<NaiveDate>,
    /// End of the realtime window the record is valid for.
    #[serde(default)]
    pub realtime_end: Option<NaiveDate>,
    /// Source name.
    pub name: String,
    /// Homepage of the source.
    #[serde(default)]
    pub link: Option<String>,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_from_json() {
        let source: Source = serde_json::from_value(json!({
            "id": 9,
            "realtime_start": "2020-01-01",
            "realtime_end": "2020-01-02",
            "name": "Bureau",
            "link": "https://example.com"
        }))
        .unwrap();

        assert_eq!(source.id, SourceId::new(9));
        assert_eq!(source.name, "Bureau");
        assert_eq!(source.to_string(), "Bureau (9)");
    }

    #[test]
    fn test_source_optional_fields() {
        let source: Source = serde_json::from_value(json!({ "id": 1, "name": "Board" })).unwrap();
        assert!(source.link.is_none());
        assert!(source.realtime_start.is_none());
    }
}
