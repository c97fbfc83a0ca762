//! Release table elements.

use fredtools_types::{ElementId, ReleaseId, SeriesId};

/// What a release table element represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A heading grouping other elements.
    Section,
    /// A line backed by a series.
    Series,
    /// Any other type string, kept verbatim (empty for stubs).
    Other(String),
}

impl ElementKind {
    /// Parses the `type` field of an element.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "section" => Self::Section,
            "series" => Self::Series,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the type string as sent by FRED.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Section => "section",
            Self::Series => "series",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for ElementKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a release table.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Identifier, unique within one table.
    pub element_id: ElementId,
    /// Release the element belongs to.
    pub release_id: ReleaseId,
    /// Series shown on this line, if any.
    pub series_id: Option<SeriesId>,
    /// Parent element, if any.
    pub parent_id: Option<ElementId>,
    /// Display line label.
    pub line: Option<String>,
    /// Element type.
    pub kind: ElementKind,
    /// Display name.
    pub name: String,
    /// Nesting level as reported by FRED.
    pub level: Option<i64>,
    /// Observation value as formatted by FRED, when values were requested.
    pub observation_value: Option<String>,
    /// Date of [`Element::observation_value`].
    pub observation_date: Option<String>,
    /// Children in payload order, without duplicates.
    pub children: Vec<ElementId>,
}

impl Element {
    /// Creates an element with only its identifiers set.
    #[must_use]
    pub fn stub(element_id: ElementId, release_id: ReleaseId) -> Self {
        Self {
            element_id,
            release_id,
            series_id: None,
            parent_id: None,
            line: None,
            kind: ElementKind::default(),
            name: String::new(),
            level: None,
            observation_value: None,
            observation_date: None,
            children: Vec::new(),
        }
    }

    /// Returns true for section headings.
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self.kind, ElementKind::Section)
    }

    /// Returns true for series lines.
    #[must_use]
    pub const fn is_series(&self) -> bool {
        matches!(self.kind, ElementKind::Series)
    }

    /// Appends `child` unless it is already listed. Returns true if added.
    pub fn add_child(&mut self, child: ElementId) -> bool {
        if child == self.element_id || self.children.contains(&child) {
            return false;
        }
        self.children.push(child);
        true
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.element_id)?;
        if let Some(series_id) = &self.series_id {
            write!(f, " {series_id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_raw() {
        assert_eq!(ElementKind::from_raw("section"), ElementKind::Section);
        assert_eq!(ElementKind::from_raw("series"), ElementKind::Series);
        assert_eq!(
            ElementKind::from_raw("note"),
            ElementKind::Other("note".to_string())
        );
        assert_eq!(ElementKind::default().as_str(), "");
    }

    #[test]
    fn test_add_child_is_idempotent() {
        let mut element = Element::stub(ElementId::new(1), ReleaseId::new(53));
        assert!(element.add_child(ElementId::new(2)));
        assert!(!element.add_child(ElementId::new(2)));
        assert!(!element.add_child(ElementId::new(1)));
        assert_eq!(element.children, vec![ElementId::new(2)]);
    }

    #[test]
    fn test_display() {
        let mut element = Element::stub(ElementId::new(7), ReleaseId::new(53));
        element.name = "Goods".to_string();
        element.series_id = Some(SeriesId::from("S1"));
        assert_eq!(element.to_string(), "Goods [7] S1");
    }
}
