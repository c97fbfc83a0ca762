//! Tag name lists accepted by the tag filters.

use crate::Tag;

/// A tag given either by name or as a handle.
#[derive(Debug, Clone, PartialEq)]
pub enum TagSelector {
    /// A raw tag name such as `"gdp"`.
    Name(String),
    /// A tag handle; its name is used.
    Tag(Tag),
}

impl TagSelector {
    /// Returns the tag name this selector stands for.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Tag(tag) => tag.name(),
        }
    }
}

impl From<&str> for TagSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TagSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Tag> for TagSelector {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl From<&Tag> for TagSelector {
    fn from(tag: &Tag) -> Self {
        Self::Tag(tag.clone())
    }
}

/// Joins tag names with `;`, skipping empty names. Returns `None` when
/// nothing is left so the parameter is omitted.
#[must_use]
pub fn join_tag_names(selectors: &[TagSelector]) -> Option<String> {
    let names: Vec<&str> = selectors
        .iter()
        .map(TagSelector::name)
        .filter(|name| !name.is_empty())
        .collect();
    (!names.is_empty()).then(|| names.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagFields;

    #[test]
    fn test_join_mixed_selectors() {
        let tag = Tag::from_fields(
            "usa",
            TagFields {
                popularity: Some(100),
                ..TagFields::default()
            },
        )
        .unwrap();
        let selectors = vec![
            TagSelector::from("gdp"),
            TagSelector::from(&tag),
            TagSelector::from(String::new()),
        ];
        assert_eq!(join_tag_names(&selectors).as_deref(), Some("gdp;usa"));
    }

    #[test]
    fn test_join_empty_is_none() {
        assert_eq!(join_tag_names(&[]), None);
        assert_eq!(join_tag_names(&[TagSelector::from("")]), None);
    }
}
