//! Release table tree.

use std::collections::{HashMap, HashSet};

use fredtools_types::{ElementId, FredError, ReleaseId, Result, coerce_field, scalar_text};
use serde_json::Value;

use crate::builder::Builder;
use crate::element::Element;

/// How the roots of a [`ReleaseTable`] were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootPass {
    /// Unattached elements without a parent, or whose parent is the
    /// requested root element.
    Declared,
    /// No declared roots existed; unattached elements whose parent is
    /// missing from the table were promoted instead.
    Orphans,
}

impl std::fmt::Display for RootPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declared => f.write_str("declared"),
            Self::Orphans => f.write_str("orphans"),
        }
    }
}

/// A release table rebuilt into a tree with exactly one node per element.
///
/// # Example
///
/// ```
/// use fredtools_table::ReleaseTable;
/// use fredtools_types::ElementId;
/// use serde_json::json;
///
/// let payload = json!({
///     "name": "Parent",
///     "element_id": 12886,
///     "release_id": "53",
///     "elements": {
///         "12886": {
///             "element_id": 12886, "type": "section", "name": "Root",
///             "children": [{ "element_id": 12887, "type": "series", "name": "Goods", "series_id": "S1" }]
///         }
///     }
/// });
///
/// let table = ReleaseTable::parse(&payload, None).unwrap();
/// let root = table.roots().next().unwrap();
/// assert_eq!(root.name, "Root");
/// assert_eq!(root.children().next().unwrap().name, "Goods");
/// assert!(table.get(ElementId::new(12887)).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ReleaseTable {
    name: Option<String>,
    element_id: Option<ElementId>,
    release_id: ReleaseId,
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
    roots: Vec<ElementId>,
    root_pass: RootPass,
    unanchored: Vec<ElementId>,
}

impl ReleaseTable {
    /// Builds a table from a `release/tables` payload.
    ///
    /// `fallback_release` is used when the payload carries no `release_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::UpstreamShape`] if the payload has no release
    /// identifier, no elements, an element without `element_id` or no root
    /// at all, and [`FredError::Conversion`] for malformed integer fields.
    pub fn parse(payload: &Value, fallback_release: Option<ReleaseId>) -> Result<Self> {
        let release_id = coerce_field(payload, "release_id")?
            .map(ReleaseId::new)
            .or(fallback_release)
            .ok_or_else(|| {
                FredError::UpstreamShape("release table payload has no release_id".to_string())
            })?;
        let declared_root = coerce_field(payload, "element_id")?.map(ElementId::new);
        let raw_elements: Vec<&Value> = match payload.get("elements") {
            Some(Value::Object(map)) => map.values().collect(),
            Some(Value::Array(list)) => list.iter().collect(),
            _ => Vec::new(),
        };
        if raw_elements.is_empty() {
            return Err(FredError::UpstreamShape(
                "release table payload has no elements".to_string(),
            ));
        }

        let mut builder = Builder::new(release_id);
        for raw in raw_elements {
            builder.visit(raw)?;
        }
        builder.link_declared_parents();

        let attached = builder.attached();
        let unattached: Vec<&Element> = builder
            .elements()
            .iter()
            .filter(|element| !attached.contains(&element.element_id))
            .collect();

        let declared: Vec<ElementId> = unattached
            .iter()
            .filter(|element| element.parent_id.is_none() || element.parent_id == declared_root)
            .map(|element| element.element_id)
            .collect();

        let (roots, root_pass) = if declared.is_empty() {
            let orphans: Vec<ElementId> = unattached
                .iter()
                .filter(|element| element.parent_id.is_none_or(|parent| !builder.contains(parent)))
                .map(|element| element.element_id)
                .collect();
            if !orphans.is_empty() {
                tracing::warn!(
                    release_id = %release_id,
                    element_id = ?declared_root,
                    orphans = orphans.len(),
                    "Release table has no declared roots, promoting orphaned elements"
                );
            }
            (orphans, RootPass::Orphans)
        } else {
            (declared, RootPass::Declared)
        };

        if roots.is_empty() {
            return Err(FredError::UpstreamShape(format!(
                "release table {release_id} has no root elements"
            )));
        }

        let root_set: HashSet<ElementId> = roots.iter().copied().collect();
        let unanchored: Vec<ElementId> = unattached
            .iter()
            .map(|element| element.element_id)
            .filter(|id| !root_set.contains(id))
            .collect();
        if !unanchored.is_empty() {
            tracing::debug!(
                release_id = %release_id,
                count = unanchored.len(),
                "Release table has unanchored elements"
            );
        }

        let (elements, index) = builder.finish();
        Ok(Self {
            name: payload.get("name").and_then(scalar_text),
            element_id: declared_root,
            release_id,
            elements,
            index,
            roots,
            root_pass,
            unanchored,
        })
    }

    /// Returns the table name, if FRED sent one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the root element that was requested.
    #[must_use]
    pub const fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    /// Returns the owning release.
    #[must_use]
    pub const fn release_id(&self) -> ReleaseId {
        self.release_id
    }

    /// Returns which pass selected the roots.
    #[must_use]
    pub const fn root_pass(&self) -> RootPass {
        self.root_pass
    }

    /// Returns the root identifiers in payload order.
    #[must_use]
    pub fn root_ids(&self) -> &[ElementId] {
        &self.roots
    }

    /// Iterates over the roots.
    pub fn roots(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.roots.iter().filter_map(|id| self.get(*id))
    }

    /// Returns elements that are neither roots nor reachable from any other
    /// element.
    #[must_use]
    pub fn unanchored(&self) -> &[ElementId] {
        &self.unanchored
    }

    /// Looks up an element by identifier.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<ElementRef<'_>> {
        self.index.get(&id).map(|&slot| ElementRef {
            table: self,
            element: &self.elements[slot],
        })
    }

    /// Iterates over every element, each exactly once, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.elements.iter().map(|element| ElementRef {
            table: self,
            element,
        })
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the table has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Walks the tree depth-first from the roots, yielding each reachable
    /// element once together with its depth.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            table: self,
            stack: self.roots.iter().rev().map(|id| (0, *id)).collect(),
            seen: HashSet::new(),
        }
    }
}

impl<'a> IntoIterator for &'a ReleaseTable {
    type Item = ElementRef<'a>;
    type IntoIter = Box<dyn Iterator<Item = ElementRef<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Borrowed view of one element that can navigate the tree.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    table: &'a ReleaseTable,
    element: &'a Element,
}

impl<'a> ElementRef<'a> {
    /// Returns the underlying element.
    #[must_use]
    pub const fn element(&self) -> &'a Element {
        self.element
    }

    /// Iterates over the children in payload order.
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let table = self.table;
        self.element
            .children
            .iter()
            .filter_map(move |id| table.get(*id))
    }

    /// Returns the parent element if it is part of the table.
    #[must_use]
    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.element.parent_id.and_then(|id| self.table.get(id))
    }

    /// Returns true if this element is one of the table roots.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.table.roots.contains(&self.element.element_id)
    }
}

impl std::ops::Deref for ElementRef<'_> {
    type Target = Element;

    fn deref(&self) -> &Self::Target {
        self.element
    }
}

/// Depth-first walk over a [`ReleaseTable`], see [`ReleaseTable::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    table: &'a ReleaseTable,
    stack: Vec<(usize, ElementId)>,
    seen: HashSet<ElementId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, ElementRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, id)) = self.stack.pop() {
            if !self.seen.insert(id) {
                continue;
            }
            let Some(node) = self.table.get(id) else {
                continue;
            };
            self.stack
                .extend(node.element.children.iter().rev().map(|child| (depth + 1, *child)));
            return Some((depth, node));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fredtools_types::SeriesId;
    use serde_json::json;

    fn parent_child_payload() -> Value {
        json!({
            "name": "Parent",
            "element_id": 12886,
            "release_id": "53",
            "elements": {
                "12886": {
                    "element_id": 12886,
                    "release_id": 53,
                    "series_id": null,
                    "parent_id": null,
                    "line": "3",
                    "type": "section",
                    "name": "Root",
                    "level": "0",
                    "children": [{
                        "element_id": 12887,
                        "release_id": 53,
                        "series_id": "S1",
                        "parent_id": 12886,
                        "line": "4",
                        "type": "series",
                        "name": "Goods",
                        "level": "1",
                        "children": []
                    }]
                }
            }
        })
    }

    fn ids(table: &ReleaseTable) -> Vec<i64> {
        table.root_ids().iter().map(|id| id.get()).collect()
    }

    #[test]
    fn test_parse_parent_with_nested_child() {
        let table = ReleaseTable::parse(&parent_child_payload(), None).unwrap();
        assert_eq!(table.name(), Some("Parent"));
        assert_eq!(table.release_id(), ReleaseId::new(53));
        assert_eq!(table.element_id(), Some(ElementId::new(12886)));
        assert_eq!(table.root_pass(), RootPass::Declared);
        assert_eq!(ids(&table), vec![12886]);
        assert_eq!(table.len(), 2);

        let root = table.roots().next().unwrap();
        assert!(root.is_section());
        assert_eq!(root.level, Some(0));
        let children: Vec<_> = root.children().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Goods");
        assert_eq!(children[0].series_id, Some(SeriesId::from("S1")));
        assert_eq!(children[0].parent().unwrap().element_id, ElementId::new(12886));
        assert!(table.unanchored().is_empty());
    }

    #[test]
    fn test_child_listed_nested_and_top_level_appears_once() {
        let mut payload = parent_child_payload();
        payload["elements"]["12887"] = json!({
            "element_id": 12887,
            "parent_id": 12886,
            "type": "series",
            "name": "Goods",
            "children": []
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(ids(&table), vec![12886]);
        let root = table.get(ElementId::new(12886)).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(table.walk().count(), 2);
    }

    #[test]
    fn test_child_repeated_in_children_linked_once() {
        let payload = json!({
            "release_id": 1,
            "elements": {
                "1": {
                    "element_id": 1,
                    "name": "Root",
                    "children": [
                        { "element_id": 2, "name": "A" },
                        { "element_id": 2, "name": "A" }
                    ]
                }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        assert_eq!(
            table.get(ElementId::new(1)).unwrap().children,
            vec![ElementId::new(2)]
        );
    }

    #[test]
    fn test_child_inherits_parent_id() {
        let payload = json!({
            "release_id": 1,
            "elements": [{
                "element_id": 1,
                "name": "Root",
                "children": [{ "element_id": 2, "name": "A" }]
            }]
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        let child = table.get(ElementId::new(2)).unwrap();
        assert_eq!(child.parent_id, Some(ElementId::new(1)));
        assert!(!child.is_root());
    }

    #[test]
    fn test_missing_root_uses_elements_without_parent() {
        let payload = json!({
            "element_id": null,
            "release_id": "10",
            "elements": {
                "1": {
                    "element_id": 1,
                    "release_id": 10,
                    "series_id": "A",
                    "parent_id": null,
                    "line": "1",
                    "type": "series",
                    "name": "Top",
                    "level": "0",
                    "children": []
                }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        assert_eq!(table.release_id(), ReleaseId::new(10));
        assert_eq!(table.roots().next().unwrap().name, "Top");
    }

    #[test]
    fn test_orphans_promoted_when_no_declared_root() {
        let payload = json!({
            "element_id": 100,
            "release_id": 5,
            "elements": {
                "2": { "element_id": 2, "parent_id": 99, "name": "Orphan A" },
                "3": { "element_id": 3, "parent_id": 98, "name": "Orphan B" }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        assert_eq!(table.root_pass(), RootPass::Orphans);
        assert_eq!(ids(&table), vec![2, 3]);
    }

    #[test]
    fn test_unanchored_elements_reported() {
        let payload = json!({
            "element_id": 1,
            "release_id": 5,
            "elements": {
                "1": { "element_id": 1, "name": "Root" },
                "2": { "element_id": 2, "parent_id": 99, "name": "Stray" }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        assert_eq!(table.root_pass(), RootPass::Declared);
        assert_eq!(ids(&table), vec![1]);
        assert_eq!(table.unanchored(), &[ElementId::new(2)]);
        assert!(table.get(ElementId::new(2)).is_some());
    }

    #[test]
    fn test_declared_parent_not_listed_is_linked() {
        let payload = json!({
            "element_id": 1,
            "release_id": 5,
            "elements": {
                "1": { "element_id": 1, "name": "Root", "children": [] },
                "2": { "element_id": 2, "parent_id": 3, "name": "Leaf" },
                "3": { "element_id": 3, "parent_id": 1, "name": "Middle" }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        assert_eq!(ids(&table), vec![1]);
        let walked: Vec<(usize, i64)> = table
            .walk()
            .map(|(depth, node)| (depth, node.element_id.get()))
            .collect();
        assert_eq!(walked, vec![(0, 1), (1, 3), (2, 2)]);
    }

    #[test]
    fn test_stub_entry_upgraded() {
        let payload = json!({
            "element_id": 1,
            "release_id": 5,
            "elements": {
                "1": {
                    "element_id": 1,
                    "name": "Root",
                    "children": [{ "element_id": 2 }]
                },
                "2": { "element_id": 2, "type": "series", "name": "Full", "series_id": "GDP" }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        let child = table.get(ElementId::new(2)).unwrap();
        assert_eq!(child.name, "Full");
        assert_eq!(child.series_id, Some(SeriesId::from("GDP")));
        assert_eq!(child.parent_id, Some(ElementId::new(1)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_every_element_appears_once_in_walk() {
        let payload = json!({
            "element_id": 10,
            "release_id": 5,
            "elements": {
                "10": {
                    "element_id": 10, "name": "A",
                    "children": [
                        { "element_id": 11, "name": "B", "children": [{ "element_id": 12, "name": "C" }] },
                        { "element_id": 13, "name": "D" }
                    ]
                },
                "11": { "element_id": 11, "parent_id": 10, "name": "B" },
                "12": { "element_id": 12, "parent_id": 11, "name": "C" },
                "13": { "element_id": 13, "parent_id": 10, "name": "D" }
            }
        });
        let table = ReleaseTable::parse(&payload, None).unwrap();
        let mut walked: Vec<i64> = table.walk().map(|(_, node)| node.element_id.get()).collect();
        walked.sort_unstable();
        assert_eq!(walked, vec![10, 11, 12, 13]);
        assert_eq!(table.iter().count(), 4);
    }

    #[test]
    fn test_release_id_fallback() {
        let payload = json!({ "elements": { "1": { "element_id": 1, "name": "A" } } });
        let table = ReleaseTable::parse(&payload, Some(ReleaseId::new(53))).unwrap();
        assert_eq!(table.release_id(), ReleaseId::new(53));
        assert_eq!(
            table.get(ElementId::new(1)).unwrap().release_id,
            ReleaseId::new(53)
        );
    }

    #[test]
    fn test_missing_release_id_fails() {
        let payload = json!({ "elements": { "1": { "element_id": 1 } } });
        let err = ReleaseTable::parse(&payload, None).unwrap_err();
        assert!(matches!(err, FredError::UpstreamShape(_)));
    }

    #[test]
    fn test_empty_elements_fail() {
        for payload in [
            json!({ "release_id": 1, "elements": {} }),
            json!({ "release_id": 1 }),
            json!({ "release_id": 1, "elements": [] }),
        ] {
            let err = ReleaseTable::parse(&payload, None).unwrap_err();
            assert!(matches!(err, FredError::UpstreamShape(_)));
        }
    }

    #[test]
    fn test_element_without_id_fails() {
        let payload = json!({ "release_id": 1, "elements": { "x": { "name": "No id" } } });
        let err = ReleaseTable::parse(&payload, None).unwrap_err();
        assert!(matches!(err, FredError::UpstreamShape(_)));
    }

    #[test]
    fn test_bad_level_is_conversion_error() {
        let payload = json!({
            "release_id": 1,
            "elements": { "1": { "element_id": 1, "name": "A", "level": "high" } }
        });
        let err = ReleaseTable::parse(&payload, None).unwrap_err();
        assert!(matches!(err, FredError::Conversion { .. }));
    }

    #[test]
    fn test_cycle_without_roots_fails() {
        let payload = json!({
            "release_id": 1,
            "elements": {
                "1": { "element_id": 1, "parent_id": 2, "name": "A" },
                "2": { "element_id": 2, "parent_id": 1, "name": "B" }
            }
        });
        let err = ReleaseTable::parse(&payload, None).unwrap_err();
        assert!(matches!(err, FredError::UpstreamShape(_)));
    }
}
