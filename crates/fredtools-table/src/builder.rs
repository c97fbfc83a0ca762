//! Flattening of the raw `release/tables` payload.

use std::collections::{HashMap, HashSet};

use fredtools_types::{
    ElementId, FredError, ReleaseId, Result, SeriesId, coerce_field, scalar_text,
};
use serde_json::{Map, Value};

use crate::element::{Element, ElementKind};

/// Keys a stub entry may carry.
const STUB_KEYS: [&str; 2] = ["element_id", "children"];

/// Arena of elements keyed by identifier, filled while walking the payload.
#[derive(Debug)]
pub(crate) struct Builder {
    release_id: ReleaseId,
    elements: Vec<Element>,
    stubs: Vec<bool>,
    index: HashMap<ElementId, usize>,
}

impl Builder {
    pub(crate) fn new(release_id: ReleaseId) -> Self {
        Self {
            release_id,
            elements: Vec::new(),
            stubs: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Visits one raw element and, recursively, its nested children.
    /// Returns the arena slot of the element.
    pub(crate) fn visit(&mut self, raw: &Value) -> Result<usize> {
        let slot = self.materialize(raw)?;

        match raw.get("children") {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => {
                for child in children {
                    let child_slot = self.visit(child)?;
                    self.link(slot, child_slot);
                }
            }
            Some(other) => {
                return Err(FredError::UpstreamShape(format!(
                    "element children must be a list, got {other}"
                )));
            }
        }

        Ok(slot)
    }

    /// Links elements whose parent is in the table but never listed them.
    pub(crate) fn link_declared_parents(&mut self) {
        let attached = self.attached();
        for slot in 0..self.elements.len() {
            let element = &self.elements[slot];
            if attached.contains(&element.element_id) {
                continue;
            }
            let Some(parent_slot) = element
                .parent_id
                .and_then(|parent| self.index.get(&parent).copied())
            else {
                continue;
            };
            if !self.is_ancestor(slot, parent_slot) {
                self.link(parent_slot, slot);
            }
        }
    }

    /// Identifiers listed as somebody's child.
    pub(crate) fn attached(&self) -> HashSet<ElementId> {
        self.elements
            .iter()
            .flat_map(|element| element.children.iter().copied())
            .collect()
    }

    pub(crate) fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    pub(crate) fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn finish(self) -> (Vec<Element>, HashMap<ElementId, usize>) {
        (self.elements, self.index)
    }

    /// Returns the slot for `raw`, creating it or upgrading a stub in place.
    fn materialize(&mut self, raw: &Value) -> Result<usize> {
        let Value::Object(object) = raw else {
            return Err(FredError::UpstreamShape(format!(
                "release table element must be an object, got {raw}"
            )));
        };
        let element_id = coerce_field(raw, "element_id")?
            .map(ElementId::new)
            .ok_or_else(|| {
                FredError::UpstreamShape(format!("release table element has no element_id: {raw}"))
            })?;
        let stub = is_stub(object);

        if let Some(&slot) = self.index.get(&element_id) {
            if self.stubs[slot] && !stub {
                let mut upgraded = self.parse_fields(element_id, raw)?;
                let previous = &mut self.elements[slot];
                upgraded.children = std::mem::take(&mut previous.children);
                upgraded.parent_id = upgraded.parent_id.or(previous.parent_id);
                self.elements[slot] = upgraded;
                self.stubs[slot] = false;
            }
            return Ok(slot);
        }

        let element = if stub {
            Element::stub(element_id, self.release_id)
        } else {
            self.parse_fields(element_id, raw)?
        };
        let slot = self.elements.len();
        self.elements.push(element);
        self.stubs.push(stub);
        self.index.insert(element_id, slot);
        Ok(slot)
    }

    fn parse_fields(&self, element_id: ElementId, raw: &Value) -> Result<Element> {
        let text = |key: &str| raw.get(key).and_then(scalar_text);
        Ok(Element {
            element_id,
            release_id: coerce_field(raw, "release_id")?.map_or(self.release_id, ReleaseId::new),
            series_id: text("series_id")
                .filter(|id| !id.is_empty())
                .map(SeriesId::new),
            parent_id: coerce_field(raw, "parent_id")?.map(ElementId::new),
            line: text("line"),
            kind: text("type").map_or_else(ElementKind::default, |kind| ElementKind::from_raw(&kind)),
            name: text("name").unwrap_or_default(),
            level: coerce_field(raw, "level")?,
            observation_value: text("observation_value").filter(|v| !v.is_empty()),
            observation_date: text("observation_date").filter(|d| !d.is_empty()),
            children: Vec::new(),
        })
    }

    /// Appends `child` to `parent`, filling in the child's parent if absent.
    fn link(&mut self, parent: usize, child: usize) {
        if parent == child {
            return;
        }
        let parent_id = self.elements[parent].element_id;
        let child_id = self.elements[child].element_id;
        if self.elements[child].parent_id.is_none() {
            self.elements[child].parent_id = Some(parent_id);
        }
        self.elements[parent].add_child(child_id);
    }

    /// True if `slot` is `candidate` or one of its ancestors by `parent_id`.
    fn is_ancestor(&self, slot: usize, candidate: usize) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = Some(candidate);
        while let Some(current) = cursor {
            if current == slot {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            cursor = self.elements[current]
                .parent_id
                .and_then(|parent| self.index.get(&parent).copied());
        }
        false
    }
}

fn is_stub(object: &Map<String, Value>) -> bool {
    object.keys().all(|key| STUB_KEYS.contains(&key.as_str()))
}
