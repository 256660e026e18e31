//! Node capabilities and the ready-made `Node` record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Base capability every node of a hierarchy must provide.
///
/// `children` distinguishes an absent sequence (`None`) from an empty one.
/// `level` and `is_leaf` are derived values; they are recomputed by
/// [`flatten`](crate::domain::flatten) and never trusted from input.
pub trait HierarchyNode: Sized {
    fn id(&self) -> &str;

    /// Parent id, `None` when absent. Implementations map an empty id to `None`.
    fn parent_id(&self) -> Option<&str>;

    fn children(&self) -> Option<&Vec<Self>>;

    fn children_mut(&mut self) -> &mut Option<Vec<Self>>;

    fn level(&self) -> usize;

    fn set_level(&mut self, level: usize);

    fn is_leaf(&self) -> bool;

    fn set_leaf(&mut self, leaf: bool);

    /// Extended path capability, used only to compensate a missing parent.
    ///
    /// Returning `Some` claims the capability: both parts must then be non-empty.
    fn ancestry(&self) -> Option<Ancestry<'_>> {
        None
    }

    /// Detach the children, leaving the sequence absent.
    fn take_children(&mut self) -> Option<Vec<Self>> {
        self.children_mut().take()
    }

    /// Append a child, creating the sequence if absent.
    fn push_child(&mut self, child: Self) {
        self.children_mut().get_or_insert_with(Vec::new).push(child);
    }

    fn child_count(&self) -> usize {
        self.children().map_or(0, Vec::len)
    }
}

/// Full ancestor chain of a node, root first, joined by `delimiter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ancestry<'a> {
    pub path: &'a str,
    pub delimiter: &'a str,
}

impl<'a> Ancestry<'a> {
    pub fn new(path: &'a str, delimiter: &'a str) -> Self {
        Self { path, delimiter }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.path.split(self.delimiter)
    }

    /// Position of the first token equal to `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tokens().position(|token| token == id)
    }

    /// The ancestor recorded two positions above `id`, skipping its direct parent.
    pub fn grandparent_of(&self, id: &str) -> Option<&'a str> {
        let position = self.position_of(id)?;
        if position < 2 {
            return None;
        }
        self.tokens().nth(position - 2)
    }
}

/// Generic hierarchy record with pass-through attributes.
///
/// Serialized with camelCase field names; unknown fields are kept in
/// `attributes` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_delimiter: Option<String>,
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: usize,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_leaf: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>, delimiter: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self.split_delimiter = Some(delimiter.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Fill in `delimiter` for nodes that carry a path without one.
    pub fn default_delimiter(&mut self, delimiter: &str) {
        if self.path.is_some() && self.split_delimiter.is_none() {
            self.split_delimiter = Some(delimiter.to_string());
        }
    }
}

impl HierarchyNode for Node {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }

    fn children(&self) -> Option<&Vec<Self>> {
        self.children.as_ref()
    }

    fn children_mut(&mut self) -> &mut Option<Vec<Self>> {
        &mut self.children
    }

    fn level(&self) -> usize {
        self.level
    }

    fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    fn set_leaf(&mut self, leaf: bool) {
        self.is_leaf = leaf;
    }

    fn ancestry(&self) -> Option<Ancestry<'_>> {
        if self.path.is_none() && self.split_delimiter.is_none() {
            return None;
        }
        Some(Ancestry::new(
            self.path.as_deref().unwrap_or_default(),
            self.split_delimiter.as_deref().unwrap_or_default(),
        ))
    }
}

/// Derived `level` from input: null, negative or non-numeric values become 0.
fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_default())
}

/// Derived `isLeaf` from input: anything but a boolean becomes `false`.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool).unwrap_or_default())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
