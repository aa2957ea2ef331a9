//! Immutable nested translation catalog

use std::collections::{
    BTreeMap,
    HashMap,
};

use serde_json::Value;
use thiserror::Error;

use crate::locale::Locale;

/// Errors raised while building a catalog from locale data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Locale data must be a JSON object at the top level
    #[error("Catalog root for '{locale}' must be a JSON object, found {found}")]
    RootNotObject { locale: Locale, found: &'static str },
}

/// A node of the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    Leaf(String),
    Branch(BTreeMap<String, CatalogNode>),
}

/// Outcome of walking a key path through one catalog.
///
/// An empty leaf is a legitimate [`Lookup::Found`]; only a missing path or a
/// path ending on a subtree counts as unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The path ends on a string leaf
    Found(&'a str),
    /// The path exists but ends on a subtree
    NotLeaf,
    /// Some segment is absent, empty, or descends into a leaf
    NotFound,
}

impl<'a> Lookup<'a> {
    /// The resolved leaf, if any.
    #[must_use]
    pub const fn found(self) -> Option<&'a str> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotLeaf | Self::NotFound => None,
        }
    }
}

/// Translation tree for a single locale.
///
/// Built once from a JSON document and shared behind an `Arc`; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCatalog {
    /// Locale the data was loaded for
    locale: Locale,
    /// Top-level entries
    root: BTreeMap<String, CatalogNode>,
}

impl TranslationCatalog {
    /// Build a catalog from a JSON object.
    ///
    /// Arrays become branches keyed by their stringified indices, numbers and
    /// booleans become leaves holding their JSON text, and `null` entries are
    /// dropped so that lookups fall through to the fallback catalog.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use property_i18n::catalog::TranslationCatalog;
    /// use property_i18n::Locale;
    ///
    /// let json = json!({ "nav": { "home": "Home" }, "features": ["Pool", "Garden"] });
    /// let catalog = TranslationCatalog::from_json(Locale::En, &json).unwrap();
    ///
    /// assert_eq!(catalog.lookup("nav.home", ".").found(), Some("Home"));
    /// assert_eq!(catalog.lookup("features.1", ".").found(), Some("Garden"));
    /// ```
    pub fn from_json(locale: Locale, json: &Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = json else {
            return Err(CatalogError::RootNotObject { locale, found: json_kind(json) });
        };

        let root = map
            .iter()
            .filter_map(|(key, value)| build_node(value).map(|node| (key.clone(), node)))
            .collect();

        Ok(Self { locale, root })
    }

    /// Catalog with no entries; every lookup is [`Lookup::NotFound`].
    #[must_use]
    pub const fn empty(locale: Locale) -> Self {
        Self { locale, root: BTreeMap::new() }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Walk `key`, split on `separator`, through the tree.
    #[must_use]
    pub fn lookup(&self, key: &str, separator: &str) -> Lookup<'_> {
        if key.is_empty() || separator.is_empty() {
            return Lookup::NotFound;
        }

        let mut branch = &self.root;
        let mut segments = key.split(separator).peekable();

        while let Some(segment) = segments.next() {
            if segment.is_empty() {
                return Lookup::NotFound;
            }
            let Some(node) = branch.get(segment) else {
                return Lookup::NotFound;
            };

            match (node, segments.peek().is_some()) {
                (CatalogNode::Branch(children), true) => branch = children,
                (CatalogNode::Leaf(_), true) => return Lookup::NotFound,
                (CatalogNode::Leaf(value), false) => return Lookup::Found(value),
                (CatalogNode::Branch(_), false) => return Lookup::NotLeaf,
            }
        }

        Lookup::NotFound
    }

    /// Number of string leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.values().map(count_leaves).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten the tree into a `separator`-joined key map
    /// (e.g. `"nav.home" -> "Home"`).
    #[must_use]
    pub fn flatten(&self, separator: &str) -> HashMap<String, String> {
        let mut result = HashMap::new();
        for (key, node) in &self.root {
            flatten_node(node, separator, key, &mut result);
        }
        result
    }
}

/// Convert one JSON value; `None` for `null`.
fn build_node(value: &Value) -> Option<CatalogNode> {
    match value {
        Value::Object(map) => Some(CatalogNode::Branch(
            map.iter()
                .filter_map(|(key, child)| build_node(child).map(|node| (key.clone(), node)))
                .collect(),
        )),
        Value::Array(items) => Some(CatalogNode::Branch(
            items
                .iter()
                .enumerate()
                .filter_map(|(index, child)| {
                    build_node(child).map(|node| (index.to_string(), node))
                })
                .collect(),
        )),
        Value::String(s) => Some(CatalogNode::Leaf(s.clone())),
        Value::Number(_) | Value::Bool(_) => Some(CatalogNode::Leaf(value.to_string())),
        Value::Null => None,
    }
}

/// Number of string leaves under `node`.
fn count_leaves(node: &CatalogNode) -> usize {
    match node {
        CatalogNode::Leaf(_) => 1,
        CatalogNode::Branch(children) => children.values().map(count_leaves).sum(),
    }
}

/// Insert every leaf under `node` into `result`, keyed by its full path.
fn flatten_node(
    node: &CatalogNode,
    separator: &str,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    match node {
        CatalogNode::Leaf(value) => {
            result.insert(prefix.to_string(), value.clone());
        }
        CatalogNode::Branch(children) => {
            for (key, child) in children {
                flatten_node(child, separator, &format!("{prefix}{separator}{key}"), result);
            }
        }
    }
}

/// JSON type name for error messages.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
