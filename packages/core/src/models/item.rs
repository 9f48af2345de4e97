//! Content Item and Linked-Item Set
//!
//! `ContentItem` is the universal node of the content graph: system metadata
//! plus a codename-keyed map of polymorphic element values. `LinkedItemSet`
//! is the lookup-only sibling relation scoped to one delivery response —
//! items never own each other; the response envelope owns the set.

use crate::models::element::{
    AssetFile, Element, MultipleChoiceOption, RichTextContent, TaxonomyTerm,
};
use crate::models::system::SystemInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single content item as delivered.
///
/// The `elements` map is keyed by the unique, case-preserving element
/// codenames declared by the item's content type; map order carries no
/// meaning. The whole structure is immutable once deserialized — conversion
/// and rich-text resolution only read it and build independent outputs.
///
/// # Examples
///
/// ```rust
/// use tessera_core::models::ContentItem;
/// use serde_json::json;
///
/// let item: ContentItem = serde_json::from_value(json!({
///     "system": {
///         "id": "abc-123",
///         "name": "On Roasts",
///         "codename": "on_roasts",
///         "language": "en-US",
///         "type": "article",
///         "last_modified": "2019-09-18T10:58:38.917Z"
///     },
///     "elements": {
///         "title": {"type": "text", "name": "Title", "value": "On Roasts"}
///     }
/// })).unwrap();
///
/// assert_eq!(item.string_value("title"), Some("On Roasts"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub system: SystemInfo,

    #[serde(default)]
    pub elements: HashMap<String, Element>,
}

impl ContentItem {
    /// Look up an element by codename
    pub fn element(&self, codename: &str) -> Option<&Element> {
        self.elements.get(codename)
    }

    /// String value of a `text`, `url_slug` or `custom` element
    pub fn string_value(&self, codename: &str) -> Option<&str> {
        match self.element(codename)? {
            Element::Text { value, .. }
            | Element::UrlSlug { value, .. }
            | Element::Custom { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Value of a `number` element; `None` for other kinds or a null value
    pub fn number_value(&self, codename: &str) -> Option<f64> {
        match self.element(codename)? {
            Element::Number { value, .. } => *value,
            _ => None,
        }
    }

    /// Value of a `date_time` element; `None` for other kinds or a null value
    pub fn date_time_value(&self, codename: &str) -> Option<DateTime<Utc>> {
        match self.element(codename)? {
            Element::DateTime { value, .. } => *value,
            _ => None,
        }
    }

    /// Options of a `multiple_choice` element, in wire order
    pub fn options(&self, codename: &str) -> Option<&[MultipleChoiceOption]> {
        match self.element(codename)? {
            Element::MultipleChoice { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Files of an `asset` element, in wire order
    pub fn assets(&self, codename: &str) -> Option<&[AssetFile]> {
        match self.element(codename)? {
            Element::Asset { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Terms of a `taxonomy` element, in wire order
    pub fn taxonomy(&self, codename: &str) -> Option<&[TaxonomyTerm]> {
        match self.element(codename)? {
            Element::Taxonomy { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Referenced codenames of a `modular_content` element, in wire order
    pub fn linked_item_codenames(&self, codename: &str) -> Option<&[String]> {
        match self.element(codename)? {
            Element::ModularContent { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Raw value and side tables of a `rich_text` element
    pub fn rich_text(&self, codename: &str) -> Option<RichTextContent<'_>> {
        self.element(codename)?.as_rich_text()
    }
}

/// Codename-keyed siblings of one delivery response.
///
/// Lookups are total for codenames that were included at the requested
/// traversal depth; a missing codename means "not included in this
/// response", never "does not exist". The set is a weak relation — callers
/// pass it explicitly into every traversal instead of wiring nodes to it.
///
/// # Examples
///
/// ```rust
/// use tessera_core::models::LinkedItemSet;
///
/// let set = LinkedItemSet::new();
/// assert!(set.get("anything").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkedItemSet {
    items: HashMap<String, ContentItem>,
}

impl LinkedItemSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an item by codename
    pub fn get(&self, codename: &str) -> Option<&ContentItem> {
        self.items.get(codename)
    }

    /// Whether the set contains the codename
    pub fn contains(&self, codename: &str) -> bool {
        self.items.contains_key(codename)
    }

    /// Number of items in the set
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(codename, item)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContentItem)> {
        self.items.iter()
    }

    /// Add an item under a codename.
    ///
    /// Intended for upstream deserializers and test fixtures; the set is
    /// read-only once handed to conversion or resolution.
    pub fn insert(&mut self, codename: String, item: ContentItem) {
        self.items.insert(codename, item);
    }
}

impl FromIterator<(String, ContentItem)> for LinkedItemSet {
    fn from_iter<T: IntoIterator<Item = (String, ContentItem)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
