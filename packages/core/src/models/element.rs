//! Element Value Model
//!
//! A content item's `elements` map carries polymorphic values discriminated
//! on the wire by a `"type"` string. This module models that closed set as a
//! tagged union matched exhaustively, so adding an element kind is a
//! compile-time exercise rather than a runtime type check.
//!
//! Wire discriminants: `text`, `rich_text`, `number`, `multiple_choice`,
//! `date_time`, `asset`, `modular_content`, `taxonomy`, `url_slug`, `custom`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single option of a multiple-choice element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceOption {
    pub name: String,
    pub codename: String,
}

/// A file attached to an asset element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFile {
    pub name: String,

    /// MIME type of the asset
    #[serde(rename = "type")]
    pub content_type: String,

    /// Size in bytes; absent for legacy assets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A taxonomy term; terms nest recursively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub name: String,
    pub codename: String,

    /// Child terms; empty for leaf terms
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<TaxonomyTerm>,
}

/// An image referenced from rich-text markup, keyed by image id in the
/// element's `images` side table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineImage {
    pub image_id: String,

    #[serde(default)]
    pub description: Option<String>,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A content-item link referenced from rich-text markup, keyed by item id in
/// the element's `links` side table.
///
/// The table only ever contains entries actually referenced from the markup;
/// an anchor whose id is missing here points at an item that is not
/// resolvable in the current response (e.g. unpublished).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLink {
    /// Content type codename of the linked item
    #[serde(rename = "type")]
    pub content_type: String,

    pub codename: String,

    #[serde(default)]
    pub url_slug: String,
}

/// Borrowed view of a rich-text element's value and side tables.
///
/// Rich text is the only element kind that carries parallel lookup tables
/// next to its raw value, so resolution code takes this view instead of
/// destructuring the variant at every call site.
#[derive(Debug, Clone, Copy)]
pub struct RichTextContent<'a> {
    /// Raw markup as delivered
    pub value: &'a str,

    /// Inline images keyed by image id
    pub images: &'a HashMap<String, InlineImage>,

    /// Link metadata keyed by item id
    pub links: &'a HashMap<String, ItemLink>,

    /// Codenames of items embedded in or linked from the markup, in order
    pub linked_item_codenames: &'a [String],
}

/// Discriminant of an [`Element`] variant.
///
/// Used by type descriptors to declare the expected shape of a source
/// element and by coercion errors to report the actual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    RichText,
    Number,
    MultipleChoice,
    DateTime,
    Asset,
    ModularContent,
    Taxonomy,
    UrlSlug,
    Custom,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Text => "text",
            ElementKind::RichText => "rich_text",
            ElementKind::Number => "number",
            ElementKind::MultipleChoice => "multiple_choice",
            ElementKind::DateTime => "date_time",
            ElementKind::Asset => "asset",
            ElementKind::ModularContent => "modular_content",
            ElementKind::Taxonomy => "taxonomy",
            ElementKind::UrlSlug => "url_slug",
            ElementKind::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// A content element value, discriminated by the wire `"type"` field.
///
/// Every variant carries the element's display `name` and optional
/// `codename` alongside its variant-specific value. Values that can be null
/// on the wire (`number`, `date_time`) are optional; list-valued elements
/// preserve wire order.
///
/// # Examples
///
/// ```rust
/// use tessera_core::models::Element;
/// use serde_json::json;
///
/// let element: Element = serde_json::from_value(json!({
///     "type": "text",
///     "name": "Title",
///     "codename": "title",
///     "value": "On Roasts"
/// })).unwrap();
///
/// assert!(matches!(element, Element::Text { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Text {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: String,
    },

    RichText {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: String,
        #[serde(default)]
        images: HashMap<String, InlineImage>,
        #[serde(default)]
        links: HashMap<String, ItemLink>,
        /// Codenames of embedded/linked items, wire field `modular_content`
        #[serde(default, rename = "modular_content")]
        linked_item_codenames: Vec<String>,
    },

    Number {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: Option<f64>,
    },

    MultipleChoice {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: Vec<MultipleChoiceOption>,
    },

    DateTime {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: Option<DateTime<Utc>>,
    },

    Asset {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: Vec<AssetFile>,
    },

    /// Linked-items element: an ordered list of referenced item codenames
    ModularContent {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: Vec<String>,
    },

    Taxonomy {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: Vec<TaxonomyTerm>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        taxonomy_group: Option<String>,
    },

    UrlSlug {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: String,
    },

    Custom {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        codename: Option<String>,
        #[serde(default)]
        value: String,
    },
}

impl Element {
    /// Display name of the element
    pub fn name(&self) -> &str {
        match self {
            Element::Text { name, .. }
            | Element::RichText { name, .. }
            | Element::Number { name, .. }
            | Element::MultipleChoice { name, .. }
            | Element::DateTime { name, .. }
            | Element::Asset { name, .. }
            | Element::ModularContent { name, .. }
            | Element::Taxonomy { name, .. }
            | Element::UrlSlug { name, .. }
            | Element::Custom { name, .. } => name,
        }
    }

    /// Codename of the element, when delivered
    pub fn codename(&self) -> Option<&str> {
        match self {
            Element::Text { codename, .. }
            | Element::RichText { codename, .. }
            | Element::Number { codename, .. }
            | Element::MultipleChoice { codename, .. }
            | Element::DateTime { codename, .. }
            | Element::Asset { codename, .. }
            | Element::ModularContent { codename, .. }
            | Element::Taxonomy { codename, .. }
            | Element::UrlSlug { codename, .. }
            | Element::Custom { codename, .. } => codename.as_deref(),
        }
    }

    /// Variant discriminant
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text { .. } => ElementKind::Text,
            Element::RichText { .. } => ElementKind::RichText,
            Element::Number { .. } => ElementKind::Number,
            Element::MultipleChoice { .. } => ElementKind::MultipleChoice,
            Element::DateTime { .. } => ElementKind::DateTime,
            Element::Asset { .. } => ElementKind::Asset,
            Element::ModularContent { .. } => ElementKind::ModularContent,
            Element::Taxonomy { .. } => ElementKind::Taxonomy,
            Element::UrlSlug { .. } => ElementKind::UrlSlug,
            Element::Custom { .. } => ElementKind::Custom,
        }
    }

    /// Borrowed view of a rich-text element's value and side tables.
    ///
    /// Returns `None` for any other element kind.
    pub fn as_rich_text(&self) -> Option<RichTextContent<'_>> {
        match self {
            Element::RichText {
                value,
                images,
                links,
                linked_item_codenames,
                ..
            } => Some(RichTextContent {
                value,
                images,
                links,
                linked_item_codenames,
            }),
            _ => None,
        }
    }
}
