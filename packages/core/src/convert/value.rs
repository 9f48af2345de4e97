//! Converted Value Model
//!
//! Output side of the dynamic-to-static mapping. A conversion produces a
//! [`ConvertedItem`]: either a [`TypedObject`] populated through a registered
//! descriptor, or the original untyped [`ContentItem`] as identity fallback.
//! Outputs are built fresh per call and share nothing with the input graph
//! beyond cloned values.

use crate::models::{
    AssetFile, ContentItem, MultipleChoiceOption, SystemInfo, TaxonomyTerm,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A field value of a typed object, one variant per source element shape.
///
/// Rich-text fields hold the *resolved* markup string; list-valued variants
/// preserve wire order. Linked fields hold the recursively converted
/// referenced items.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<f64>),
    DateTime(Option<DateTime<Utc>>),
    MultipleChoice(Vec<MultipleChoiceOption>),
    Assets(Vec<AssetFile>),
    Taxonomy(Vec<TaxonomyTerm>),
    RichText(String),
    UrlSlug(String),
    Custom(String),
    Linked(Vec<ConvertedItem>),
}

impl FieldValue {
    /// String view of `Text`, `UrlSlug`, `Custom` and resolved `RichText`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value)
            | FieldValue::RichText(value)
            | FieldValue::UrlSlug(value)
            | FieldValue::Custom(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => *value,
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(value) => *value,
            _ => None,
        }
    }

    pub fn as_options(&self) -> Option<&[MultipleChoiceOption]> {
        match self {
            FieldValue::MultipleChoice(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_assets(&self) -> Option<&[AssetFile]> {
        match self {
            FieldValue::Assets(assets) => Some(assets),
            _ => None,
        }
    }

    pub fn as_taxonomy(&self) -> Option<&[TaxonomyTerm]> {
        match self {
            FieldValue::Taxonomy(terms) => Some(terms),
            _ => None,
        }
    }

    pub fn as_linked(&self) -> Option<&[ConvertedItem]> {
        match self {
            FieldValue::Linked(items) => Some(items),
            _ => None,
        }
    }
}

/// An instance of a registered target type.
///
/// Fields that matched no source element are simply absent from the map;
/// conversion never fails on an unmatched field.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedObject {
    /// Identity of the target application type
    pub type_name: String,

    /// Content type codename the descriptor was registered for
    pub content_type: String,

    /// System metadata of the source item
    pub system: SystemInfo,

    /// Populated fields keyed by target field identifier
    pub fields: BTreeMap<String, FieldValue>,
}

impl TypedObject {
    /// Look up a populated field by its target identifier
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// String view of a populated string-shaped field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name)?.as_str()
    }
}

/// Result of converting one content item.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedItem {
    /// Populated through a registered descriptor
    Typed(TypedObject),

    /// No descriptor registered (or conversion re-entered a cycle); the
    /// original item, unchanged
    Untyped(ContentItem),
}

impl ConvertedItem {
    /// System metadata regardless of variant
    pub fn system(&self) -> &SystemInfo {
        match self {
            ConvertedItem::Typed(object) => &object.system,
            ConvertedItem::Untyped(item) => &item.system,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, ConvertedItem::Typed(_))
    }

    pub fn as_typed(&self) -> Option<&TypedObject> {
        match self {
            ConvertedItem::Typed(object) => Some(object),
            ConvertedItem::Untyped(_) => None,
        }
    }

    pub fn as_untyped(&self) -> Option<&ContentItem> {
        match self {
            ConvertedItem::Typed(_) => None,
            ConvertedItem::Untyped(item) => Some(item),
        }
    }
}
