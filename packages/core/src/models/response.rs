//! Delivery Response Envelopes
//!
//! The delivery API wraps items in an envelope that also carries the
//! `modular_content` map — the linked-item set every item in the response
//! resolves its siblings through. The envelope is the ownership root of that
//! set. Pagination metadata is carried through untouched; paging logic lives
//! upstream.

use crate::models::item::{ContentItem, LinkedItemSet};
use serde::{Deserialize, Serialize};

/// Envelope of a single-item endpoint response.
///
/// # Examples
///
/// ```rust
/// use tessera_core::models::ItemResponse;
/// use serde_json::json;
///
/// let response: ItemResponse = serde_json::from_value(json!({
///     "item": {
///         "system": {
///             "id": "abc-123",
///             "name": "On Roasts",
///             "codename": "on_roasts",
///             "language": "en-US",
///             "type": "article",
///             "last_modified": "2019-09-18T10:58:38.917Z"
///         },
///         "elements": {}
///     },
///     "modular_content": {}
/// })).unwrap();
///
/// assert_eq!(response.item.system.codename, "on_roasts");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: ContentItem,

    /// Linked items included at the requested traversal depth
    #[serde(default, rename = "modular_content")]
    pub linked_items: LinkedItemSet,
}

/// Envelope of a multi-item endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<ContentItem>,

    /// Linked items included at the requested traversal depth
    #[serde(default, rename = "modular_content")]
    pub linked_items: LinkedItemSet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Paging metadata passed through from the wire; interpreting it is the
/// caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,

    #[serde(default)]
    pub limit: u64,

    #[serde(default)]
    pub count: u64,

    /// URL of the next page; empty when there is none
    #[serde(default)]
    pub next_page: String,
}
