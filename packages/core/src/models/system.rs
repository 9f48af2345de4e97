//! Item System Metadata
//!
//! Every delivered content item carries a `system` object holding its
//! identity and delivery metadata. The fields mirror the delivery API wire
//! format exactly; the struct is read-only after deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and metadata of a content item.
///
/// `codename` is the stable machine-readable identifier used for linked-item
/// lookups and inline-embed placeholders; `id` is the opaque identifier used
/// inside rich-text link markup. The two live in separate namespaces.
///
/// # Examples
///
/// ```rust
/// use tessera_core::models::SystemInfo;
/// use serde_json::json;
///
/// let system: SystemInfo = serde_json::from_value(json!({
///     "id": "f4b3fc05-e988-4dae-9ac1-a94aba566474",
///     "name": "On Roasts",
///     "codename": "on_roasts",
///     "language": "en-US",
///     "type": "article",
///     "collection": "default",
///     "sitemap_locations": ["articles"],
///     "last_modified": "2019-09-18T10:58:38.917Z",
///     "workflow_step": "published"
/// })).unwrap();
///
/// assert_eq!(system.codename, "on_roasts");
/// assert_eq!(system.content_type, "article");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Opaque item identifier (referenced by rich-text link markup)
    pub id: String,

    /// Display name of the item
    pub name: String,

    /// Stable machine-readable identifier of the item
    pub codename: String,

    /// Language variant codename (e.g. "en-US")
    pub language: String,

    /// Codename of the item's content type; drives registry lookup
    #[serde(rename = "type")]
    pub content_type: String,

    /// Collection the item belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Ordered sitemap locations; absent on the wire means empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sitemap_locations: Vec<String>,

    /// Timestamp of the last modification
    pub last_modified: DateTime<Utc>,

    /// Current workflow step codename.
    ///
    /// Absent for component items, which have no workflow of their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_step: Option<String>,
}
