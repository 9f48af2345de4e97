//! Data Models
//!
//! This module contains the deserialized content-graph structures consumed
//! by the converter and the rich-text resolver:
//!
//! - `ContentItem` / `SystemInfo` - universal item model with metadata
//! - `Element` - closed tagged union over the ten element kinds
//! - `LinkedItemSet` - codename-keyed sibling lookup, owned by the response
//! - `ItemResponse` / `ItemsResponse` - delivery envelopes
//!
//! The graph is immutable once deserialized; all traversal context is passed
//! explicitly rather than stored on nodes.

mod element;
mod item;
mod response;
mod system;

pub use element::{
    AssetFile, Element, ElementKind, InlineImage, ItemLink, MultipleChoiceOption,
    RichTextContent, TaxonomyTerm,
};
pub use item::{ContentItem, LinkedItemSet};
pub use response::{ItemResponse, ItemsResponse, Pagination};
pub use system::SystemInfo;
