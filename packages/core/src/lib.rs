//! Tessera Content Delivery Core
//!
//! This crate turns the dynamically-typed content graph delivered by a
//! headless CMS into statically declared application objects, and resolves
//! rich-text markup that embeds references to other items of that graph.
//!
//! # Architecture
//!
//! - **Closed element model**: the ten element kinds form a tagged union
//!   matched exhaustively — no runtime type sniffing
//! - **Descriptor tables instead of reflection**: target types are described
//!   by statically-built descriptors consulted at conversion time
//! - **Explicit traversal context**: linked-item scope and cycle guards are
//!   passed into every recursive call; graph nodes store no back-references
//! - **Best-effort conversion**: unmatched fields stay unset, items outside
//!   the response's traversal depth are skipped, unresolvable markup is left
//!   verbatim — the graph legitimately omits what was not requested
//!
//! # Modules
//!
//! - [`models`] - deserialized content graph (items, elements, responses)
//! - [`registry`] - target-type descriptors and their registry
//! - [`convert`] - strongly-typed converter and converted-value model
//! - [`richtext`] - rich-text resolution (links, processors, inline items)
//! - [`services`] - the `ContentService` facade
//! - [`utils`] - codename derivation

pub mod convert;
pub mod models;
pub mod registry;
pub mod richtext;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use convert::{ContentConverter, ConversionResult, ConvertedItem, FieldError, FieldValue, TypedObject};
pub use models::*;
pub use registry::{
    FieldDescriptor, FieldKind, LinkedTarget, RegistryError, TypeDescriptor, TypeRegistry,
};
pub use richtext::{
    BrokenLinkContext, InlineItemRenderer, ItemLinkContext, RichTextOptions, RichTextResolver,
};
pub use services::{ContentService, ContentServiceError};
pub use utils::derive_codename;
