//! Strongly-Typed Content Conversion
//!
//! Maps a dynamically-typed content item onto a registered target type,
//! recursing into linked references through the registry. Conversion is best
//! effort: unmatched fields stay unset, linked items missing from the
//! response scope are skipped, shape mismatches are collected per field, and
//! an unregistered item falls back to itself untouched. Once a descriptor
//! passes registration, conversion cannot fail.
//!
//! All traversal context lives in a per-call [`TraversalState`] passed down
//! explicitly; nothing is stored on the graph and no state outlives the
//! top-level call.

mod value;

pub use value::{ConvertedItem, FieldValue, TypedObject};

use crate::models::{ContentItem, Element, ElementKind, LinkedItemSet, RichTextContent};
use crate::registry::{FieldDescriptor, FieldKind, LinkedTarget, TypeDescriptor, TypeRegistry};
use crate::richtext::RichTextResolver;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::{debug, trace};

/// A per-field coercion error: the descriptor declared one element shape,
/// the delivered element has another.
///
/// Field errors never abort conversion; sibling fields are still populated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}': expected {expected} element at '{source_codename}', found {actual}")]
pub struct FieldError {
    pub field: String,
    pub source_codename: String,
    pub expected: ElementKind,
    pub actual: ElementKind,
}

/// Outcome of one top-level conversion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub item: ConvertedItem,

    /// Shape mismatches collected across the whole recursive conversion
    pub field_errors: Vec<FieldError>,
}

/// Per-call traversal context, created at each public entry point and
/// threaded through every recursive descent of that call.
pub(crate) struct TraversalState {
    /// Codenames currently on the conversion stack; a linked reference back
    /// into this set converts to `Untyped` instead of recursing
    converting: HashSet<String>,

    /// Inline-expansion guard of the active rich-text resolution; `Some`
    /// only while a top-level resolution is in flight
    visited: Option<HashSet<String>>,

    field_errors: Vec<FieldError>,
}

impl TraversalState {
    pub(crate) fn new() -> Self {
        Self {
            converting: HashSet::new(),
            visited: None,
            field_errors: Vec::new(),
        }
    }

    /// State for a top-level rich-text resolution, seeded with the codename
    /// of the item whose element is being resolved.
    pub(crate) fn for_resolution(owner_codename: &str) -> Self {
        Self {
            converting: HashSet::new(),
            visited: Some(HashSet::from([owner_codename.to_string()])),
            field_errors: Vec::new(),
        }
    }

    pub(crate) fn already_visited(&self, codename: &str) -> bool {
        self.visited
            .as_ref()
            .is_some_and(|visited| visited.contains(codename))
    }

    pub(crate) fn visit(&mut self, codename: &str) {
        if let Some(visited) = self.visited.as_mut() {
            visited.insert(codename.to_string());
        }
    }
}

/// The strongly-typed content converter.
///
/// Borrows the registry and the rich-text resolver for the duration of a
/// call; both are read-only, so one converter can serve any number of
/// sequential conversions and the underlying service can be shared across
/// threads.
///
/// # Examples
///
/// ```rust
/// use tessera_core::convert::ContentConverter;
/// use tessera_core::models::{ContentItem, LinkedItemSet};
/// use tessera_core::registry::TypeRegistry;
/// use tessera_core::richtext::RichTextResolver;
/// use serde_json::json;
///
/// let registry = TypeRegistry::new();
/// let resolver = RichTextResolver::default();
/// let converter = ContentConverter::new(&registry, &resolver);
///
/// let item: ContentItem = serde_json::from_value(json!({
///     "system": {
///         "id": "x", "name": "X", "codename": "x", "language": "en-US",
///         "type": "unregistered", "last_modified": "2020-01-01T00:00:00Z"
///     },
///     "elements": {}
/// })).unwrap();
///
/// // no descriptor registered: identity fallback
/// let result = converter.convert(&item, &LinkedItemSet::new());
/// assert_eq!(result.item.as_untyped(), Some(&item));
/// ```
pub struct ContentConverter<'a> {
    registry: &'a TypeRegistry,
    resolver: &'a RichTextResolver,
}

impl<'a> ContentConverter<'a> {
    pub fn new(registry: &'a TypeRegistry, resolver: &'a RichTextResolver) -> Self {
        Self { registry, resolver }
    }

    /// Convert with the target selected by the item's own system type
    /// (wildcard path). Unregistered types come back untouched.
    pub fn convert(&self, item: &ContentItem, linked_items: &LinkedItemSet) -> ConversionResult {
        let mut state = TraversalState::new();
        let converted = self.convert_with_state(item, linked_items, &mut state);
        ConversionResult {
            item: converted,
            field_errors: state.field_errors,
        }
    }

    /// Convert against an explicit target descriptor.
    pub fn convert_as(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
        descriptor: &TypeDescriptor,
    ) -> ConversionResult {
        let mut state = TraversalState::new();
        let object = self.convert_descriptor(item, linked_items, descriptor, &mut state);
        ConversionResult {
            item: ConvertedItem::Typed(object),
            field_errors: state.field_errors,
        }
    }

    /// Wildcard conversion inside an ongoing traversal (used by inline-item
    /// expansion, which shares the call's state).
    pub(crate) fn convert_with_state(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
        state: &mut TraversalState,
    ) -> ConvertedItem {
        match self.registry.lookup(&item.system.content_type) {
            Some(descriptor) => ConvertedItem::Typed(self.convert_descriptor(
                item,
                linked_items,
                descriptor,
                state,
            )),
            None => {
                trace!(
                    "no descriptor for content type '{}', keeping item '{}' untyped",
                    item.system.content_type,
                    item.system.codename
                );
                ConvertedItem::Untyped(item.clone())
            }
        }
    }

    fn convert_descriptor(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
        descriptor: &TypeDescriptor,
        state: &mut TraversalState,
    ) -> TypedObject {
        // insert returns false on re-entry; only the frame that opened the
        // codename closes it
        let opened = state.converting.insert(item.system.codename.clone());

        let mut fields = BTreeMap::new();
        for field in &descriptor.fields {
            let source = field.source_codename();
            let value = match &field.kind {
                FieldKind::Element(expected) => {
                    self.convert_element_field(item, linked_items, field, *expected, &source, state)
                }
                FieldKind::Linked(target) => self.convert_linked_field(
                    item,
                    linked_items,
                    descriptor,
                    field,
                    target,
                    &source,
                    state,
                ),
            };
            if let Some(value) = value {
                fields.insert(field.name.clone(), value);
            }
        }

        if opened {
            state.converting.remove(&item.system.codename);
        }

        TypedObject {
            type_name: descriptor.type_name.clone(),
            content_type: descriptor.content_type.clone(),
            system: item.system.clone(),
            fields,
        }
    }

    fn convert_element_field(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
        field: &FieldDescriptor,
        expected: ElementKind,
        source: &str,
        state: &mut TraversalState,
    ) -> Option<FieldValue> {
        // unmatched source: field stays unset
        let element = item.element(source)?;

        match (expected, element) {
            (ElementKind::Text, Element::Text { value, .. }) => {
                Some(FieldValue::Text(value.clone()))
            }
            (ElementKind::RichText, Element::RichText { .. }) => {
                let content = element.as_rich_text()?;
                Some(FieldValue::RichText(self.resolve_rich_text_field(
                    item,
                    content,
                    linked_items,
                    state,
                )))
            }
            (ElementKind::Number, Element::Number { value, .. }) => {
                Some(FieldValue::Number(*value))
            }
            (ElementKind::DateTime, Element::DateTime { value, .. }) => {
                Some(FieldValue::DateTime(*value))
            }
            (ElementKind::MultipleChoice, Element::MultipleChoice { value, .. }) => {
                Some(FieldValue::MultipleChoice(value.clone()))
            }
            (ElementKind::Asset, Element::Asset { value, .. }) => {
                Some(FieldValue::Assets(value.clone()))
            }
            (ElementKind::Taxonomy, Element::Taxonomy { value, .. }) => {
                Some(FieldValue::Taxonomy(value.clone()))
            }
            (ElementKind::UrlSlug, Element::UrlSlug { value, .. }) => {
                Some(FieldValue::UrlSlug(value.clone()))
            }
            (ElementKind::Custom, Element::Custom { value, .. }) => {
                Some(FieldValue::Custom(value.clone()))
            }
            (expected, actual) => {
                state.field_errors.push(FieldError {
                    field: field.name.clone(),
                    source_codename: source.to_string(),
                    expected,
                    actual: actual.kind(),
                });
                None
            }
        }
    }

    fn convert_linked_field(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
        owner: &TypeDescriptor,
        field: &FieldDescriptor,
        target: &LinkedTarget,
        source: &str,
        state: &mut TraversalState,
    ) -> Option<FieldValue> {
        let element = item.element(source)?;

        let codenames = match element {
            Element::ModularContent { value, .. } => value,
            other => {
                state.field_errors.push(FieldError {
                    field: field.name.clone(),
                    source_codename: source.to_string(),
                    expected: ElementKind::ModularContent,
                    actual: other.kind(),
                });
                return None;
            }
        };

        let mut converted = Vec::with_capacity(codenames.len());
        for codename in codenames {
            let Some(referenced) = linked_items.get(codename) else {
                // not included at the requested traversal depth
                trace!("linked item '{}' not in response scope, skipping", codename);
                continue;
            };

            if state.converting.contains(codename.as_str()) {
                debug!(
                    "cyclic linked reference to '{}', keeping it untyped",
                    codename
                );
                converted.push(ConvertedItem::Untyped(referenced.clone()));
                continue;
            }

            let descriptor = match target {
                LinkedTarget::Declared(_) => {
                    self.registry.lookup_by_field_owner(&owner.content_type, &field.name)
                }
                LinkedTarget::ItemType => self.registry.lookup(&referenced.system.content_type),
            };

            match descriptor {
                Some(descriptor) => converted.push(ConvertedItem::Typed(
                    self.convert_descriptor(referenced, linked_items, descriptor, state),
                )),
                None => converted.push(ConvertedItem::Untyped(referenced.clone())),
            }
        }

        Some(FieldValue::Linked(converted))
    }

    /// Resolve a rich-text element encountered during conversion.
    ///
    /// Inside an active resolution the call's visited set is shared; at the
    /// top level each rich-text field opens its own resolution scope, so
    /// sibling fields never interfere with each other.
    fn resolve_rich_text_field(
        &self,
        item: &ContentItem,
        content: RichTextContent<'_>,
        linked_items: &LinkedItemSet,
        state: &mut TraversalState,
    ) -> String {
        if state.visited.is_some() {
            self.resolver
                .resolve_content(&content, linked_items, self, state)
        } else {
            state.visited = Some(HashSet::from([item.system.codename.clone()]));
            let resolved = self
                .resolver
                .resolve_content(&content, linked_items, self, state);
            state.visited = None;
            resolved
        }
    }
}
