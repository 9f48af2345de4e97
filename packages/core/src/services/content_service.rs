//! Content Service
//!
//! The facade collaborators talk to: type registration, item conversion and
//! rich-text resolution behind one configured object. The service is built
//! once at setup — registry populated, resolver options attached — and is
//! read-only afterwards, so it can be shared across concurrent callers
//! without locking. Per-call traversal state never leaves the call.

use crate::convert::{ContentConverter, ConversionResult, TraversalState};
use crate::models::{ContentItem, ItemResponse, ItemsResponse, LinkedItemSet};
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::richtext::{RichTextOptions, RichTextResolver};
use crate::services::error::ContentServiceError;
use tracing::debug;

/// Typed conversion and rich-text resolution for one project's content.
///
/// # Examples
///
/// ```rust
/// use tessera_core::services::ContentService;
/// use tessera_core::registry::TypeDescriptor;
/// use tessera_core::richtext::RichTextOptions;
/// use tessera_core::models::ElementKind;
///
/// let mut service = ContentService::with_options(
///     RichTextOptions::new().with_broken_link_resolver(|_| "/404".to_string()),
/// );
///
/// service
///     .register_type(
///         TypeDescriptor::builder("article", "Article")
///             .element("title", ElementKind::Text)
///             .element("body", ElementKind::RichText)
///             .build(),
///     )
///     .unwrap();
/// ```
#[derive(Default)]
pub struct ContentService {
    registry: TypeRegistry,
    resolver: RichTextResolver,
}

impl ContentService {
    /// Service with default (pass-through) rich-text options
    pub fn new() -> Self {
        Self::default()
    }

    /// Service with the given rich-text resolution configuration
    pub fn with_options(options: RichTextOptions) -> Self {
        Self {
            registry: TypeRegistry::new(),
            resolver: RichTextResolver::new(options),
        }
    }

    /// Register a target-type descriptor.
    ///
    /// # Errors
    ///
    /// Configuration errors — duplicate registration, structurally
    /// uninstantiable descriptor — are rejected here and are fatal to this
    /// call only.
    pub fn register_type(
        &mut self,
        descriptor: TypeDescriptor,
    ) -> Result<(), ContentServiceError> {
        debug!(
            "registering type '{}' for content type '{}'",
            descriptor.type_name, descriptor.content_type
        );
        self.registry.register(descriptor)?;
        Ok(())
    }

    /// The populated registry
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Convert an item, selecting the target by its own system type.
    ///
    /// Unregistered types come back as the untouched input item. Rich-text
    /// fields of registered types are resolved before substitution.
    pub fn convert_item(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
    ) -> ConversionResult {
        self.converter().convert(item, linked_items)
    }

    /// Convert an item against an explicitly requested content type.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::UnknownContentType`] when no
    /// descriptor is registered for `content_type`.
    pub fn convert_item_as(
        &self,
        item: &ContentItem,
        linked_items: &LinkedItemSet,
        content_type: &str,
    ) -> Result<ConversionResult, ContentServiceError> {
        let descriptor = self.registry.lookup(content_type).ok_or_else(|| {
            ContentServiceError::UnknownContentType {
                content_type: content_type.to_string(),
            }
        })?;
        Ok(self.converter().convert_as(item, linked_items, descriptor))
    }

    /// Resolve one rich-text element of an item to its final markup.
    ///
    /// The visited set guarding inline expansion is scoped to this call and
    /// seeded with the item's own codename, so an element embedding its own
    /// item keeps the placeholder verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error when the element does not exist on the item or is
    /// not a rich-text element. Unresolvable links and placeholders inside
    /// the markup are not errors.
    pub fn resolve_rich_text(
        &self,
        item: &ContentItem,
        element_codename: &str,
        linked_items: &LinkedItemSet,
    ) -> Result<String, ContentServiceError> {
        let element = item.element(element_codename).ok_or_else(|| {
            ContentServiceError::ElementNotFound {
                item: item.system.codename.clone(),
                codename: element_codename.to_string(),
            }
        })?;

        let content = element
            .as_rich_text()
            .ok_or_else(|| ContentServiceError::NotRichText {
                item: item.system.codename.clone(),
                codename: element_codename.to_string(),
                actual: element.kind(),
            })?;

        debug!(
            "resolving rich text '{}' on item '{}'",
            element_codename, item.system.codename
        );

        let mut state = TraversalState::for_resolution(&item.system.codename);
        Ok(self
            .resolver
            .resolve_content(&content, linked_items, &self.converter(), &mut state))
    }

    /// Convert the item of a single-item response envelope
    pub fn convert_response(&self, response: &ItemResponse) -> ConversionResult {
        self.convert_item(&response.item, &response.linked_items)
    }

    /// Convert every item of a multi-item response envelope, in order
    pub fn convert_items_response(&self, response: &ItemsResponse) -> Vec<ConversionResult> {
        response
            .items
            .iter()
            .map(|item| self.convert_item(item, &response.linked_items))
            .collect()
    }

    fn converter(&self) -> ContentConverter<'_> {
        ContentConverter::new(&self.registry, &self.resolver)
    }
}

// Include tests
#[cfg(test)]
#[path = "content_service_test.rs"]
mod content_service_test;
