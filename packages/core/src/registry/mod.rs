//! Type Registry
//!
//! Maps content type codenames to target-type descriptors. Built once at
//! configuration time and read-only thereafter, so a populated registry can
//! be shared across concurrent conversions without locking.
//!
//! Registration is where configuration errors surface: duplicate
//! registrations and structurally uninstantiable descriptors are rejected
//! here, never during conversion.

mod descriptor;

pub use descriptor::{
    FieldDescriptor, FieldKind, LinkedTarget, TypeDescriptor, TypeDescriptorBuilder,
};

use crate::models::ElementKind;
use std::collections::HashMap;
use thiserror::Error;

/// Configuration errors reported at registration time.
///
/// Each error is fatal to the failing `register` call only; the registry
/// keeps all previously accepted descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A descriptor for this content type is already registered
    #[error("content type '{content_type}' is already registered")]
    DuplicateRegistration { content_type: String },

    /// Descriptor has an empty content type discriminant
    #[error("type descriptor '{type_name}' has an empty content type discriminant")]
    EmptyContentType { type_name: String },

    /// Descriptor has an empty target type name
    #[error("type descriptor for content type '{content_type}' has an empty type name")]
    EmptyTypeName { content_type: String },

    /// Descriptor declares no constructible fields
    #[error("type descriptor '{type_name}' declares no constructible fields")]
    NoFields { type_name: String },

    /// Two fields share one target identifier
    #[error("type descriptor '{type_name}' declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    /// A field's identifier (or derived source key) is empty
    #[error("type descriptor '{type_name}' has a field with an empty source codename")]
    EmptySource { type_name: String },

    /// An element-backed field declares the reference shape; references go
    /// through linked fields
    #[error("type descriptor '{type_name}' field '{field}' declares modular_content as an element mapping; use a linked field")]
    ReferenceShapeAsElement { type_name: String, field: String },
}

/// Registry of target-type descriptors keyed by content type codename.
///
/// A secondary index serves fields whose target type is fixed by the field
/// declaration rather than by each linked item's own system type.
///
/// # Examples
///
/// ```rust
/// use tessera_core::registry::{TypeDescriptor, TypeRegistry};
/// use tessera_core::models::ElementKind;
///
/// let mut registry = TypeRegistry::new();
/// registry
///     .register(
///         TypeDescriptor::builder("article", "Article")
///             .element("title", ElementKind::Text)
///             .build(),
///     )
///     .unwrap();
///
/// assert!(registry.lookup("article").is_some());
/// assert!(registry.lookup("coffee").is_none());
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    descriptors: HashMap<String, TypeDescriptor>,

    /// (owner content type, field name) -> declared target content type
    field_targets: HashMap<(String, String), String>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor for its content type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` for a duplicate registration or a
    /// structurally uninstantiable descriptor (empty discriminant or type
    /// name, no fields, duplicate or empty field identifiers). A rejected
    /// descriptor leaves the registry unchanged.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<(), RegistryError> {
        Self::validate(&descriptor)?;

        if self.descriptors.contains_key(&descriptor.content_type) {
            return Err(RegistryError::DuplicateRegistration {
                content_type: descriptor.content_type.clone(),
            });
        }

        for field in &descriptor.fields {
            if let FieldKind::Linked(LinkedTarget::Declared(target)) = &field.kind {
                self.field_targets.insert(
                    (descriptor.content_type.clone(), field.name.clone()),
                    target.clone(),
                );
            }
        }

        self.descriptors
            .insert(descriptor.content_type.clone(), descriptor);
        Ok(())
    }

    /// Look up the descriptor registered for a content type codename
    pub fn lookup(&self, content_type: &str) -> Option<&TypeDescriptor> {
        self.descriptors.get(content_type)
    }

    /// Look up the descriptor a field's declaration fixes as its target.
    ///
    /// Returns `None` when the field declares no explicit target (the
    /// item's own system type applies) or when the declared target type has
    /// no registered descriptor.
    pub fn lookup_by_field_owner(
        &self,
        owner_type: &str,
        field: &str,
    ) -> Option<&TypeDescriptor> {
        let target = self
            .field_targets
            .get(&(owner_type.to_string(), field.to_string()))?;
        self.descriptors.get(target)
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn validate(descriptor: &TypeDescriptor) -> Result<(), RegistryError> {
        if descriptor.content_type.is_empty() {
            return Err(RegistryError::EmptyContentType {
                type_name: descriptor.type_name.clone(),
            });
        }
        if descriptor.type_name.is_empty() {
            return Err(RegistryError::EmptyTypeName {
                content_type: descriptor.content_type.clone(),
            });
        }
        if descriptor.fields.is_empty() {
            return Err(RegistryError::NoFields {
                type_name: descriptor.type_name.clone(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for field in &descriptor.fields {
            if field.source_codename().is_empty() {
                return Err(RegistryError::EmptySource {
                    type_name: descriptor.type_name.clone(),
                });
            }
            if field.kind == FieldKind::Element(ElementKind::ModularContent) {
                return Err(RegistryError::ReferenceShapeAsElement {
                    type_name: descriptor.type_name.clone(),
                    field: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(RegistryError::DuplicateField {
                    type_name: descriptor.type_name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementKind;

    fn article_descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("article", "Article")
            .element("title", ElementKind::Text)
            .linked("related_articles")
            .build()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register(article_descriptor()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("article").unwrap().type_name, "Article");
        assert!(registry.lookup("unknown").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = TypeRegistry::new();
        registry.register(article_descriptor()).unwrap();

        let err = registry.register(article_descriptor()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRegistration {
                content_type: "article".to_string()
            }
        );
        // the first registration survives
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_content_type_rejected() {
        let mut registry = TypeRegistry::new();
        let descriptor = TypeDescriptor::builder("", "Article")
            .element("title", ElementKind::Text)
            .build();

        assert!(matches!(
            registry.register(descriptor),
            Err(RegistryError::EmptyContentType { .. })
        ));
    }

    #[test]
    fn test_descriptor_without_fields_rejected() {
        let mut registry = TypeRegistry::new();
        let descriptor = TypeDescriptor::builder("article", "Article").build();

        assert!(matches!(
            registry.register(descriptor),
            Err(RegistryError::NoFields { .. })
        ));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut registry = TypeRegistry::new();
        let descriptor = TypeDescriptor::builder("article", "Article")
            .element("title", ElementKind::Text)
            .element("title", ElementKind::UrlSlug)
            .build();

        assert!(matches!(
            registry.register(descriptor),
            Err(RegistryError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_reference_shape_as_element_rejected() {
        let mut registry = TypeRegistry::new();
        let descriptor = TypeDescriptor::builder("article", "Article")
            .element("related_articles", ElementKind::ModularContent)
            .build();

        assert!(matches!(
            registry.register(descriptor),
            Err(RegistryError::ReferenceShapeAsElement { .. })
        ));
    }

    #[test]
    fn test_rejected_descriptor_leaves_registry_unchanged() {
        let mut registry = TypeRegistry::new();
        let descriptor = TypeDescriptor::builder("article", "Article")
            .linked_as("teaser", "teaser_block")
            .linked_as("teaser", "other_block")
            .build();

        assert!(registry.register(descriptor).is_err());
        assert!(registry.is_empty());
        assert!(registry.lookup_by_field_owner("article", "teaser").is_none());
    }

    #[test]
    fn test_lookup_by_field_owner() {
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDescriptor::builder("article", "Article")
                    .linked_as("teaser", "teaser_block")
                    .build(),
            )
            .unwrap();
        registry
            .register(
                TypeDescriptor::builder("teaser_block", "TeaserBlock")
                    .element("headline", ElementKind::Text)
                    .build(),
            )
            .unwrap();

        let target = registry.lookup_by_field_owner("article", "teaser").unwrap();
        assert_eq!(target.type_name, "TeaserBlock");

        // fields without a declared target resolve by item type instead
        assert!(registry
            .lookup_by_field_owner("article", "related_articles")
            .is_none());
    }
}
