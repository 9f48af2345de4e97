//! Type Descriptors
//!
//! A `TypeDescriptor` is the statically-built description of one target
//! application type: which content type it maps, and how each constructible
//! field sources its value from the item's elements or linked items. The
//! table replaces runtime reflection — descriptors are written by hand (or
//! emitted by out-of-scope code generation) and consulted by the converter.
//!
//! Field-source matching: an explicit override wins; otherwise the field
//! identifier is case-folded to the snake_case codename convention. A field
//! whose candidate key matches nothing is simply left unset.

use crate::models::ElementKind;
use crate::utils::derive_codename;

/// How a linked-reference field determines the target type of each item it
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedTarget {
    /// Use each linked item's own system content type for registry lookup
    ItemType,

    /// Convert every resolved item as this declared content type, regardless
    /// of its own system type. Indexed by the registry for
    /// `lookup_by_field_owner`.
    Declared(String),
}

/// What a descriptor field maps from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Scalar/element mapping with the declared source shape
    Element(ElementKind),

    /// Reference field resolved through the linked-item set
    Linked(LinkedTarget),
}

/// One constructible field of a target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier on the target type
    pub name: String,

    /// Explicit source codename; overrides the derived key
    pub source: Option<String>,

    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Element-backed field with the declared source shape
    pub fn element(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            source: None,
            kind: FieldKind::Element(kind),
        }
    }

    /// Reference field; each resolved item is looked up by its own type
    pub fn linked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            kind: FieldKind::Linked(LinkedTarget::ItemType),
        }
    }

    /// Reference field with a declared target content type
    pub fn linked_as(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            kind: FieldKind::Linked(LinkedTarget::Declared(target_type.into())),
        }
    }

    /// Set an explicit source codename, overriding derivation
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The candidate source key: the override if configured, otherwise the
    /// field identifier case-folded to snake_case.
    pub fn source_codename(&self) -> String {
        match &self.source {
            Some(source) => source.clone(),
            None => derive_codename(&self.name),
        }
    }
}

/// Statically-built description of one target type.
///
/// # Examples
///
/// ```rust
/// use tessera_core::registry::TypeDescriptor;
/// use tessera_core::models::ElementKind;
///
/// let article = TypeDescriptor::builder("article", "Article")
///     .element("title", ElementKind::Text)
///     .element("post_date", ElementKind::DateTime)
///     .element_from("summary", ElementKind::Text, "metadata_summary")
///     .linked("related_articles")
///     .build();
///
/// assert_eq!(article.content_type, "article");
/// assert_eq!(article.fields.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Content type codename this descriptor maps (registry key)
    pub content_type: String,

    /// Identity of the target application type
    pub type_name: String,

    /// Constructible fields, in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Start building a descriptor for a content type
    pub fn builder(
        content_type: impl Into<String>,
        type_name: impl Into<String>,
    ) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            content_type: content_type.into(),
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Look up a field by its target identifier
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for [`TypeDescriptor`].
#[derive(Debug, Clone)]
pub struct TypeDescriptorBuilder {
    content_type: String,
    type_name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Add an element-backed field
    pub fn element(mut self, name: impl Into<String>, kind: ElementKind) -> Self {
        self.fields.push(FieldDescriptor::element(name, kind));
        self
    }

    /// Add an element-backed field with an explicit source codename
    pub fn element_from(
        mut self,
        name: impl Into<String>,
        kind: ElementKind,
        source: impl Into<String>,
    ) -> Self {
        self.fields
            .push(FieldDescriptor::element(name, kind).with_source(source));
        self
    }

    /// Add a reference field resolved by each item's own type
    pub fn linked(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::linked(name));
        self
    }

    /// Add a reference field with a declared target content type
    pub fn linked_as(
        mut self,
        name: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDescriptor::linked_as(name, target_type));
        self
    }

    /// Add a pre-built field descriptor
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish the descriptor. Structural validation happens at registration.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            content_type: self.content_type,
            type_name: self.type_name,
            fields: self.fields,
        }
    }
}
