//! Service Layer Error Types
//!
//! Errors a caller of the content service can get back. Only configuration
//! mistakes and caller contract violations are errors here — unresolvable
//! references inside the content graph always resolve to fallbacks (field
//! skipped, markup left verbatim, broken-link resolver) and never surface
//! through this type.

use crate::models::ElementKind;
use crate::registry::RegistryError;
use thiserror::Error;

/// Content service operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentServiceError {
    /// The addressed item carries no element under the codename
    #[error("item '{item}' has no element '{codename}'")]
    ElementNotFound { item: String, codename: String },

    /// The addressed element is not a rich-text element
    #[error("element '{codename}' on item '{item}' is {actual}, not rich_text")]
    NotRichText {
        item: String,
        codename: String,
        actual: ElementKind,
    },

    /// No descriptor registered for an explicitly requested target type
    #[error("no type descriptor registered for content type '{content_type}'")]
    UnknownContentType { content_type: String },

    /// Registration failed; see [`RegistryError`]
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
