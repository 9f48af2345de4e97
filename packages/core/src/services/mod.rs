//! Business Services
//!
//! This module contains the public facade of the crate:
//!
//! - `ContentService` - type registration, item conversion and rich-text
//!   resolution behind one configured, shareable object
//! - `ContentServiceError` - caller-facing error type
//!
//! The service coordinates the registry, the converter and the rich-text
//! resolver; per-call traversal state stays inside each call.

mod content_service;
pub mod error;

pub use content_service::ContentService;
pub use error::ContentServiceError;
