//! Utility Functions
//!
//! Small pure helpers shared across the crate.

mod codename;

pub use codename::derive_codename;
