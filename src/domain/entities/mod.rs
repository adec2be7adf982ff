//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation input
//! is kept in a separate `New*` struct, following the "New Type" pattern.
//!
//! # Entity Types
//!
//! - [`UrlMapping`] - A short ID mapped to its original URL, with click count
//! - [`NewUrlMapping`] - Input for inserting a mapping

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
