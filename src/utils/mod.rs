//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short ID generation and validation

pub mod code_generator;
