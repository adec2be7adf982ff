//! Data Transfer Objects for API requests and responses.
//!
//! Wire names follow the public API (`shortID`, `originalURL`, ...), so field
//! renames live here and never leak into the domain types.

pub mod analytics;
pub mod health;
pub mod links;
pub mod pagination;
pub mod shorten;
