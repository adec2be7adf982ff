//! Mapping store implementations.
//!
//! Concrete implementations of the domain repository traits.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Mapping storage and retrieval on PostgreSQL
//! - [`PgStatsRepository`] - Click counters and aggregate queries on PostgreSQL
//! - [`MemoryStore`] - Both traits over in-process maps

pub mod memory_store;
pub mod pg_link_repository;
pub mod pg_stats_repository;

pub use memory_store::MemoryStore;
pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
