//! Domain layer containing business entities and logic.
//!
//! This module defines entities, repository interfaces, and the click
//! pipeline independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! # Click Processing Flow
//!
//! 1. [`crate::application::services::LinkService::resolve`] finds the mapping
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel without waiting
//! 3. [`click_worker::run_click_worker`] applies the increment with retry logic
//! 4. The counter is bumped atomically via [`repositories::StatsRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
