//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and domain services independent of
//! infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Click dispatch and the asynchronous click worker
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Click Processing Flow
//!
//! 1. The redirect service resolves a code
//! 2. A [`click_event::ClickEvent`] is handed to [`click_worker::dispatch_click`]
//! 3. [`click_worker::run_click_worker`] applies events with bounded concurrency
//! 4. Each event becomes one atomic [`repositories::LinkRepository::increment`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
