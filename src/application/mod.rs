//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and expose the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link issuance and recent listings
//! - [`services::redirect_service::RedirectService`] - Code resolution and click dispatch
//! - [`services::stats_service::StatsService`] - Aggregate statistics

pub mod services;
