//! Repository trait definitions for the domain layer.
//!
//! The link store is an external collaborator. This module defines the
//! contract the application layer relies on; concrete stores live in
//! `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod link_repository;
pub mod store_error;

pub use link_repository::{Counter, LinkField, LinkRepository, OrderBy, SortDirection};
pub use store_error::StoreError;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
