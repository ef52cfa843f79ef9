//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code to destination URL mapping
//! - [`NewLink`] - Input for creating a link
//! - [`LinkTotals`] - Store-wide aggregate counts

pub mod link;

pub use link::{Link, LinkTotals, NewLink};
