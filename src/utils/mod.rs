//! Utility functions for code generation, URL validation and store errors.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`destination`] - Destination URL validation
//! - [`db_error`] - SQLx error mapping

pub mod code_generator;
pub mod db_error;
pub mod destination;
