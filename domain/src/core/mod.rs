//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the closed allow-list of generation models
//! - [`model::ModelConfig`]: per-request generation settings
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
