//! `jobdesk-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use validation::{FieldError, ValidationErrors};
