//! # Strata Core
//!
//! Core types, error definitions, and the domain model shared by every
//! Strata crate: the unified error taxonomy, typed identifiers, pagination,
//! the `User` entity, request validation helpers, and tracing bootstrap.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
