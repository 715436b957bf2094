//! # Strata Repository
//!
//! Data access boundary for the user service:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! InMemoryUserRepository        (RwLock-guarded table, optimistic transactions)
//! ```
//!
//! Relational backends implement the same [`UserRepository`] and
//! [`UnitOfWork`] traits.

pub mod memory;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use traits::*;
