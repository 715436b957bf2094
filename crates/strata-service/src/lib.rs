//! # Strata Service
//!
//! The user service and its caching layer.
//!
//! ```text
//! caller
//!   ↓  Arc<dyn UserService>
//! CachedUserService ──► LayeredCache ──► LocalCache (moka, cost-bounded)
//!   ↓  on miss / mutation               └► RemoteCache (Redis, optional)
//! UserServiceImpl
//!   ↓
//! UserRepository
//! ```

pub mod bootstrap;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use user_service::*;
