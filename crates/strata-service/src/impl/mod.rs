//! Service implementations.

mod cached_user_service;
mod user_service_impl;

pub use cached_user_service::CachedUserService;
pub use user_service_impl::UserServiceImpl;
