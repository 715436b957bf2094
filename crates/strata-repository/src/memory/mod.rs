//! In-process repository backed by a lock-guarded table.

mod table;
mod unit_of_work;
mod user_repository;

pub use unit_of_work::InMemoryUnitOfWork;
pub use user_repository::InMemoryUserRepository;
