//! Cache key generators for consistent key naming.

use strata_core::{PageRequest, UserId};

/// Key for a single user.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("user:get:{}", id)
}

/// Key for one page of the user listing at a given list generation.
#[must_use]
pub fn user_list(generation: u64, page: PageRequest) -> String {
    format!("user:list:v{}:{}:{}", generation, page.page(), page.size())
}
