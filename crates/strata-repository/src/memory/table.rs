//! Row storage shared by the repository and its units of work.

use std::collections::HashMap;
use strata_core::{Page, PageRequest, StrataError, StrataResult, User, UserId};

/// Users keyed by id, soft-deleted rows included.
#[derive(Debug, Clone, Default)]
pub(crate) struct UserTable {
    rows: HashMap<UserId, User>,
}

impl UserTable {
    pub(crate) fn insert(&mut self, user: &User) -> StrataResult<User> {
        if self.rows.contains_key(&user.id) {
            return Err(StrataError::conflict(format!("User id '{}' already exists", user.id)));
        }
        if self.live().any(|u| u.email == user.email) {
            return Err(StrataError::conflict(format!(
                "Email '{}' already exists",
                user.email
            )));
        }
        self.rows.insert(user.id, user.clone());
        Ok(user.clone())
    }

    pub(crate) fn get(&self, id: UserId) -> Option<User> {
        self.rows.get(&id).filter(|u| !u.is_deleted()).cloned()
    }

    pub(crate) fn update(&mut self, user: &User) -> StrataResult<User> {
        if self.get(user.id).is_none() {
            return Err(StrataError::not_found("User", user.id));
        }
        if self.live().any(|u| u.id != user.id && u.email == user.email) {
            return Err(StrataError::conflict(format!(
                "Email '{}' already exists",
                user.email
            )));
        }
        self.rows.insert(user.id, user.clone());
        Ok(user.clone())
    }

    pub(crate) fn soft_delete(&mut self, id: UserId) -> bool {
        match self.rows.get_mut(&id) {
            Some(user) if !user.is_deleted() => {
                user.mark_deleted();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn page(&self, page: PageRequest) -> Page<User> {
        let mut users: Vec<&User> = self.live().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        let total = users.len() as u64;
        let content = users
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect();
        Page::new(content, page.page(), page.size(), total)
    }

    fn live(&self) -> impl Iterator<Item = &User> {
        self.rows.values().filter(|u| !u.is_deleted())
    }
}

/// A table plus a counter bumped on every committed write.
#[derive(Debug, Default)]
pub(crate) struct VersionedTable {
    pub(crate) version: u64,
    pub(crate) table: UserTable,
}
