//! User repository over the flat-file store.
//!
//! # Responsibility
//! - Load the pre-seeded user collection and answer id and role lookups.
//!
//! # Invariants
//! - Strictly read-only: no write API exists for users.
//! - Unknown user ids are never inspectors.

use crate::model::user::User;
use crate::repo::json_store::{JsonStore, Record, StoreResult};
use std::path::PathBuf;

impl Record for User {
    fn id(&self) -> &str {
        &self.user_id
    }
}

/// Flat-file user repository.
#[derive(Debug)]
pub struct UserRepository {
    store: JsonStore<User>,
}

impl UserRepository {
    /// Loads the repository from its backing file.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Ok(Self {
            store: JsonStore::load(path)?,
        })
    }

    /// Returns all users in file order (defensive copy).
    pub fn get_all(&self) -> Vec<User> {
        self.store.get_all()
    }

    /// Returns how many users are stored.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the first user with the given id, if any.
    pub fn get_by_id(&self, user_id: &str) -> Option<User> {
        self.store.get_by_id(user_id).cloned()
    }

    /// Returns whether the given id belongs to an inspector.
    pub fn is_inspector(&self, user_id: &str) -> bool {
        self.store
            .get_by_id(user_id)
            .map_or(false, User::is_inspector)
    }
}
