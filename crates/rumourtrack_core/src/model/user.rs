//! User domain model.
//!
//! # Responsibility
//! - Define the pre-seeded user record loaded from `users.json`.
//! - Distinguish the inspector role from ordinary accounts.
//!
//! # Invariants
//! - Users are never created, mutated or deleted by this system.

use serde::{Deserialize, Serialize};

/// Access role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can browse rumours and file reports.
    Ordinary,
    /// Additionally authorized to record verification outcomes.
    Inspector,
}

impl Role {
    /// Returns the stored string form of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary",
            Self::Inspector => "inspector",
        }
    }
}

/// An account known to the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    /// Display name shown by the presentation layer.
    pub name: String,
    pub role: Role,
}

impl User {
    /// Returns whether this account carries the inspector role.
    pub fn is_inspector(&self) -> bool {
        self.role == Role::Inspector
    }
}
