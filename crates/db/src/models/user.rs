//! User entity model.

use aistagram_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table. Account creation itself is owned by the
/// external auth provider integration; this backend only looks users up
/// and toggles `is_active`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub tier: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
