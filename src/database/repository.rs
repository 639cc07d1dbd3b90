use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Note, User};

/// Result of a create-or-ignore insert. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// A note with the same name already belonged to the owner; its content was left as is.
    Ignored,
}

/// Token lookup against the externally-owned users table.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError>;
}

/// Note operations, every one scoped to an already-resolved owner.
///
/// A name owned by someone else is reported exactly like a missing name:
/// `DatabaseError::NotFound`.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Names of the owner's notes in ascending order.
    async fn list(&self, owner_id: i32) -> Result<Vec<String>, DatabaseError>;

    async fn create(
        &self,
        owner_id: i32,
        name: &str,
        content: &str,
    ) -> Result<CreateOutcome, DatabaseError>;

    async fn get(&self, owner_id: i32, name: &str) -> Result<Note, DatabaseError>;

    /// Replaces the content wholesale. Never inserts.
    async fn update(&self, owner_id: i32, name: &str, content: &str) -> Result<(), DatabaseError>;

    async fn delete(&self, owner_id: i32, name: &str) -> Result<(), DatabaseError>;
}
