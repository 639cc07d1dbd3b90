use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A named note. Clients see `{id, name, content}`; the owner and creation time stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Note {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}
