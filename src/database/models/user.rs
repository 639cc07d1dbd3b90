use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity resolved from a bearer token. Rows are provisioned outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
}
