use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;

use crate::database::manager::{with_timeout, DatabaseError};
use crate::database::models::{Note, User};
use crate::database::repository::{CreateOutcome, NoteStore, UserStore};

/// PostgreSQL-backed user and note store. Every query is bounded by `query_timeout`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        with_timeout(
            "user lookup",
            self.query_timeout,
            sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool),
        )
        .await
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn list(&self, owner_id: i32) -> Result<Vec<String>, DatabaseError> {
        with_timeout(
            "list notes",
            self.query_timeout,
            sqlx::query_scalar::<_, String>(
                "SELECT name FROM named_notes WHERE user_id = $1 ORDER BY name ASC",
            )
            .bind(owner_id)
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn create(
        &self,
        owner_id: i32,
        name: &str,
        content: &str,
    ) -> Result<CreateOutcome, DatabaseError> {
        let result = with_timeout(
            "create note",
            self.query_timeout,
            sqlx::query(
                r#"
                INSERT INTO named_notes (user_id, name, content)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, name) DO NOTHING
                "#,
            )
            .bind(owner_id)
            .bind(name)
            .bind(content)
            .execute(&self.pool),
        )
        .await?;

        Ok(if result.rows_affected() == 0 {
            CreateOutcome::Ignored
        } else {
            CreateOutcome::Created
        })
    }

    async fn get(&self, owner_id: i32, name: &str) -> Result<Note, DatabaseError> {
        let note = with_timeout(
            "get note",
            self.query_timeout,
            sqlx::query_as::<_, Note>(
                r#"
                SELECT id, user_id, name, content, created_at
                FROM named_notes
                WHERE user_id = $1 AND name = $2
                "#,
            )
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&self.pool),
        )
        .await?;

        note.ok_or_else(|| DatabaseError::NotFound(format!("note '{}'", name)))
    }

    async fn update(&self, owner_id: i32, name: &str, content: &str) -> Result<(), DatabaseError> {
        let result = with_timeout(
            "update note",
            self.query_timeout,
            sqlx::query("UPDATE named_notes SET content = $3 WHERE user_id = $1 AND name = $2")
                .bind(owner_id)
                .bind(name)
                .bind(content)
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("note '{}'", name)));
        }
        Ok(())
    }

    async fn delete(&self, owner_id: i32, name: &str) -> Result<(), DatabaseError> {
        let result = with_timeout(
            "delete note",
            self.query_timeout,
            sqlx::query("DELETE FROM named_notes WHERE user_id = $1 AND name = $2")
                .bind(owner_id)
                .bind(name)
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("note '{}'", name)));
        }
        Ok(())
    }
}
