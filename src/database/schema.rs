use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

/// Idempotent DDL for the notes table. `users` is owned elsewhere and must already exist.
const NAMED_NOTES_DDL: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS named_notes (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ DEFAULT now()
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_named_notes_user_name ON named_notes(user_id, name)",
];

/// Advisory lock key serializing schema bootstrap across concurrently starting servers.
pub const SCHEMA_LOCK_KEY: i64 = 0x6e6f_7465_735f_6170;

/// Create the notes table and its unique index if missing. Safe to run from several
/// processes at once: the DDL runs under a transaction-scoped advisory lock.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in NAMED_NOTES_DDL {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("named_notes schema ready");
    Ok(())
}
