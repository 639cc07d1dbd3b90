#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};

/// A server process plus a direct database handle for seeding users.
///
/// Requires `DATABASE_URL`; `setup` returns `None` when it is unset so the
/// suite can run on machines without PostgreSQL.
pub struct TestContext {
    pub base_url: String,
    pub client: reqwest::Client,
    pub pool: PgPool,
    database_url: String,
    child: Child,
    user_ids: Vec<i32>,
}

pub async fn setup() -> Result<Option<TestContext>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    // The users table is provisioned outside the service; make sure a minimal one exists.
    // Tests run in parallel, so take the same lock the server uses for its own DDL.
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(notes_api::database::schema::SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (id SERIAL PRIMARY KEY, username TEXT NOT NULL, token TEXT)",
    )
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let child = Command::new(env!("CARGO_BIN_EXE_notes-api"))
        .env("DATABASE_URL", &database_url)
        .env("HOST", "127.0.0.1")
        .env("PORT", port.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .context("failed to spawn server binary")?;

    let ctx = TestContext {
        base_url,
        client: reqwest::Client::new(),
        pool,
        database_url,
        child,
        user_ids: Vec::new(),
    };
    ctx.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(ctx))
}

impl TestContext {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Insert a user with a fresh random token.
    pub async fn create_user(&mut self, username: &str) -> Result<(i32, String)> {
        let token = uuid::Uuid::new_v4().to_string();
        let id: i32 =
            sqlx::query_scalar("INSERT INTO users (username, token) VALUES ($1, $2) RETURNING id")
                .bind(username)
                .bind(&token)
                .fetch_one(&self.pool)
                .await?;
        self.user_ids.push(id);
        Ok((id, token))
    }

    pub async fn stored_content(&self, user_id: i32, name: &str) -> Result<Option<String>> {
        Ok(sqlx::query_scalar(
            "SELECT content FROM named_notes WHERE user_id = $1 AND name = $2",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn note_rows(&self, user_id: i32) -> Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM named_notes WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Remove the users this context created; their notes go with them.
    pub async fn cleanup(mut self) -> Result<()> {
        let ids = std::mem::take(&mut self.user_ids);
        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();

        // A test that panicked before `cleanup` still removes its users.
        let ids = std::mem::take(&mut self.user_ids);
        if ids.is_empty() {
            return;
        }
        let database_url = self.database_url.clone();
        let handle = std::thread::spawn(move || delete_users_blocking(&database_url, &ids));
        if let Ok(Err(e)) = handle.join() {
            eprintln!("failed to remove test users: {:#}", e);
        }
    }
}

fn delete_users_blocking(database_url: &str, ids: &[i32]) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut conn = PgConnection::connect(database_url).await?;
        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut conn)
            .await?;
        Ok(())
    })
}
