//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::database::{NoteStore, PgStore, UserStore};

/// Cloneable handle passed to every handler through `State<AppState>`.
///
/// Holds no mutable in-process state; everything durable lives behind the stores.
#[derive(Clone)]
pub struct AppState {
    users: Arc<dyn UserStore>,
    notes: Arc<dyn NoteStore>,
    /// Present only when backed by PostgreSQL; used by the health check.
    pg: Option<PgStore>,
    query_timeout: Duration,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, notes: Arc<dyn NoteStore>, query_timeout: Duration) -> Self {
        Self {
            users,
            notes,
            pg: None,
            query_timeout,
        }
    }

    pub fn postgres(store: PgStore, query_timeout: Duration) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            users: shared.clone(),
            notes: shared,
            pg: Some(store),
            query_timeout,
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn notes(&self) -> &dyn NoteStore {
        self.notes.as_ref()
    }

    pub fn pg(&self) -> Option<&PgStore> {
        self.pg.as_ref()
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}
