use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::database::{CreateOutcome, DatabaseError, Note, NoteStore, User, UserStore};

/// In-memory user and note store for router and resolver tests.
///
/// Mirrors the PostgreSQL store: `(user_id, name)` is unique, creates on an existing
/// name are ignored, and misses on any scoped operation are `NotFound`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Mutex<Vec<(User, String)>>,
    notes: Mutex<BTreeMap<(i32, String), Note>>,
    next_user_id: AtomicI32,
    next_note_id: AtomicI32,
    fail_lookups: AtomicBool,
    fail_notes: AtomicBool,
    token_lookups: AtomicUsize,
    note_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str, token: &str) -> User {
        let user = User {
            id: self.inner.next_user_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: username.to_string(),
        };
        self.inner
            .users
            .lock()
            .unwrap()
            .push((user.clone(), token.to_string()));
        user
    }

    /// Make token lookups fail as if the database were unreachable.
    pub fn fail_lookups(&self, fail: bool) {
        self.inner.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make every note operation fail as if the database were unreachable.
    pub fn fail_notes(&self, fail: bool) {
        self.inner.fail_notes.store(fail, Ordering::SeqCst);
    }

    pub fn token_lookups(&self) -> usize {
        self.inner.token_lookups.load(Ordering::SeqCst)
    }

    /// Number of `NoteStore` calls made so far.
    pub fn note_calls(&self) -> usize {
        self.inner.note_calls.load(Ordering::SeqCst)
    }

    pub fn note_count(&self, owner_id: i32) -> usize {
        self.inner
            .notes
            .lock()
            .unwrap()
            .keys()
            .filter(|(owner, _)| *owner == owner_id)
            .count()
    }

    pub fn content_of(&self, owner_id: i32, name: &str) -> Option<String> {
        self.inner
            .notes
            .lock()
            .unwrap()
            .get(&(owner_id, name.to_string()))
            .map(|n| n.content.clone())
    }

    fn enter_notes(&self) -> Result<(), DatabaseError> {
        self.inner.note_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_notes.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        self.inner.token_lookups.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_lookups.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .inner
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(_, t)| t == token)
            .map(|(u, _)| u.clone()))
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list(&self, owner_id: i32) -> Result<Vec<String>, DatabaseError> {
        self.enter_notes()?;
        // BTreeMap keys are ordered by (owner, name)
        Ok(self
            .inner
            .notes
            .lock()
            .unwrap()
            .keys()
            .filter(|(owner, _)| *owner == owner_id)
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn create(
        &self,
        owner_id: i32,
        name: &str,
        content: &str,
    ) -> Result<CreateOutcome, DatabaseError> {
        self.enter_notes()?;
        let mut notes = self.inner.notes.lock().unwrap();
        let key = (owner_id, name.to_string());
        if notes.contains_key(&key) {
            return Ok(CreateOutcome::Ignored);
        }
        let note = Note {
            id: self.inner.next_note_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: owner_id,
            name: name.to_string(),
            content: content.to_string(),
            created_at: None,
        };
        notes.insert(key, note);
        Ok(CreateOutcome::Created)
    }

    async fn get(&self, owner_id: i32, name: &str) -> Result<Note, DatabaseError> {
        self.enter_notes()?;
        self.inner
            .notes
            .lock()
            .unwrap()
            .get(&(owner_id, name.to_string()))
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("note '{}'", name)))
    }

    async fn update(&self, owner_id: i32, name: &str, content: &str) -> Result<(), DatabaseError> {
        self.enter_notes()?;
        match self
            .inner
            .notes
            .lock()
            .unwrap()
            .get_mut(&(owner_id, name.to_string()))
        {
            Some(note) => {
                note.content = content.to_string();
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("note '{}'", name))),
        }
    }

    async fn delete(&self, owner_id: i32, name: &str) -> Result<(), DatabaseError> {
        self.enter_notes()?;
        self.inner
            .notes
            .lock()
            .unwrap()
            .remove(&(owner_id, name.to_string()))
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("note '{}'", name)))
    }
}
