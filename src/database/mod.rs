pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Note, User};
pub use repository::{CreateOutcome, NoteStore, UserStore};
pub use service::PgStore;
