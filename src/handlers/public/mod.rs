// Routes that need no credentials
pub mod health;

pub use health::health;
