// Routes behind the bearer-token gate. Each handler receives the resolved
// `User` through `Extension<User>`; store calls are always scoped to `user.id`.
pub mod me;
pub mod notes;

pub use me::me_get;
pub use notes::*;
