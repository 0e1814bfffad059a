//! Storage contracts for users and sessions, plus in-memory backends.

pub mod session;
pub mod user;

pub use session::{InMemorySessionRepository, SessionRepository};
pub use user::{InMemoryUserRepository, UserRepository};
