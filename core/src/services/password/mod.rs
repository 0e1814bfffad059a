//! Credential hashing
//!
//! bcrypt with a configurable work factor. Hashing is CPU-bound, so the async
//! entry points run it on the blocking pool.

mod hasher;

pub use hasher::PasswordHasher;
