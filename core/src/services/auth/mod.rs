//! Authentication service module
//!
//! Register, login, refresh with rotation, and logout, coordinating the
//! token codec, the password hasher and the user and session stores.

mod config;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
