//! Token service module for JWT management
//!
//! Issues and verifies HS256 access and refresh tokens. Each kind has its own
//! secret and lifetime; the kind is also embedded as a claim and checked on
//! every verification.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
