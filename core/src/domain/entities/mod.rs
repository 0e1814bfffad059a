//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

pub use session::{ClientInfo, SessionRecord, DEFAULT_DEVICE_ID};
pub use token::{Claims, IssuedToken, TokenKind};
pub use user::User;
