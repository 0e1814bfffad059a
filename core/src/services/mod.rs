//! Business services containing the token lifecycle logic.

pub mod auth;
pub mod gate;
pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use gate::{AuthContext, RequestGate};
pub use password::PasswordHasher;
pub use session::{SessionSweeper, SweepResult, SweeperConfig};
pub use token::{TokenService, TokenServiceConfig};
