//! Common types shared by the HTTP layer

pub mod response;

pub use response::ApiResponse;
