//! Session token authentication

mod config;
mod error;
mod validator;

pub use config::AuthConfig;
pub use error::AuthError;
pub use validator::{SessionClaims, SessionValidator};
