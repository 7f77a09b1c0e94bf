//! Authentication error types

use thiserror::Error;

/// Errors that can occur while verifying a session token
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token on the request
    #[error("no authentication token provided")]
    MissingToken,

    /// The authorization header was not a bearer token
    #[error("invalid authorization header: {0}")]
    InvalidFormat(String),

    /// The token has expired
    #[error("token has expired")]
    Expired,

    /// The token's issuer claim doesn't match the configured issuer
    #[error("invalid issuer claim")]
    InvalidIssuer,

    /// No signing secret is configured
    #[error("no signing secret configured")]
    MissingSecret,

    /// JWT decoding or signing error from jsonwebtoken
    #[error("JWT error: {0}")]
    Jwt(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
            _ => AuthError::Jwt(err),
        }
    }
}
