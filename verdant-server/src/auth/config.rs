//! Configuration for session token verification

use serde::{Deserialize, Serialize};

/// Configuration for HS256 session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign session tokens
    #[serde(default)]
    pub secret: String,

    /// Expected `iss` claim, if tokens carry one
    #[serde(default)]
    pub issuer: Option<String>,

    /// Clock skew leeway in seconds for expiry validation
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    60
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: None,
            leeway_seconds: default_leeway(),
        }
    }
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// A secret is required; without one no token can be verified
    pub fn is_valid(&self) -> bool {
        !self.secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert!(config.secret.is_empty());
        assert!(config.issuer.is_none());
        assert_eq!(config.leeway_seconds, 60);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_new_config_is_valid() {
        let config = AuthConfig::new("s3cret").with_issuer("verdant");
        assert!(config.is_valid());
        assert_eq!(config.issuer.as_deref(), Some("verdant"));
    }

    #[test]
    fn test_deserialize_toml() {
        let toml = r#"
            secret = "abc"
            issuer = "verdant-api"
        "#;
        let config: AuthConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.secret, "abc");
        assert_eq!(config.issuer.as_deref(), Some("verdant-api"));
        assert_eq!(config.leeway_seconds, 60);
    }
}
