use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use verdant_server::DEFAULT_PORT;
use verdant_server::auth::AuthConfig;

/// Default host for the verdant server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawVerdantConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub auth: RawAuthConfig,

    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host address to bind to
    pub host: Option<String>,

    /// Port for the verdant server
    pub port: Option<u16>,
}

/// Auth config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAuthConfig {
    pub secret: Option<String>,
    pub issuer: Option<String>,
    pub leeway_seconds: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VerdantConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl VerdantConfig {
    /// Copy safe to print: the signing secret is masked
    pub fn redacted(&self) -> VerdantConfig {
        let mut config = self.clone();
        if !config.auth.secret.is_empty() {
            config.auth.secret = "********".to_string();
        }
        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Host address to bind to
    pub host: String,

    /// Port for the verdant server
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    /// TOML file seeding facilities and memberships
    pub seed: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = VerdantConfig::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert!(config.auth.secret.is_empty());
        assert!(config.directory.seed.is_none());
    }

    #[test]
    fn test_raw_config_partial_parsing() {
        let toml_str = r#"
[server]
port = 9000
"#;
        let raw: RawVerdantConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(raw.server.port, Some(9000));
        assert!(raw.server.host.is_none());
        assert!(raw.auth.secret.is_none());
    }

    #[test]
    fn test_redacted_masks_secret() {
        let mut config = VerdantConfig::default();
        config.auth.secret = "hunter2".to_string();
        let shown = toml::to_string(&config.redacted()).unwrap();
        assert!(!shown.contains("hunter2"));
        assert_eq!(config.auth.secret, "hunter2");
    }
}
