use super::types::{
    DEFAULT_HOST, DirectoryConfig, RawAuthConfig, RawServerConfig, RawVerdantConfig,
    ServerSection, VerdantConfig,
};
use anyhow::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use verdant_server::DEFAULT_PORT;
use verdant_server::auth::AuthConfig;

/// Environment variable overriding the signing secret
pub const SECRET_ENV: &str = "VERDANT_AUTH_SECRET";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + environment)
    pub fn load() -> Result<VerdantConfig> {
        let mut raw = RawVerdantConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        // Layer 3: Environment
        if let Ok(secret) = std::env::var(SECRET_ENV)
            && !secret.is_empty()
        {
            raw.auth.secret = Some(secret);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<RawVerdantConfig> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "verdant").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with VERDANT_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("VERDANT_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".verdant/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawVerdantConfig, overlay: RawVerdantConfig) -> RawVerdantConfig {
        RawVerdantConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            auth: RawAuthConfig {
                secret: overlay.auth.secret.or(base.auth.secret),
                issuer: overlay.auth.issuer.or(base.auth.issuer),
                leeway_seconds: overlay.auth.leeway_seconds.or(base.auth.leeway_seconds),
            },
            directory: DirectoryConfig {
                seed: overlay.directory.seed.or(base.directory.seed),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawVerdantConfig) -> VerdantConfig {
        let auth_defaults = AuthConfig::default();
        VerdantConfig {
            server: ServerSection {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            auth: AuthConfig {
                secret: raw.auth.secret.unwrap_or_default(),
                issuer: raw.auth.issuer,
                leeway_seconds: raw
                    .auth
                    .leeway_seconds
                    .unwrap_or(auth_defaults.leeway_seconds),
            },
            directory: raw.directory,
        }
    }
}
