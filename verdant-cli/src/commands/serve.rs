//! Run the verdant HTTP server
//!
//! Flags override the merged configuration. The facility directory is read
//! from a TOML seed file when one is configured.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{info, warn};
use verdant_core::MemoryMembershipStore;
use verdant_server::auth::SessionValidator;
use verdant_server::{AppState, ServerConfig, VerdantServer};

use crate::config::{ConfigLoader, VerdantConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Facility directory seed file
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let server_config = server_config(&args, &config);

    if !config.auth.is_valid() {
        bail!("no session secret configured; set [auth] secret or VERDANT_AUTH_SECRET");
    }
    let validator = SessionValidator::new(config.auth.clone())?;

    let store = match args.seed.as_ref().or(config.directory.seed.as_ref()) {
        Some(path) => {
            let store = MemoryMembershipStore::load(path)
                .with_context(|| format!("failed to load directory seed {}", path.display()))?;
            info!(seed = %path.display(), "loaded facility directory");
            store
        }
        None => {
            warn!("no directory seed configured, every facility request will be rejected");
            MemoryMembershipStore::new()
        }
    };

    let state = Arc::new(AppState::new(Arc::new(store), validator));

    info!(
        "Starting verdant server on {}:{}",
        server_config.host, server_config.port
    );
    VerdantServer::with_state(server_config, state).run().await?;
    Ok(())
}

fn server_config(args: &ServeArgs, config: &VerdantConfig) -> ServerConfig {
    ServerConfig::new(
        args.host.clone().unwrap_or_else(|| config.server.host.clone()),
        args.port.unwrap_or(config.server.port),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ServeArgs {
            port: Some(9001),
            host: None,
            seed: None,
        };
        let config = VerdantConfig::default();
        let server = server_config(&args, &config);
        assert_eq!(server.port, 9001);
        assert_eq!(server.host, config.server.host);
    }

    #[test]
    fn test_config_used_without_flags() {
        let args = ServeArgs {
            port: None,
            host: None,
            seed: None,
        };
        let mut config = VerdantConfig::default();
        config.server.host = "0.0.0.0".to_string();
        let server = server_config(&args, &config);
        assert_eq!(server.addr(), format!("0.0.0.0:{}", config.server.port));
    }
}
