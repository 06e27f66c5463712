//! Serve command.

use chatgate_core::error::ConfigError;
use chatgate_core::Config;
use chatgate_gateway::Gateway;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Serve command arguments.
#[derive(Args)]
pub struct ServeArgs {
    /// Host to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port number
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Shared backend secret (overrides the config file)
    #[arg(long, env = "CHATGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Run the serve command.
pub async fn run(config_path: Option<PathBuf>, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    // Flags and environment override file values
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(password) = args.password {
        config.auth.password = password.into();
    }

    config.validate()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.models.default,
        "starting chatgate"
    );

    let gateway = Gateway::new(config);
    gateway.run().await?;

    Ok(())
}

/// Load config from an explicit path, the default path, or defaults.
fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    match config_path {
        Some(path) => Ok(Config::load(&path)?),
        None => match Config::load_default() {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                info!("No config file at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        },
    }
}
