use anyhow::{Context, Result};
use clap::Parser;
use provider_update::api::ApiServer;
use provider_update::config::{self, ServerConfig, StorageConfig};
use provider_update::store::{InMemoryMediaStore, MediaStore, MySqlMediaStore};
use provider_update::telemetry;
use provider_update::util::env as env_util;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "provider-update",
    version,
    about = "HTTP endpoint that points a media row's provider at a new URL"
)]
struct Cli {
    /// Bind host (overrides API_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Bind port (overrides API_PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Serve from a process-local table instead of MySQL (also MEMORY_STORE=1)
    #[arg(long)]
    memory: bool,
    /// Row ids to pre-create when running with --memory (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "memory")]
    seed: Vec<i64>,
    /// Validate configuration, log a redacted snapshot, and exit
    #[arg(long)]
    check_config: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_util::init_env();
    telemetry::init_tracing()?;

    let cli = Cli::parse();

    if cli.check_config {
        env_util::preflight_check(
            "provider-update",
            config::REQUIRED_STORAGE_KEYS,
            config::LOGGED_KEYS,
        )?;
        let cfg = config::AppConfig::from_env()?;
        info!(server = ?cfg.server, storage = ?cfg.storage, "configuration ok");
        return Ok(());
    }

    let mut server_cfg = ServerConfig::from_env()?;
    if let Some(host) = cli.host {
        server_cfg.host = host;
    }
    if let Some(port) = cli.port {
        server_cfg.port = port;
    }

    let store: Arc<dyn MediaStore> = if cli.memory || env_util::env_flag("MEMORY_STORE", false) {
        warn!(seeded = cli.seed.len(), "serving from in-memory media table; nothing is persisted");
        Arc::new(InMemoryMediaStore::with_rows(
            cli.seed.into_iter().map(|id| (id, String::new())),
        ))
    } else {
        env_util::preflight_check(
            "provider-update",
            config::REQUIRED_STORAGE_KEYS,
            config::LOGGED_KEYS,
        )?;
        let storage = StorageConfig::from_env().context("invalid storage configuration")?;
        info!(storage = ?storage, "using MySQL media store");
        Arc::new(MySqlMediaStore::new(&storage)?)
    };

    ApiServer::from_config(&server_cfg).run(store).await
}
