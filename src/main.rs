use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use discoteque_server::catalog::seed_initial_catalog;
use discoteque_server::catalog_store::{Album, Artist, Database, Song, Tour};
use discoteque_server::config::{AppConfig, CliConfig, FileConfig};
use discoteque_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite catalog database file.
    #[clap(value_parser = parse_path)]
    pub catalog_db: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to an optional TOML configuration file. Values set in the file
    /// override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Populate an empty database with the initial catalog.
    #[clap(long)]
    pub seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        db_path: cli_args.catalog_db,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        seed: cli_args.seed,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening SQLite catalog database at {:?}...", config.db_path);
    let database =
        Arc::new(Database::open(&config.db_path).context("Failed to open catalog database")?);

    if config.seed {
        if seed_initial_catalog(&database)? {
            info!("Seeded initial catalog data");
        } else {
            info!("Catalog already populated, skipping seed");
        }
    }

    info!(
        "Opened catalog: {} artists, {} albums, {} songs, {} tours",
        database.count::<Artist>().unwrap_or(0),
        database.count::<Album>().unwrap_or(0),
        database.count::<Song>().unwrap_or(0),
        database.count::<Tour>().unwrap_or(0),
    );

    info!("Ready to serve at port {}!", config.port);
    run_server(
        ServerConfig {
            port: config.port,
            requests_logging_level: config.logging_level,
        },
        database,
    )
    .await
}
