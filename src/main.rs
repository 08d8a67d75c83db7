use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pezzottify_recommender::config::{AppConfig, CliConfig, FileConfig, DEFAULT_PORT};
use pezzottify_recommender::features::load_aligned;
use pezzottify_recommender::recommend::DEFAULT_POOL_MARGIN;
use pezzottify_recommender::server::{run_server, ServerConfig};
use pezzottify_recommender::{
    BruteForceIndex, CatalogSearch, Metric, RecommendationEngine, RequestsLoggingLevel,
};

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
    /// Path to a TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the catalog CSV (track_id, track_name, artist_name, ...).
    #[clap(long, value_parser = parse_path)]
    pub catalog: Option<PathBuf>,

    /// Path to the feature matrix CSV, one row per catalog row.
    #[clap(long, value_parser = parse_path)]
    pub features: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Distance used to compare feature vectors.
    #[clap(long, default_value = "euclidean")]
    pub metric: Metric,

    /// Extra neighbors retrieved on top of top_n + liked count.
    #[clap(long, default_value_t = DEFAULT_POOL_MARGIN)]
    pub pool_margin: usize,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            catalog_path: self.catalog.clone(),
            features_path: self.features.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            metric: self.metric,
            pool_margin: self.pool_margin,
        }
    }
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
        Some(path) => {
            info!("Reading config file at {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!(
        "Loading catalog at {:?} and features at {:?}...",
        app_config.catalog_path, app_config.features_path
    );
    let (catalog, features) = load_aligned(&app_config.catalog_path, &app_config.features_path)?;
    let catalog = Arc::new(catalog);
    let features = Arc::new(features);

    info!(
        "Indexing {} tracks with {} features each ({} distance)...",
        features.len(),
        features.dim(),
        app_config.recommend.metric
    );
    let index = Arc::new(BruteForceIndex::new(
        features.clone(),
        app_config.recommend.metric,
    ));
    let engine = Arc::new(RecommendationEngine::new(
        catalog.clone(),
        features,
        index,
    ));
    let search = Arc::new(CatalogSearch::new(catalog));

    info!("Ready to recommend!");
    run_server(ServerConfig::from(&app_config), engine, search).await
}
