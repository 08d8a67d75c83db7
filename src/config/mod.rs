mod file_config;

pub use file_config::{FileConfig, RecommendConfig, SearchConfig};

use crate::index::Metric;
use crate::recommend::DEFAULT_POOL_MARGIN;
use crate::search::DEFAULT_SEARCH_LIMIT;
use crate::server::RequestsLoggingLevel;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub features_path: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub metric: Metric,
    pub pool_margin: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: None,
            features_path: None,
            port: DEFAULT_PORT,
            logging_level: RequestsLoggingLevel::default(),
            frontend_dir_path: None,
            metric: Metric::default(),
            pool_margin: DEFAULT_POOL_MARGIN,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub features_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,

    pub recommend: RecommendSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendSettings {
    pub metric: Metric,
    pub default_top_n: usize,
    pub min_top_n: usize,
    pub max_top_n: usize,
    pub pool_margin: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            metric: Metric::Euclidean,
            default_top_n: 10,
            min_top_n: 5,
            max_top_n: 30,
            pool_margin: DEFAULT_POOL_MARGIN,
        }
    }
}

impl RecommendSettings {
    /// Picks the number of results a UI asks for, the recommender itself
    /// accepts any positive value.
    pub fn clamp_top_n(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_top_n)
            .clamp(self.min_top_n, self.max_top_n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .ok_or_else(|| {
                anyhow!("catalog_path must be specified via --catalog or in config file")
            })?;
        if !catalog_path.is_file() {
            bail!("Catalog file does not exist: {:?}", catalog_path);
        }

        let features_path = file
            .features_path
            .map(PathBuf::from)
            .or_else(|| cli.features_path.clone())
            .ok_or_else(|| {
                anyhow!("features_path must be specified via --features or in config file")
            })?;
        if !features_path.is_file() {
            bail!("Features file does not exist: {:?}", features_path);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => parse_logging_level(&s)
                .ok_or_else(|| anyhow!("Invalid logging_level in config file: {}", s))?,
            None => cli.logging_level.clone(),
        };

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let recommend_file = file.recommend.unwrap_or_default();
        let defaults = RecommendSettings::default();
        let metric = match recommend_file.metric {
            Some(s) => parse_metric(&s).ok_or_else(|| anyhow!("Unknown metric: {}", s))?,
            None => cli.metric,
        };
        let recommend = RecommendSettings {
            metric,
            default_top_n: recommend_file
                .default_top_n
                .unwrap_or(defaults.default_top_n),
            min_top_n: recommend_file.min_top_n.unwrap_or(defaults.min_top_n),
            max_top_n: recommend_file.max_top_n.unwrap_or(defaults.max_top_n),
            pool_margin: recommend_file.pool_margin.unwrap_or(cli.pool_margin),
        };
        if recommend.min_top_n == 0 {
            bail!("min_top_n must be at least 1");
        }
        if !(recommend.min_top_n <= recommend.default_top_n
            && recommend.default_top_n <= recommend.max_top_n)
        {
            bail!(
                "Expected min_top_n <= default_top_n <= max_top_n, got {} / {} / {}",
                recommend.min_top_n,
                recommend.default_top_n,
                recommend.max_top_n
            );
        }

        let search = SearchSettings {
            limit: file
                .search
                .and_then(|s| s.limit)
                .unwrap_or(DEFAULT_SEARCH_LIMIT),
        };

        Ok(Self {
            catalog_path,
            features_path,
            port,
            logging_level,
            frontend_dir_path,
            recommend,
            search,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_metric(s: &str) -> Option<Metric> {
    Metric::from_str(s, true).ok()
}
