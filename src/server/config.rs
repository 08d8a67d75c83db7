use super::RequestsLoggingLevel;
use crate::config::{AppConfig, RecommendSettings, SearchSettings};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub frontend_dir_path: Option<String>,
    pub recommend: RecommendSettings,
    pub search: SearchSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3001,
            frontend_dir_path: None,
            recommend: RecommendSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        ServerConfig {
            requests_logging_level: config.logging_level.clone(),
            port: config.port,
            frontend_dir_path: config.frontend_dir_path.clone(),
            recommend: config.recommend.clone(),
            search: config.search.clone(),
        }
    }
}
