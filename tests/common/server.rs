//! Test server lifecycle management
//!
//! Each test gets an isolated server loading its own catalog files.

use super::constants::*;
use super::fixtures::create_test_catalog;
use pezzottify_recommender::server::{make_app, RequestsLoggingLevel, ServerConfig};
use pezzottify_recommender::{
    load_catalog, load_feature_matrix, BruteForceIndex, CatalogSearch, Metric,
    RecommendationEngine,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated catalog
///
/// When dropped, the server gracefully shuts down and temp files are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    // Private fields - keep resources alive until drop
    _temp_catalog_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port with the default configuration
    pub async fn spawn() -> Self {
        Self::spawn_with_config(ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        })
        .await
    }

    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be created or loaded, if the port cannot
    /// be bound or if the server doesn't become ready within timeout.
    pub async fn spawn_with_config(mut config: ServerConfig) -> Self {
        let (temp_catalog_dir, catalog_path, features_path) =
            create_test_catalog().expect("Failed to create test catalog");

        let catalog = Arc::new(load_catalog(&catalog_path).expect("Failed to load catalog"));
        let features =
            Arc::new(load_feature_matrix(&features_path).expect("Failed to load features"));
        let index = Arc::new(BruteForceIndex::new(features.clone(), Metric::Euclidean));
        let engine = Arc::new(RecommendationEngine::new(
            catalog.clone(),
            features,
            index,
        ));
        let search = Arc::new(CatalogSearch::new(catalog));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        config.port = port;
        let app = make_app(config, engine, search);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _temp_catalog_dir: temp_catalog_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
