use anyhow::Result;
use std::time::{Duration, Instant};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::{error, info};

use super::state::*;
use super::{log_requests, ServerConfig};
use crate::export::{recommendations_to_csv, CSV_CONTENT_TYPE, CSV_FILE_NAME};
use crate::recommend::{Recommendation, RecommendError};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub catalog_size: usize,
    pub feature_dim: usize,
    pub metric: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
struct RecommendBody {
    pub liked_ids: Vec<String>,

    /// Clamped to the configured UI range, the configured default if missing.
    pub top_n: Option<usize>,

    pub pool_margin: Option<usize>,
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        let status = match self {
            RecommendError::EmptyResolution { .. } => StatusCode::NOT_FOUND,
            RecommendError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        catalog_size: state.engine.catalog().size(),
        feature_dim: state.engine.features().dim(),
        metric: state.engine.index().metric().to_string(),
    };
    Json(stats)
}

async fn search(
    State(config): State<ServerConfig>,
    State(search): State<SharedSearch>,
    Query(params): Query<SearchParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(config.search.limit)
        .min(config.search.limit);
    Json(search.search(&params.q, limit)).into_response()
}

fn run_recommendation(
    state: &ServerState,
    body: RecommendBody,
) -> Result<Vec<Recommendation>, RecommendError> {
    let settings = &state.config.recommend;
    let top_n = settings.clamp_top_n(body.top_n);
    let pool_margin = body.pool_margin.unwrap_or(settings.pool_margin);
    state.engine.recommend(&body.liked_ids, top_n, pool_margin)
}

async fn recommend(State(state): State<ServerState>, Json(body): Json<RecommendBody>) -> Response {
    match run_recommendation(&state, body) {
        Ok(recommendations) => Json(recommendations).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn recommend_csv(
    State(state): State<ServerState>,
    Json(body): Json<RecommendBody>,
) -> Response {
    let recommendations = match run_recommendation(&state, body) {
        Ok(recommendations) => recommendations,
        Err(err) => return err.into_response(),
    };
    match recommendations_to_csv(&recommendations) {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            error!("Could not export recommendations: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

impl ServerState {
    fn new(config: ServerConfig, engine: SharedEngine, search: SharedSearch) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            engine,
            search,
        }
    }
}

pub fn make_app(config: ServerConfig, engine: SharedEngine, search: SharedSearch) -> Router {
    let state = ServerState::new(config.clone(), engine, search);

    let api_routes: Router = Router::new()
        .route("/search", get(self::search))
        .route("/recommend", post(recommend))
        .route("/recommend/csv", post(recommend_csv))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    engine: SharedEngine,
    search: SharedSearch,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, engine, search);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
