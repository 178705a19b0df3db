/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use catalog_api::{app::{build_router, AppState}, config::Config};
/// use catalog_shared::db::pool::create_lazy_pool;
/// use catalog_shared::store::PgProductStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_lazy_pool(&config.database.pool_config())?;
/// let state = AppState::new(Arc::new(PgProductStore::new(pool)), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use catalog_shared::store::ProductStore;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Product storage
    pub store: Arc<dyn ProductStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn ProductStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// ├── /api/
/// │   ├── GET  /products            # list or monthly report
/// │   ├── POST /products/generate   # synthetic products
/// │   ├── POST /test                # echo
/// │   ├── GET  /test/v1
/// │   └── GET  /test/v2
/// └── /api-docs/
///     ├── GET  /                    # Swagger UI
///     └── GET  /openapi.json
/// ```
///
/// Unknown paths get a 404 failure envelope.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route("/products", get(routes::products::list_products))
        .route("/products/generate", post(routes::products::generate_products))
        .route("/test", post(routes::smoke::echo))
        .route("/test/v1", get(routes::smoke::test_v1))
        .route("/test/v2", get(routes::smoke::test_v2));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs", get(routes::docs::docs_page))
        .route(routes::docs::OPENAPI_PATH, get(routes::docs::openapi_json))
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
