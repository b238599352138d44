//! HTTP layer exposing text analysis and the static landing page.

pub mod error;
pub mod routes;
pub mod types;

use std::{net::SocketAddr, time::Duration};

use anyhow::Result;
use axum::{
    http::{
        header::{ACCESS_CONTROL_MAX_AGE, CACHE_CONTROL},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{config::Settings, processor::TextProcessor};

/// Preflight cache lifetime granted to browsers.
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub processor: TextProcessor,
}

impl AppState {
    /// State with empty model caches; models load on first request.
    pub fn new(settings: Settings) -> Self {
        let processor = TextProcessor::with_device(settings.device.clone());
        Self {
            settings,
            processor,
        }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.settings.static_dir.clone();

    let analysis = Router::new()
        .route("/models", get(routes::list_models))
        .route("/keyword-models", get(routes::list_keyword_models))
        .route("/process", post(routes::process))
        .route("/test", get(routes::smoke_test))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, max-age=0"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from(CORS_MAX_AGE.as_secs()),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
                .max_age(CORS_MAX_AGE),
        );

    Router::new()
        .merge(analysis)
        .route("/", get(routes::root))
        .route("/index.html", get(routes::index_html))
        .route("/favicon.ico", get(routes::favicon))
        .route_service("/robots.txt", ServeFile::new(static_dir.join("robots.txt")))
        .route_service(
            "/site.webmanifest",
            ServeFile::new(static_dir.join("site.webmanifest")),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    if settings.uses_insecure_secret() {
        warn!("ARTICLE_AI_SECRET_KEY not set; using the development key");
    }
    info!(device = %settings.device, "inference device");

    let router = create_router(AppState::new(settings));
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving article-ai API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
