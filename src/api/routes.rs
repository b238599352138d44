//! HTTP route handlers for Axum.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{HOST, LOCATION, STRICT_TRANSPORT_SECURITY},
        HeaderMap, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    api::{error::ApiResult, types::ProcessRequest},
    encoder,
    nlp::{KeywordModelName, ModelName},
    ui,
};

use super::AppState;

/// HSTS lifetime advertised on the landing page: two years.
const HSTS_MAX_AGE: &str = "max-age=63072000";

pub async fn list_models() -> Json<Vec<&'static str>> {
    Json(ModelName::ALL.iter().map(ModelName::as_str).collect())
}

pub async fn list_keyword_models() -> Json<Vec<&'static str>> {
    Json(KeywordModelName::ALL.iter().map(KeywordModelName::as_str).collect())
}

pub async fn process(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let start = Instant::now();
    let Json(request) = payload?;
    let (texts, options) = request.into_parts();
    let count = texts.len();
    info!(count, model = %options.model, language = %options.language, "processing texts");

    let results = state.processor.process(texts, &options).await?;

    info!(
        count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "processed texts"
    );
    Ok(Json(encoder::encode(&results)))
}

pub async fn smoke_test(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let results = state.processor.smoke_test().await?;
    Ok(Json(encoder::encode(&results)))
}

pub async fn root(headers: HeaderMap) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    info!(%host, "landing page");
    if let Some(bare) = host.strip_prefix("www.") {
        return redirect(StatusCode::MOVED_PERMANENTLY, &format!("http://{bare}"));
    }

    match ui::render_index() {
        Ok(page) => ([(STRICT_TRANSPORT_SECURITY, HSTS_MAX_AGE)], Html(page)).into_response(),
        Err(err) => {
            error!(error = ?err, "rendering landing page failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Legacy landing page path.
pub async fn index_html() -> Response {
    redirect(StatusCode::FOUND, ".")
}

pub async fn favicon() -> Response {
    redirect(StatusCode::FOUND, "static/icon.svg")
}

fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(LOCATION, location.to_string())]).into_response()
}
