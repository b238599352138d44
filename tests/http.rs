use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use article_ai::{
    api::{create_router, AppState},
    config::Settings,
};

fn app() -> Router {
    create_router(AppState::new(Settings::default()))
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_process(body: Value) -> Request<Body> {
    Request::post("/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn models_lists_registry() {
    let response = app()
        .oneshot(Request::get("/models").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    insta::assert_json_snapshot!(body, @r###"
    [
      "en_core_web_sm",
      "en_core_web_md",
      "en_core_web_lg",
      "en_core_web_trf",
      "xx_ent_wiki_sm",
      "fi_core_news_sm",
      "fi_core_news_lg",
      "sv_core_news_sm",
      "sv_core_news_lg"
    ]
    "###);
}

#[tokio::test]
async fn empty_batch_returns_empty_array() {
    let response = app().oneshot(post_process(json!({ "texts": [] }))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-cache, no-store, max-age=0"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn unknown_model_is_a_client_error() {
    let response = app()
        .oneshot(post_process(json!({ "model": "not_a_real_model", "texts": ["x"] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Unknown model"));
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let request = Request::post("/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn process_returns_annotations() {
    let response = app()
        .oneshot(post_process(json!({
            "texts": [
                { "text": "Apple was founded in 1976.", "text_id": "first" },
                { "text": "Apple released a new phone.", "text_id": "second" }
            ],
            "model": "en_core_web_sm",
            "keywords": 3
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first["text_id"], "first");
    assert_eq!(first["model"], "en_core_web_sm");
    assert_eq!(first["language"], "en");
    assert!(first.get("similarity").is_none());
    assert!(first["polarity"].is_number());
    assert_eq!(
        first["entities"][0],
        json!({ "text": "Apple", "label": "ORG", "start": 0, "end": 5 })
    );

    let second = &results[1];
    let similarity = second["similarity"].as_f64().unwrap();
    assert!((-1.0..=1.0).contains(&similarity));
    assert!(second["keywords"].as_array().unwrap().len() <= 3);
}

#[tokio::test]
async fn smoke_test_route_returns_two_results() {
    let response = app()
        .oneshot(Request::get("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn www_host_is_redirected() {
    let request = Request::get("/")
        .header(header::HOST, "www.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "http://example.com");
}

#[tokio::test]
async fn landing_page_sets_hsts() {
    let request = Request::get("/")
        .header(header::HOST, "example.com")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::STRICT_TRANSPORT_SECURITY],
        "max-age=63072000"
    );
}

#[tokio::test]
async fn legacy_paths_redirect() {
    let response = app()
        .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], ".");

    let response = app()
        .oneshot(Request::get("/favicon.ico").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "static/icon.svg");
}

#[tokio::test]
async fn robots_txt_is_served() {
    let response = app()
        .oneshot(Request::get("/robots.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("User-agent"));
}
