#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use hockey_league_api::{app, db, AppState};
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tower::ServiceExt;

/// In-memory database on a single connection that is never recycled, so the
/// schema and rows survive between requests.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    db::init_schema(&pool).await.expect("schema");
    pool
}

pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    (app(AppState::new(Some(pool.clone()))), pool)
}

pub fn unconfigured_app() -> Router {
    app(AppState::new(None))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub raw: Vec<u8>,
    pub allow_origin: Option<String>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw).expect("response body is JSON")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("origin", "http://localhost:5173")
        .body(body)
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let raw = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();

    TestResponse { status, raw, allow_origin }
}

pub async fn admin(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> TestResponse {
    send(app, method, &format!("/api/admin?path={}", path), body).await
}

pub async fn league(
    app: &Router,
    method: Method,
    query: &str,
    body: Option<Value>,
) -> TestResponse {
    send(app, method, &format!("/api/league{}", query), body).await
}

pub async fn create_team(app: &Router, name: &str) -> i64 {
    let res = admin(app, Method::POST, "teams", Some(serde_json::json!({ "name": name }))).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.json()["id"].as_i64().expect("team id")
}

pub async fn create_match(app: &Router, home: &str, away: &str, date: &str, time: &str) -> i64 {
    let res = admin(
        app,
        Method::POST,
        "matches",
        Some(serde_json::json!({
            "homeTeam": home,
            "awayTeam": away,
            "date": date,
            "time": time,
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.json()["id"].as_i64().expect("match id")
}

pub async fn set_score(app: &Router, match_id: i64, home: i64, away: i64) {
    let res = league(
        app,
        Method::PUT,
        "",
        Some(serde_json::json!({ "matchId": match_id, "homeScore": home, "awayScore": away })),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
}

pub async fn count_matches(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM matches")
        .fetch_one(pool)
        .await
        .expect("match count")
}

pub async fn match_status(pool: &SqlitePool, match_id: i64) -> Option<String> {
    sqlx::query_scalar("SELECT status FROM matches WHERE id = ?")
        .bind(match_id)
        .fetch_optional(pool)
        .await
        .expect("match status")
}
