//! Integration tests for ranking HTTP endpoints.
//!
//! These tests drive the full router in-process:
//! 1. Example bodies round-trip through the POST routes
//! 2. Results serialize decimals as strings, ordered by rank
//! 3. Input and numeric errors map to the documented status codes

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mcdm_engine::adapters::build_router;
use mcdm_engine::config::AppConfig;
use mcdm_engine::logging;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    logging::init_test();
    build_router(&AppConfig::default())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn ranked_options(body: &Value) -> Vec<String> {
    body["ranking"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["option"].as_str().unwrap().to_string())
        .collect()
}

fn laptop_topsis_body() -> Value {
    json!({
        "options": ["Laptop A", "Laptop B", "Laptop C"],
        "criteria": [
            {"name": "Price", "is_negative": true, "weight": 0.4,
             "scores": {"Laptop A": 999, "Laptop B": 1299, "Laptop C": 799}},
            {"name": "Performance", "weight": "0.35",
             "scores": {"Laptop A": 85, "Laptop B": 95, "Laptop C": 70}},
            {"name": "Battery", "weight": "0.25",
             "scores": {"Laptop A": 8, "Laptop B": 6, "Laptop C": 10}}
        ]
    })
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn topsis_ranks_laptops() {
    let (status, body) = post("/api/rankings/topsis", &laptop_topsis_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ranked_options(&body)[0], "Laptop C");
    let rank: f64 = body["ranking"][0]["rank"].as_str().unwrap().parse().unwrap();
    assert_eq!(rank, 1.0);
    assert!(body["ranking"][0]["performance_score"].is_string());
    assert_eq!(body["weighted_scores"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn every_example_is_accepted_by_its_route() {
    for method in ["topsis", "fuzzy-topsis", "promethee", "fuzzy-promethee", "ahp", "fuzzy-ahp"] {
        let (status, example) = get(&format!("/api/methods/{}/example", method)).await;
        assert_eq!(status, StatusCode::OK, "example for {}", method);

        let (status, body) = post(&format!("/api/rankings/{}", method), &example).await;
        assert_eq!(status, StatusCode::OK, "ranking for {}: {}", method, body);
        assert_eq!(ranked_options(&body).len(), 3, "ranking for {}", method);
    }
}

#[tokio::test]
async fn ahp_reports_consistency() {
    let (_, example) = get("/api/methods/ahp/example").await;
    let (status, body) = post("/api/rankings/ahp", &example).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_consistent"], true);
    assert_eq!(body["consistency_threshold"], "0.10");
    assert_eq!(body["weights"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn promethee_flows_are_returned() {
    let mut request = laptop_topsis_body();
    request["preference_functions"] = json!([
        {"criterion": "Price", "function": "linear",
         "indifference_threshold": 50, "preference_threshold": 300}
    ]);
    let (status, body) = post("/api/rankings/promethee", &request).await;

    assert_eq!(status, StatusCode::OK);
    let flows = body["flows"].as_array().unwrap();
    assert_eq!(flows.len(), 3);
    assert!(flows.iter().all(|f| f["leaving"].is_string() && f["net"].is_string()));
}

#[tokio::test]
async fn unknown_method_example_is_not_found() {
    let (status, body) = get("/api/methods/electre/example").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn missing_score_is_bad_request() {
    let mut request = laptop_topsis_body();
    request["criteria"][2]["scores"]["Laptop B"] = Value::Null;
    let (status, body) = post("/api/rankings/topsis", &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_INPUT");
    assert!(body["message"].as_str().unwrap().contains("Laptop B / Battery"));
}

#[tokio::test]
async fn out_of_order_fuzzy_number_is_bad_request() {
    let (_, mut example) = get("/api/methods/fuzzy-topsis/example").await;
    example["decision_makers"][0]["weights"]["Price"] = json!([9, 8, 7]);
    let (status, body) = post("/api/rankings/fuzzy-topsis", &example).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rankings/ahp")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zero_weights_are_unprocessable() {
    let mut request = laptop_topsis_body();
    for criterion in request["criteria"].as_array_mut().unwrap() {
        criterion["weight"] = json!(0);
    }
    let (status, body) = post("/api/rankings/promethee", &request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "DIVISION_BY_ZERO");
    assert!(body["details"]["context"].is_string());
}
