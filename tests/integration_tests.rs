// Integration tests: HTTP endpoints

use axum_test::TestServer;
use serde_json::{Value, json};
use voldash::config::AppConfig;
use voldash::routes;

const TEST_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[dashboard]
capacity_field = "storageCapacity"
default_time_span = "Last 1 hour"
max_densify_ticks = 1000
"#;

fn test_server() -> TestServer {
    let config = AppConfig::load_from_str(TEST_CONFIG).unwrap();
    TestServer::new(routes::app(config))
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("Hello from voldash!");
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = test_server();
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("voldash"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_sort_capacity_uses_configured_field() {
    let server = test_server();
    let response = server
        .post("/api/capacity/sort")
        .json(&json!([
            { "storageCapacity": "10Gi" },
            null,
            { "storageCapacity": "1Ki" },
        ]))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!([
        { "storageCapacity": "1Ki" },
        { "storageCapacity": "10Gi" },
        null,
    ]));
}

#[tokio::test]
async fn test_sort_capacity_with_field_and_direction() {
    let server = test_server();
    let response = server
        .post("/api/capacity/sort")
        .add_query_param("field", "size")
        .add_query_param("direction", "desc")
        .json(&json!([{ "size": "1Mi" }, { "size": "1Gi" }]))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!([{ "size": "1Gi" }, { "size": "1Mi" }]));
}

#[tokio::test]
async fn test_sort_capacity_unknown_direction_is_identity() {
    let server = test_server();
    let body = json!([{ "storageCapacity": "1Gi" }, { "storageCapacity": "1Ki" }]);
    let response = server
        .post("/api/capacity/sort")
        .add_query_param("direction", "sideways")
        .json(&body)
        .await;
    response.assert_json(&body);
}

#[tokio::test]
async fn test_densify_endpoint() {
    let server = test_server();
    let response = server
        .post("/api/series/densify")
        .json(&json!({
            "samples": [[0, 0], [1, 1], [3, 3]],
            "startingTimestamp": 0,
            "sampleDuration": 4,
            "sampleFrequency": 1,
        }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!([[0, 0.0], [1, 1.0], [2, null], [3, 3.0]]));
}

#[tokio::test]
async fn test_densify_endpoint_without_frequency_is_empty() {
    let server = test_server();
    let response = server
        .post("/api/series/densify")
        .json(&json!({
            "samples": [[0, 0]],
            "startingTimestamp": 0,
            "sampleDuration": 4,
        }))
        .await;
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_densify_endpoint_rejects_oversized_window() {
    let server = test_server();
    let response = server
        .post("/api/series/densify")
        .json(&json!({
            "samples": [[0, 1]],
            "startingTimestamp": 0,
            "sampleDuration": 100_000_000_000_000i64,
            "sampleFrequency": 1,
        }))
        .expect_failure()
        .await;
    response.assert_status_bad_request();
    let json: Value = response.json();
    assert_eq!(
        json["error"],
        "window of 100000000000000 ticks exceeds the limit of 1000"
    );
}

#[tokio::test]
async fn test_densify_endpoint_accepts_window_at_the_limit() {
    let server = test_server();
    let response = server
        .post("/api/series/densify")
        .json(&json!({
            "samples": [[0, 1]],
            "startingTimestamp": 0,
            "sampleDuration": 1000,
            "sampleFrequency": 1,
        }))
        .await;
    response.assert_status_ok();
    let points: Vec<Value> = response.json();
    assert_eq!(points.len(), 1000);
}

fn prom_body(start: i64) -> Value {
    json!({
        "status": "success",
        "data": {
            "resultType": "matrix",
            "result": [{ "metric": {}, "values": [[start, "536870912"], [start + 2, "1073741824"]] }]
        }
    })
}

#[tokio::test]
async fn test_volume_metrics_usage_uses_default_span() {
    let server = test_server();
    let start = 1_600_000_000;
    let response = server
        .post("/api/volumes/metrics")
        .add_query_param("metric", "usage")
        .add_query_param("start", start)
        .add_query_param("capacity", "2Gi")
        .json(&prom_body(start))
        .await;
    response.assert_status_ok();
    let points: Vec<Value> = response.json();
    assert_eq!(points.len(), 3600);
    assert_eq!(points[0]["value"], json!(25.0));
    assert_eq!(points[0]["type"], "y");
    assert!(points[1]["value"].is_null());
    assert_eq!(points[2]["value"], json!(50.0));
}

#[tokio::test]
async fn test_volume_metrics_rejects_unknown_metric() {
    let server = test_server();
    let response = server
        .post("/api/volumes/metrics")
        .add_query_param("metric", "temperature")
        .json(&prom_body(0))
        .expect_failure()
        .await;
    response.assert_status_bad_request();
    let json: Value = response.json();
    assert_eq!(json["error"], "unknown metric: temperature");
}

#[tokio::test]
async fn test_volume_metrics_rejects_unknown_span() {
    let server = test_server();
    let response = server
        .post("/api/volumes/metrics")
        .add_query_param("metric", "latency")
        .add_query_param("span", "Last 2 weeks")
        .json(&prom_body(0))
        .expect_failure()
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_age_endpoint() {
    let server = test_server();
    let response = server.get("/api/age").add_query_param("ms", 3_601_000).await;
    response.assert_json(&json!({ "age": "1h1s" }));

    let response = server.get("/api/age").add_query_param("ms", 999).await;
    response.assert_json(&json!({ "age": null }));
}

#[tokio::test]
async fn test_sort_search_endpoint() {
    let server = test_server();
    let response = server
        .get("/api/sort-search")
        .add_query_param("field", "status")
        .add_query_param("desc", true)
        .await;
    response.assert_json(&json!({ "search": "?sort=status&desc=true" }));

    let response = server.get("/api/sort-search").await;
    response.assert_json(&json!({ "search": "?" }));
}
