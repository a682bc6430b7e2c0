use super::*;
use crate::routes::test_support::{echo_upstream, html_upstream, json_upstream, proxy_for, proxy_to, unreachable_base};
use serde_json::{Value, json};

async fn get(url: String) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .get(url)
        .header("authorization", "Bearer t0k")
        .send()
        .await
        .unwrap();
    (resp.status().as_u16(), resp.json().await.unwrap())
}

fn is_mock(body: &Value) -> bool {
    body["clients"]
        .as_array()
        .is_some_and(|rows| rows.len() == 5 && rows[0]["name"] == "Taxi-001")
}

#[tokio::test]
async fn list_relays_json_with_authorization() {
    let base = proxy_for(echo_upstream()).await;
    let (status, body) = get(format!("{base}/api/taxi")).await;
    assert_eq!(status, 200);
    assert_eq!(body["path"], "/api/taxi");
    assert_eq!(body["authorization"], "Bearer t0k");
}

#[tokio::test]
async fn list_relays_json_error_status() {
    let base = proxy_for(json_upstream(StatusCode::UNAUTHORIZED, json!({"message": "expired"}))).await;
    let (status, body) = get(format!("{base}/api/taxi")).await;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "expired");
}

#[tokio::test]
async fn list_non_json_falls_back_to_mock() {
    let base = proxy_for(html_upstream(StatusCode::SERVICE_UNAVAILABLE)).await;
    let (status, body) = get(format!("{base}/api/taxi")).await;
    assert_eq!(status, 200);
    assert!(is_mock(&body));
}

#[tokio::test]
async fn list_unreachable_falls_back_to_mock() {
    let base = proxy_to(unreachable_base()).await;
    let (status, body) = get(format!("{base}/api/taxi")).await;
    assert_eq!(status, 200);
    assert!(is_mock(&body));
}

#[tokio::test]
async fn search_forwards_taxi_number() {
    let base = proxy_for(echo_upstream()).await;
    let (status, body) = get(format!("{base}/api/taxi/MH12AB1234")).await;
    assert_eq!(status, 200);
    assert_eq!(body["path"], "/api/taxi/MH12AB1234");
    assert_eq!(body["method"], "GET");
}

#[tokio::test]
async fn search_failure_is_500() {
    let base = proxy_to(unreachable_base()).await;
    let (status, body) = get(format!("{base}/api/taxi/MH12AB1234")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Failed to search taxi"}));
}

#[tokio::test]
async fn create_and_register_post_to_their_paths() {
    let base = proxy_for(echo_upstream()).await;
    let client = reqwest::Client::new();
    for (route, upstream_path) in [("/api/taxi", "/api/taxi"), ("/api/taxi/register", "/api/taxi/register")] {
        let resp = client
            .post(format!("{base}{route}"))
            .json(&json!({"taxi_number": "MH12AB1234"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], upstream_path);
        assert_eq!(body["body"]["taxi_number"], "MH12AB1234");
    }
}

#[tokio::test]
async fn register_non_json_reply_is_500() {
    let base = proxy_for(html_upstream(StatusCode::OK)).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/taxi/register"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"error": "Failed to register taxi"}));
}
