use super::*;
use crate::routes::test_support::{echo_upstream, html_upstream, json_upstream, proxy_for, proxy_to, unreachable_base};
use serde_json::{Value, json};

async fn list_users(base: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .get(format!("{base}/api/userlist"))
        .header("authorization", "Bearer admin")
        .send()
        .await
        .unwrap();
    (resp.status().as_u16(), resp.json().await.unwrap())
}

fn is_mock(body: &Value) -> bool {
    body["data"].as_array().is_some_and(|rows| rows.len() == 3 && rows[0]["role"] == "admin")
}

#[tokio::test]
async fn list_forwards_authorization() {
    let base = proxy_for(echo_upstream()).await;
    let (status, body) = list_users(&base).await;
    assert_eq!(status, 200);
    assert_eq!(body["path"], "/api/userlist");
    assert_eq!(body["authorization"], "Bearer admin");
}

#[tokio::test]
async fn list_forbidden_falls_back_to_mock() {
    let base = proxy_for(json_upstream(StatusCode::FORBIDDEN, json!({"message": "admins only"}))).await;
    let (status, body) = list_users(&base).await;
    assert_eq!(status, 200);
    assert!(is_mock(&body));
}

#[tokio::test]
async fn list_html_falls_back_to_mock() {
    let base = proxy_for(html_upstream(StatusCode::OK)).await;
    let (_, body) = list_users(&base).await;
    assert!(is_mock(&body));
}

#[tokio::test]
async fn list_unreachable_falls_back_to_mock() {
    let base = proxy_to(unreachable_base()).await;
    let (status, body) = list_users(&base).await;
    assert_eq!(status, 200);
    assert!(is_mock(&body));
}
