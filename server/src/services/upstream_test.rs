use super::*;

fn reply(status: u16, content_type: Option<&str>, body: &str) -> UpstreamReply {
    UpstreamReply {
        status: StatusCode::from_u16(status).unwrap(),
        content_type: content_type.map(str::to_owned),
        body: body.as_bytes().to_vec(),
    }
}

#[test]
fn json_content_type_is_detected_with_charset() {
    assert!(reply(200, Some("application/json; charset=utf-8"), "{}").is_json());
    assert!(!reply(200, Some("text/html"), "<p>").is_json());
    assert!(!reply(200, None, "{}").is_json());
}

#[test]
fn success_covers_2xx_only() {
    assert!(reply(201, None, "").is_success());
    assert!(!reply(302, None, "").is_success());
    assert!(!reply(404, None, "").is_success());
}

#[test]
fn json_parses_body_even_without_header() {
    let parsed = reply(200, None, r#"{"ok":true}"#).json().unwrap();
    assert_eq!(parsed["ok"], true);
}

#[test]
fn json_rejects_html() {
    let err = reply(502, Some("text/html"), "<html>bad gateway</html>").json().unwrap_err();
    assert!(matches!(err, UpstreamError::InvalidJson(_)));
}

#[test]
fn new_keeps_configured_base_url() {
    let config = ProxyConfig {
        port: 0,
        upstream_base_url: "http://127.0.0.1:9/api".into(),
        request_timeout: None,
        connect_timeout: std::time::Duration::from_secs(1),
    };
    let client = UpstreamClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:9/api");
}
