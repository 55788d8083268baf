//! Request normalization against live local servers.

mod common;

use std::time::Duration;

use apy::{AuthType, Endpoint, HttpMethod, Net, NetError, Request};
use serde_json::json;

fn net(auth: AuthType) -> Net {
    Net::new(Endpoint::new("", auth))
}

#[test]
fn valid_json_fills_body_and_leaves_log_empty() {
    let addr = common::spawn_api();
    let reply = net(AuthType::None).get(&format!("http://{addr}/json"));

    assert_eq!(reply.status, 200);
    assert_eq!(reply.log, None);
    assert_eq!(reply.body, json!({"stations": 42, "tags": ["jazz", "news"]}));
    assert_eq!(reply.headers.get("x-mock").map(String::as_str), Some("stats"));
    assert!(reply.is_success());
}

#[test]
fn invalid_json_is_a_soft_failure() {
    let addr = common::spawn_api();
    let reply = net(AuthType::None).get(&format!("http://{addr}/html"));

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, json!({}));
    assert!(matches!(reply.log, Some(NetError::BodyParse(_))));
    assert_eq!(
        reply.headers.get("content-type").map(String::as_str),
        Some("text/html")
    );
}

#[test]
fn error_status_keeps_real_status_and_headers() {
    let addr = common::spawn_api();
    let reply = net(AuthType::None).get(&format!("http://{addr}/missing"));

    assert_eq!(reply.status, 404);
    assert_eq!(reply.body, json!({}));
    assert_eq!(reply.headers.get("x-mock").map(String::as_str), Some("missing"));
    assert_eq!(
        reply.log,
        Some(NetError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string()
        })
    );
    assert_eq!(reply.log_message().as_deref(), Some("Not Found"));
}

#[test]
fn server_error_after_a_success_is_not_stale() {
    let addr = common::spawn_api();
    let net = net(AuthType::None);

    let first = net.get(&format!("http://{addr}/json"));
    assert_eq!(first.status, 200);

    let second = net.get(&format!("http://{addr}/broken"));
    assert_eq!(second.status, 500);
    assert_eq!(second.headers.get("x-mock"), None);
    assert_eq!(second.log_message().as_deref(), Some("Internal Server Error"));
}

#[test]
fn connection_refused_has_status_zero() {
    let addr = common::refused_addr();
    let reply = net(AuthType::None).get(&format!("http://{addr}/json"));

    assert_eq!(reply.status, 0);
    assert!(reply.headers.is_empty());
    assert_eq!(reply.body, json!({}));
    assert!(matches!(reply.log, Some(NetError::Transport(_))));
}

#[test]
fn truncated_body_is_reported() {
    let addr = common::spawn_truncating();
    let reply = net(AuthType::None).get(&format!("http://{addr}/"));

    assert_eq!(reply.status, 0);
    assert_eq!(reply.body, json!({}));
    assert!(matches!(reply.log, Some(NetError::Truncated(_))));
}

#[test]
fn request_timeout_is_a_transport_failure() {
    let addr = common::spawn_silent();
    let reply = net(AuthType::None)
        .execute(Request::get(format!("http://{addr}/")).timeout(Duration::from_millis(200)));

    assert_eq!(reply.status, 0);
    match reply.log {
        Some(NetError::Transport(reason)) => assert!(reason.starts_with("timed out")),
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[test]
fn token_is_sent_as_bearer_with_colon() {
    let addr = common::spawn_api();
    let reply = net(AuthType::Bearer("abc".into())).get(&format!("http://{addr}/echo"));

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["headers"]["authorization"], "Bearer: abc");
}

#[test]
fn caller_headers_are_merged_not_replaced() {
    let addr = common::spawn_api();
    let request = Request::new(HttpMethod::POST, format!("http://{addr}/echo"))
        .header("X-Trace", "7")
        .json(&json!({"name": "ada"}))
        .unwrap();
    let reply = net(AuthType::Bearer("abc".into())).execute(request);

    let echoed = &reply.body;
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["headers"]["x-trace"], "7");
    assert_eq!(echoed["headers"]["content-type"], "application/json");
    assert_eq!(echoed["headers"]["authorization"], "Bearer: abc");
    assert_eq!(echoed["body"], r#"{"name":"ada"}"#);
}

#[test]
fn no_token_means_no_authorization_header() {
    let addr = common::spawn_api();
    let reply = net(AuthType::None).get(&format!("http://{addr}/echo"));

    assert_eq!(reply.status, 200);
    assert!(reply.body["headers"].get("authorization").is_none());
}
