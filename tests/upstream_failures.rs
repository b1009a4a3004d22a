//! Failure injection for the webhook leg.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

fn action() -> Value {
    json!({"action": "get_board", "username": "alice", "pin": "1234", "board_code": "ABCD"})
}

#[tokio::test]
async fn test_refused_connection_is_bad_gateway() {
    let dead = common::closed_addr().await;
    let proxy = common::start_proxy(common::config_for(Some(format!("http://{}/hook", dead)))).await;

    let res = common::client()
        .post(proxy.board_url())
        .json(&action())
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"ok": false, "error": "Could not reach n8n webhook."}));
}

#[tokio::test]
async fn test_hanging_webhook_times_out() {
    let silent = common::start_silent_backend().await;
    let mut config = common::config_for(Some(format!("http://{}/hook", silent)));
    config.timeouts.upstream_secs = 1;
    config.timeouts.request_secs = 10;
    let proxy = common::start_proxy(config).await;

    let start = Instant::now();
    let res = common::client()
        .post(proxy.board_url())
        .json(&action())
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(start.elapsed() < Duration::from_secs(5), "upstream timeout should apply");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Could not reach n8n webhook.");
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let dead = common::closed_addr().await;
    let proxy = common::start_proxy(common::config_for(Some(format!("http://{}/hook", dead)))).await;
    let client = common::client();

    let mut handles = Vec::new();
    for i in 0..10 {
        let client = client.clone();
        let url = proxy.board_url();
        handles.push(tokio::spawn(async move {
            // Alternate valid and invalid payloads.
            let body = if i % 2 == 0 {
                action()
            } else {
                json!({"action": "get_board", "username": "alice"})
            };
            client.post(url).json(&body).send().await.unwrap().status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::BAD_GATEWAY).count(), 5);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(), 5);
}
