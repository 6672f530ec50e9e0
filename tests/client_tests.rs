//! Transport behaviour: headers, envelope handling, error mapping and retries

mod common;

use common::{api_error, client_for, ok, Canned, SequenceServer, TEST_API_KEY};
use httpmock::prelude::*;
use mailbreeze::{ListListsParams, MailBreeze, MailBreezeError, RetryConfig};
use serde_json::json;

fn stats_body() -> serde_json::Value {
    ok(json!({ "stats": { "sent": 10, "delivered": 9 } }))
}

#[tokio::test]
async fn test_sends_auth_and_content_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/emails/stats")
                .header("X-API-Key", TEST_API_KEY)
                .header("Content-Type", "application/json")
                .header("User-Agent", format!("mailbreeze-rust/{}", mailbreeze::VERSION));
            then.status(200).json_body(stats_body());
        })
        .await;

    let client = client_for(&server.base_url());
    let stats = client.emails().stats().await.unwrap();

    assert_eq!(stats.sent, 10);
    assert_eq!(stats.delivered, 9);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_encodes_query_parameters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/contact-lists")
                .query_param("page", "2")
                .query_param("limit", "5")
                .query_param("search", "news & offers");
            then.status(200)
                .json_body(ok(json!({ "items": [], "pagination": null })));
        })
        .await;

    let client = client_for(&server.base_url());
    let params = ListListsParams {
        page: Some(2),
        limit: Some(5),
        search: Some("news & offers".to_string()),
    };
    let page = client.lists().list(&params).await.unwrap();

    assert!(page.items.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/emails/stats");
            then.status(200).json_body(stats_body());
        })
        .await;

    let client = client_for(&format!("{}/api/v1/", server.base_url()));
    client.emails().stats().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_validation_error_keeps_details_and_request_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(400)
                .header("X-Request-Id", "req_123")
                .json_body(json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Invalid input",
                        "details": { "email": "must be valid" }
                    }
                }));
        })
        .await;

    let err = client_for(&server.base_url())
        .emails()
        .stats()
        .await
        .unwrap_err();

    assert!(matches!(err, MailBreezeError::Validation { .. }));
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "Invalid input");
    assert_eq!(err.request_id(), Some("req_123"));
    assert_eq!(err.details()["email"], json!("must be valid"));
    assert!(err.to_string().contains("[request_id=req_123]"));
}

#[tokio::test]
async fn test_status_codes_map_to_variants() {
    let cases = [
        (401, "AUTHENTICATION_ERROR"),
        (403, "FORBIDDEN"),
        (404, "NOT_FOUND"),
        (409, "UNKNOWN_ERROR"),
    ];

    for (status, code) in cases {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/emails/stats");
                then.status(status).json_body(api_error(code, "nope"));
            })
            .await;

        let err = client_for(&server.base_url())
            .emails()
            .stats()
            .await
            .unwrap_err();

        assert_eq!(err.code(), code, "status {}", status);
        assert_eq!(err.status_code(), status);
        assert!(!err.is_retryable());
        assert_eq!(mock.hits_async().await, 1);
    }
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(429)
                .header("Retry-After", "0")
                .json_body(api_error("RATE_LIMIT_EXCEEDED", "Too many requests"));
        })
        .await;

    let client = MailBreeze::builder()
        .api_key(TEST_API_KEY)
        .base_url(server.base_url())
        .max_retries(0)
        .build()
        .unwrap();
    let err = client.emails().stats().await.unwrap_err();

    assert!(matches!(err, MailBreezeError::RateLimit { .. }));
    assert_eq!(err.retry_after(), Some(0));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_success_false_becomes_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(200).json_body(json!({ "success": false }));
        })
        .await;

    let err = client_for(&server.base_url())
        .emails()
        .stats()
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Unknown error");
    assert_eq!(err.code(), "UNKNOWN_ERROR");
}

#[tokio::test]
async fn test_unparseable_error_body_uses_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let client = MailBreeze::builder()
        .api_key(TEST_API_KEY)
        .base_url(server.base_url())
        .max_retries(0)
        .build()
        .unwrap();
    let err = client.emails().stats().await.unwrap_err();

    assert_eq!(err.code(), "SERVER_ERROR");
    assert_eq!(err.status_code(), 502);
    assert_eq!(err.message(), "HTTP error: 502");
}

#[tokio::test]
async fn test_unparseable_success_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(200).body("not json");
        })
        .await;

    let err = client_for(&server.base_url())
        .emails()
        .stats()
        .await
        .unwrap_err();

    assert_eq!(err.code(), "PARSE_ERROR");
    assert_eq!(err.status_code(), 200);
}

#[tokio::test]
async fn test_data_shape_mismatch_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/em_1");
            then.status(200).json_body(ok(json!({ "id": 42 })));
        })
        .await;

    let err = client_for(&server.base_url())
        .emails()
        .get("em_1")
        .await
        .unwrap_err();

    assert_eq!(err.code(), "PARSE_ERROR");
}

#[tokio::test]
async fn test_no_content_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/contact-lists/list_1");
            then.status(204);
        })
        .await;

    client_for(&server.base_url())
        .lists()
        .delete("list_1")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_keys_are_redacted_from_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(401)
                .json_body(api_error("AUTHENTICATION_ERROR", "Invalid key sk_live_abcdef123"));
        })
        .await;

    let err = client_for(&server.base_url())
        .emails()
        .stats()
        .await
        .unwrap_err();

    assert!(!err.message().contains("sk_live_abcdef123"));
    assert!(err.message().contains("[REDACTED]"));
}

#[tokio::test]
async fn test_network_error_is_not_retried() {
    let client = client_for("http://127.0.0.1:1");
    let err = client.emails().stats().await.unwrap_err();

    assert_eq!(err.code(), "NETWORK_ERROR");
    assert_eq!(err.status_code(), 0);
    assert!(!err.is_retryable());
}

#[test_log::test(tokio::test)]
async fn test_retries_server_error_then_succeeds() {
    let server = SequenceServer::start(vec![
        Canned::new(500, api_error("SERVER_ERROR", "boom")),
        Canned::new(200, stats_body()),
    ])
    .await;

    let stats = client_for(&server.base_url)
        .emails()
        .stats()
        .await
        .unwrap();

    assert_eq!(stats.sent, 10);
    assert_eq!(server.hits(), 2);
}

#[test_log::test(tokio::test)]
async fn test_retries_rate_limit_then_succeeds() {
    let server = SequenceServer::start(vec![
        Canned::new(429, api_error("RATE_LIMIT_EXCEEDED", "slow down")).retry_after(1),
        Canned::new(200, stats_body()),
    ])
    .await;

    client_for(&server.base_url)
        .emails()
        .stats()
        .await
        .unwrap();

    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn test_client_errors_are_sent_once() {
    for status in [400, 401] {
        let server =
            SequenceServer::start(vec![Canned::new(status, api_error("ERR", "rejected"))]).await;

        let err = client_for(&server.base_url)
            .emails()
            .stats()
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), status);
        assert_eq!(server.hits(), 1);
    }
}

#[tokio::test]
async fn test_persistent_server_error_exhausts_retries() {
    let server = SequenceServer::start(vec![Canned::new(500, api_error("SERVER_ERROR", "down"))]).await;

    let err = client_for(&server.base_url)
        .emails()
        .stats()
        .await
        .unwrap_err();

    assert_eq!(err.code(), "SERVER_ERROR");
    assert_eq!(server.hits(), 4);
}

#[tokio::test]
async fn test_zero_retries_sends_once() {
    let server = SequenceServer::start(vec![Canned::new(503, api_error("SERVER_ERROR", "down"))]).await;

    let client = MailBreeze::builder()
        .api_key(TEST_API_KEY)
        .base_url(&server.base_url)
        .retry_config(RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        })
        .build()
        .unwrap();
    let err = client.emails().stats().await.unwrap_err();

    assert_eq!(err.status_code(), 503);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_concurrent_requests_share_client() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/emails/stats");
            then.status(200).json_body(stats_body());
        })
        .await;

    let client = client_for(&server.base_url());
    let handles: Vec<_> = (0..5)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.emails().stats().await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(mock.hits_async().await, 5);
}
