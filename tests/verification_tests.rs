//! Verification resource tests

mod common;

use common::{client_for, ok};
use httpmock::prelude::*;
use mailbreeze::{BatchVerifyParams, VerificationResult};
use serde_json::json;

#[tokio::test]
async fn test_verify_single_email() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/email-verification/single")
                .json_body(json!({ "email": "ada@example.com" }));
            then.status(200).json_body(ok(json!({
                "email": "ada@example.com",
                "is_valid": true,
                "result": "valid",
                "reason": "accepted_email",
                "cached": false,
                "risk_score": 3
            })));
        })
        .await;

    let result = client_for(&server.base_url())
        .verification()
        .verify("ada@example.com")
        .await
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.result, Some(VerificationResult::Valid));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_requires_email() {
    let client = client_for("http://127.0.0.1:1");
    let err = client.verification().verify(" ").await.unwrap_err();
    assert_eq!(err.code(), "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_batch_verify() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/email-verification/batch")
                .json_body(json!({ "emails": ["a@example.com", "b@example.com"] }));
            then.status(200).json_body(ok(json!({
                "verification_id": "ver_1",
                "total_emails": 2,
                "credits_deducted": 2,
                "status": "processing"
            })));
        })
        .await;

    let params = BatchVerifyParams::new(["a@example.com", "b@example.com"]);
    let batch = client_for(&server.base_url())
        .verification()
        .batch(&params)
        .await
        .unwrap();

    assert_eq!(batch.verification_id, "ver_1");
    assert_eq!(batch.credits_deducted, 2);
    assert!(batch.results.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_batch_includes_results() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/email-verification/ver_1")
                .query_param("includeResults", "true");
            then.status(200).json_body(ok(json!({
                "verification_id": "ver_1",
                "total_emails": 1,
                "status": "completed",
                "results": [{ "email": "a@example.com", "is_valid": false, "result": "invalid" }],
                "analytics": { "valid": 0, "invalid": 1, "risky": 0, "unknown": 0 }
            })));
        })
        .await;

    let batch = client_for(&server.base_url())
        .verification()
        .get("ver_1")
        .await
        .unwrap();

    let results = batch.results.unwrap();
    assert_eq!(results[0].result, Some(VerificationResult::Invalid));
    assert_eq!(batch.analytics.unwrap().invalid, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_verifications() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/email-verification");
            then.status(200).json_body(ok(json!({
                "items": [
                    { "id": "ver_1", "type": "batch", "status": "completed", "totalEmails": 10, "progress": 100 }
                ]
            })));
        })
        .await;

    let items = client_for(&server.base_url())
        .verification()
        .list()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].total_emails, 10);
}

#[tokio::test]
async fn test_list_verifications_without_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/email-verification");
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;

    let items = client_for(&server.base_url())
        .verification()
        .list()
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_verifications_with_null_items() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/email-verification");
            then.status(200).json_body(ok(json!({ "items": null })));
        })
        .await;

    let items = client_for(&server.base_url())
        .verification()
        .list()
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_verifications_null_counters() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/email-verification");
            then.status(200).json_body(ok(json!({
                "items": [
                    { "id": "ver_2", "status": "processing", "totalEmails": null, "progress": null }
                ]
            })));
        })
        .await;

    let items = client_for(&server.base_url())
        .verification()
        .list()
        .await
        .unwrap();

    assert_eq!(items[0].total_emails, 0);
    assert_eq!(items[0].progress, 0);
}

#[tokio::test]
async fn test_verification_stats() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/email-verification/stats");
            then.status(200).json_body(ok(json!({
                "totalVerified": 500,
                "totalValid": 400,
                "totalInvalid": 50,
                "creditsRemaining": 1000
            })));
        })
        .await;

    let stats = client_for(&server.base_url())
        .verification()
        .stats()
        .await
        .unwrap();

    assert_eq!(stats.total_verified, 500);
    assert_eq!(stats.valid, 400);
    assert_eq!(stats.invalid, 50);
    assert_eq!(stats.credits_remaining, 1000);
}
