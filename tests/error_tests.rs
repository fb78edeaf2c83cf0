// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use folio_relay::error::{CandidateFailure, RelayError};
use http_body_util::BodyExt;
use serde_json::{json, Value};

async fn render(error: RelayError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        RelayError::Configuration("Missing HF_TOKEN".to_string()),
        RelayError::MalformedRequest("expected value".to_string()),
        RelayError::AllCandidatesExhausted {
            tried: vec!["a".to_string()],
            last_error: None,
        },
        RelayError::Knowledge("bad profile".to_string()),
        RelayError::Internal("boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_exhausted_display_lists_candidates() {
    let error = RelayError::AllCandidatesExhausted {
        tried: vec!["org/a".to_string(), "org/b".to_string()],
        last_error: None,
    };
    assert!(format!("{}", error).contains("org/a, org/b"));
}

#[test]
fn test_candidate_failure_display() {
    let http = CandidateFailure {
        status: Some(503),
        model: "org/a".to_string(),
        raw: "busy".to_string(),
    };
    assert_eq!(http.to_string(), "org/a returned HTTP 503");

    let transport = CandidateFailure {
        status: None,
        model: "org/b".to_string(),
        raw: "connection refused".to_string(),
    };
    assert!(transport.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_configuration_error_response() {
    let (status, body) = render(RelayError::Configuration("Missing HF_TOKEN".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Missing HF_TOKEN" }));
}

#[tokio::test]
async fn test_malformed_request_response() {
    let (status, body) = render(RelayError::MalformedRequest("EOF while parsing".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Chat route error");
    assert_eq!(body["details"], "EOF while parsing");
}

#[tokio::test]
async fn test_exhausted_response_shape() {
    let (status, body) = render(RelayError::AllCandidatesExhausted {
        tried: vec!["a".to_string(), "b".to_string()],
        last_error: Some(CandidateFailure {
            status: Some(404),
            model: "b".to_string(),
            raw: "nope".to_string(),
        }),
    })
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No supported model found for your enabled providers.");
    assert_eq!(body["tried"], json!(["a", "b"]));
    assert_eq!(body["lastError"], json!({ "status": 404, "model": "b", "raw": "nope" }));
}

#[tokio::test]
async fn test_other_errors_carry_details() {
    let (status, body) = render(RelayError::Knowledge("profile missing".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "knowledge");
    assert!(body["details"].as_str().unwrap().contains("profile missing"));
}
