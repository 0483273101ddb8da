//! Integration tests for speaker feedback links and referral credits.

use std::io::Write;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use chrono::Duration;
use http::{Request, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use checkout_core::adapters::http::{api_router, AppState, SiteSettings};
use checkout_core::adapters::{
    InMemoryReferralLedger, JwtAccessTokenService, MockPaymentProvider, RecordingNotifier,
    YamlSpeakerDirectory,
};
use checkout_core::ports::{AccessTokenService, Referrer};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SPEAKERS_YAML: &str = r#"
speakers:
  - id: spk_1
    name: Grace Hopper
    email: grace@example.com
    feedback:
      - rating: 5
        comment: Brilliant
        sessionTitle: Compilers
        submittedAt: "2026-05-02T10:00:00Z"
      - rating: 4
        submittedAt: "2026-05-01T10:00:00Z"
  - id: spk_2
    name: Alan Kay
    email: alan@example.com
"#;

struct TestApp {
    router: Router,
    tokens: Arc<JwtAccessTokenService>,
    ledger: InMemoryReferralLedger,
    _speakers_file: tempfile::NamedTempFile,
}

fn test_app() -> TestApp {
    let mut speakers_file = tempfile::NamedTempFile::new().unwrap();
    speakers_file.write_all(SPEAKERS_YAML.as_bytes()).unwrap();

    let tokens = Arc::new(JwtAccessTokenService::new(&SecretString::new(
        "feedback-secret-0123456789abcdef".to_string(),
    )));
    let ledger = InMemoryReferralLedger::with_referrers([Referrer {
        id: "usr-ref".to_string(),
        email: "ref@example.com".to_string(),
    }]);

    let state = AppState {
        payment_provider: Arc::new(MockPaymentProvider::new()),
        notifier: Arc::new(RecordingNotifier::new()),
        speaker_directory: Arc::new(YamlSpeakerDirectory::new(speakers_file.path())),
        referral_ledger: Arc::new(ledger.clone()),
        access_tokens: tokens.clone(),
        site: Arc::new(SiteSettings::new("https://site.test")),
    };

    TestApp {
        router: api_router(state),
        tokens,
        ledger,
        _speakers_file: speakers_file,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Feedback Links
// =============================================================================

#[tokio::test]
async fn generated_link_can_be_redeemed() {
    let app = test_app();
    let (status, link) = send(
        &app.router,
        post_json("/generate-feedback-link", json!({"speakerId": "spk_1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["speaker"]["email"], "grace@example.com");
    let token = link["token"].as_str().unwrap();
    assert_eq!(
        link["feedbackUrl"],
        format!("https://site.test/feedback/speaker/{}", token)
    );

    let (status, body) = send(&app.router, get(&format!("/speaker-feedback/{}", token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["speaker"], json!({"id": "spk_1", "name": "Grace Hopper"}));
    assert_eq!(body["summary"]["count"], 2);
    assert_eq!(body["summary"]["averageRating"], 4.5);
    assert_eq!(body["feedback"][0]["comment"], "Brilliant");
}

#[tokio::test]
async fn speaker_without_feedback_has_empty_summary() {
    let app = test_app();
    let issued = app.tokens.issue("spk_2", Duration::days(1)).unwrap();

    let (status, body) = send(&app.router, get(&format!("/speaker-feedback/{}", issued.token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["count"], 0);
    assert!(body["summary"]["averageRating"].is_null());
}

#[tokio::test]
async fn unknown_speaker_link_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app.router,
        post_json("/generate-feedback-link", json!({"speakerId": "spk_nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_speaker_id_is_400() {
    let app = test_app();
    let (status, _) = send(
        &app.router,
        post_json("/generate-feedback-link", json!({"speakerId": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expired_and_tampered_tokens_get_same_401() {
    let app = test_app();
    let expired = app.tokens.issue("spk_1", Duration::seconds(-1)).unwrap();
    let valid = app.tokens.issue("spk_1", Duration::days(1)).unwrap();
    let mut tampered = valid.token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let (expired_status, expired_body) =
        send(&app.router, get(&format!("/speaker-feedback/{}", expired.token))).await;
    let (tampered_status, tampered_body) =
        send(&app.router, get(&format!("/speaker-feedback/{}", tampered))).await;

    assert_eq!(expired_status, StatusCode::UNAUTHORIZED);
    assert_eq!(tampered_status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired_body, tampered_body);
    assert_eq!(expired_body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn missing_feedback_token_is_400() {
    let app = test_app();
    for uri in ["/speaker-feedback/", "/speaker-feedback"] {
        let (status, body) = send(&app.router, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Missing token", "{uri}");
    }
}

#[tokio::test]
async fn token_for_deleted_speaker_is_404() {
    let app = test_app();
    let issued = app.tokens.issue("spk_deleted", Duration::days(1)).unwrap();

    let (status, _) = send(&app.router, get(&format!("/speaker-feedback/{}", issued.token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Referrals
// =============================================================================

#[tokio::test]
async fn referral_credits_referrer() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        post_json(
            "/referrals/process",
            json!({"referrerId": "usr-ref", "userId": "usr-new", "purchaseType": "workshop"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "referrer": {"id": "usr-ref", "email": "ref@example.com", "creditAmount": 200}})
    );
    assert_eq!(app.ledger.balance("usr-ref"), 200);
}

#[tokio::test]
async fn self_referral_is_400() {
    let app = test_app();
    let (status, _) = send(
        &app.router,
        post_json(
            "/referrals/process",
            json!({"referrerId": "usr-ref", "userId": "usr-ref", "purchaseType": "event"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.ledger.balance("usr-ref"), 0);
}

#[tokio::test]
async fn unknown_referrer_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app.router,
        post_json(
            "/referrals/process",
            json!({"referrerId": "usr-ghost", "userId": "usr-new", "purchaseType": "event"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
