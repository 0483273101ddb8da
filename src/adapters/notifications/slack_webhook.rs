//! Slack incoming-webhook notifier.
//!
//! Posts `{"text": ...}` to the configured webhook URL. The URL itself is a
//! credential and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{NotifyError, OpsNotifier};

#[derive(Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
}

/// Sends operator messages to a Slack incoming webhook.
pub struct SlackWebhookNotifier {
    webhook_url: SecretString,
    http_client: reqwest::Client,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: SecretString, timeout: Duration) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            webhook_url,
            http_client,
        })
    }
}

#[async_trait]
impl OpsNotifier for SlackWebhookNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .http_client
            .post(self.webhook_url.expose_secret())
            .json(&SlackMessage { text: message })
            .send()
            .await
            .map_err(|e| NotifyError::Unreachable(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!("Slack notification delivered");
        Ok(())
    }
}

impl std::fmt::Debug for SlackWebhookNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackWebhookNotifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier_for(server: &MockServer) -> SlackWebhookNotifier {
        let url = SecretString::new(format!("{}/services/T000/B000/XXX", server.uri()));
        SlackWebhookNotifier::new(url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn posts_text_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/T000/B000/XXX"))
            .and(body_json(serde_json::json!({"text": "hello ops"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        notifier_for(&server).send("hello ops").await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
            .mount(&server)
            .await;

        let err = notifier_for(&server).send("hello").await.unwrap_err();
        assert_eq!(err, NotifyError::Rejected { status: 404 });
    }

    #[tokio::test]
    async fn unreachable_host_does_not_leak_url() {
        let url = SecretString::new("http://127.0.0.1:1/services/SECRET".to_string());
        let notifier = SlackWebhookNotifier::new(url, Duration::from_millis(500)).unwrap();

        let err = notifier.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Unreachable(_)));
        assert!(!err.to_string().contains("SECRET"));
    }
}
