//! Webhook notification delivery
//!
//! Posts the formatted message to the notification channel as a multipart
//! form. The raw upstream payload always rides along as a `.json` file
//! attachment; the human-readable text goes inline unless it exceeds the
//! channel's 2000-character content limit, in which case it is re-routed
//! whole into a `.txt` attachment, never split or shortened. Empty text
//! short-circuits to success without touching the network.

use crate::error::{Error, Result};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Longest text the channel accepts as inline message content
pub const INLINE_CONTENT_LIMIT: usize = 2000;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers formatted messages to the notification webhook
pub struct Notifier {
    http: reqwest::Client,
    webhook_url: Url,
}

impl Notifier {
    /// Create a notifier for the given webhook URL
    ///
    /// # Errors
    /// Returns a configuration error if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(webhook_url: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("ziu-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
                key: None,
            })?;

        Ok(Self { http, webhook_url })
    }

    /// Deliver the formatted text plus the raw payload attachment
    ///
    /// A no-op success when `text` is empty: nothing new to report means
    /// no network call at all.
    ///
    /// # Errors
    /// Returns [`Error::Delivery`] on transport failure or any response
    /// status other than 200/204.
    pub async fn deliver(&self, text: &str, raw_payload: &str) -> Result<()> {
        if text.is_empty() {
            debug!("Nothing new to report, skipping delivery");
            return Ok(());
        }

        let mut form = Form::new();
        let mut file_index = 0;

        if !raw_payload.is_empty() {
            let part = Part::text(raw_payload.to_string())
                .file_name("message.json")
                .mime_str("application/json")
                .map_err(|e| Error::Delivery {
                    reason: format!("failed to build payload attachment: {e}"),
                })?;
            form = form.part(format!("files[{file_index}]"), part);
            file_index += 1;
        }

        if text.chars().count() > INLINE_CONTENT_LIMIT {
            debug!(
                chars = text.chars().count(),
                "Text exceeds inline limit, attaching as file"
            );
            let part = Part::text(text.to_string())
                .file_name("message.txt")
                .mime_str("text/plain")
                .map_err(|e| Error::Delivery {
                    reason: format!("failed to build text attachment: {e}"),
                })?;
            form = form.part(format!("files[{file_index}]"), part);
        } else {
            form = form.text("content", text.to_string());
        }

        let response = self
            .http
            .post(self.webhook_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Delivery {
                reason: format!("webhook unreachable: {e}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Webhook rejected the message");
            return Err(Error::Delivery {
                reason: format!("unexpected response status: {status}"),
            });
        }

        debug!("Message delivered to webhook");
        Ok(())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn notifier_against(server: &MockServer) -> Notifier {
        let url = Url::parse(&format!("{}/hook", server.uri())).unwrap();
        Notifier::new(url).unwrap()
    }

    async fn mount_hook(server: &MockServer, status: u16, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    async fn last_request_body(server: &MockServer) -> String {
        let requests = server.received_requests().await.unwrap();
        let request = requests.last().expect("webhook received no request");
        String::from_utf8_lossy(&request.body).into_owned()
    }

    #[tokio::test]
    async fn empty_text_skips_the_network_entirely() {
        let server = MockServer::start().await;
        mount_hook(&server, 204, 0).await;

        let notifier = notifier_against(&server).await;
        notifier.deliver("", r#"{"some":"payload"}"#).await.unwrap();
        // expect(0) verifies on drop that no request arrived
    }

    #[tokio::test]
    async fn short_text_goes_inline_with_the_payload_attachment() {
        let server = MockServer::start().await;
        mount_hook(&server, 204, 1).await;

        let notifier = notifier_against(&server).await;
        notifier.deliver("Nowe wyniki!", "[]").await.unwrap();

        let body = last_request_body(&server).await;
        assert!(body.contains("name=\"content\""));
        assert!(body.contains("Nowe wyniki!"));
        assert!(body.contains("name=\"files[0]\""));
        assert!(body.contains("filename=\"message.json\""));
        assert!(!body.contains("filename=\"message.txt\""));
    }

    #[tokio::test]
    async fn text_at_exactly_the_limit_stays_inline() {
        let server = MockServer::start().await;
        mount_hook(&server, 200, 1).await;

        let notifier = notifier_against(&server).await;
        let text = "a".repeat(INLINE_CONTENT_LIMIT);
        notifier.deliver(&text, "[]").await.unwrap();

        let body = last_request_body(&server).await;
        assert!(body.contains("name=\"content\""));
        assert!(!body.contains("filename=\"message.txt\""));
    }

    #[tokio::test]
    async fn text_over_the_limit_becomes_a_file_attachment() {
        let server = MockServer::start().await;
        mount_hook(&server, 204, 1).await;

        let notifier = notifier_against(&server).await;
        let text = "a".repeat(INLINE_CONTENT_LIMIT + 1);
        notifier.deliver(&text, "[]").await.unwrap();

        let body = last_request_body(&server).await;
        assert!(body.contains("name=\"files[1]\""));
        assert!(body.contains("filename=\"message.txt\""));
        assert!(
            body.contains(&text),
            "the formatted text itself must land in the attachment"
        );
        assert!(!body.contains("name=\"content\""));
    }

    #[tokio::test]
    async fn limit_counts_characters_not_bytes() {
        let server = MockServer::start().await;
        mount_hook(&server, 204, 1).await;

        let notifier = notifier_against(&server).await;
        // 2000 two-byte characters: over the limit in bytes, at it in chars.
        let text = "ą".repeat(INLINE_CONTENT_LIMIT);
        notifier.deliver(&text, "[]").await.unwrap();

        let body = last_request_body(&server).await;
        assert!(body.contains("name=\"content\""));
    }

    #[tokio::test]
    async fn oversized_text_without_payload_takes_the_first_file_slot() {
        let server = MockServer::start().await;
        mount_hook(&server, 204, 1).await;

        let notifier = notifier_against(&server).await;
        let text = "a".repeat(INLINE_CONTENT_LIMIT + 1);
        notifier.deliver(&text, "").await.unwrap();

        let body = last_request_body(&server).await;
        assert!(body.contains("name=\"files[0]\""));
        assert!(body.contains("filename=\"message.txt\""));
        assert!(!body.contains("filename=\"message.json\""));
    }

    #[tokio::test]
    async fn both_success_statuses_are_accepted() {
        for status in [200_u16, 204] {
            let server = MockServer::start().await;
            mount_hook(&server, status, 1).await;

            let notifier = notifier_against(&server).await;
            notifier.deliver("ok", "[]").await.unwrap();
        }
    }

    #[tokio::test]
    async fn rejection_status_is_a_delivery_error() {
        let server = MockServer::start().await;
        mount_hook(&server, 400, 1).await;

        let notifier = notifier_against(&server).await;
        let err = notifier.deliver("ok", "[]").await.unwrap_err();
        match err {
            Error::Delivery { reason } => assert!(reason.contains("400")),
            other => panic!("expected Delivery, got {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_webhook_is_a_delivery_error() {
        let url = Url::parse("http://127.0.0.1:9/hook").unwrap();
        let notifier = Notifier::new(url).unwrap();
        let err = notifier.deliver("ok", "[]").await.unwrap_err();
        assert!(matches!(err, Error::Delivery { .. }));
    }
}
