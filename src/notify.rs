//! Push notifications announcing a published preview.
//!
//! Notifications are posted as JSON to an ntfy-compatible endpoint. A
//! notification is best effort: a rejected request or a network error is
//! logged and reported as [`NotifyOutcome::Failed`], never raised.

use crate::config::PreviewConfig;
use crate::models::{Notification, NotifyOutcome};
use crate::utils::human_timestamp;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};
use url::Url;

/// Trait for delivering a [`Notification`].
pub trait Notifier {
    /// Send `notification` exactly once.
    async fn notify(&self, notification: &Notification) -> NotifyOutcome;
}

/// Build the "preview ready" notification for a deployed page.
///
/// # Arguments
///
/// * `config` - Supplies priority, tags, and display title
/// * `topic` - Topic subscribers listen on
/// * `title` - Preview title, quoted in the message body
/// * `url` - Deployed URL, used as the click-through target
/// * `at` - Instant shown in the message, rendered in local time
pub fn compose_notification(
    config: &PreviewConfig,
    topic: &str,
    title: &str,
    url: &str,
    at: DateTime<Utc>,
) -> Notification {
    Notification {
        topic: topic.to_string(),
        message: format!(
            "Preview deployed successfully!\n\nTitle: {}\nTimestamp: {}",
            title,
            human_timestamp(at)
        ),
        priority: config.notify_priority,
        tags: config.notify_tags.clone(),
        title: config.notify_title.clone(),
        click: Some(url.to_string()),
    }
}

/// [`Notifier`] posting to an ntfy server's JSON publish endpoint.
#[derive(Debug, Clone)]
pub struct NtfyClient {
    client: Client,
    endpoint: Url,
}

impl NtfyClient {
    /// Create a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be constructed
    /// (for example, TLS backend initialisation).
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &PreviewConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.notify_url.clone(), config.notify_timeout)
    }
}

impl Notifier for NtfyClient {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint, topic = %notification.topic))]
    async fn notify(&self, notification: &Notification) -> NotifyOutcome {
        let t0 = Instant::now();
        let res = self
            .client
            .post(self.endpoint.clone())
            .json(notification)
            .send()
            .await;
        let dt = t0.elapsed();

        match res {
            Ok(resp) if resp.status().is_success() => {
                info!(elapsed_ms = dt.as_millis(), status = %resp.status(), "Notification sent");
                NotifyOutcome::Delivered
            }
            Ok(resp) => {
                let status = resp.status();
                warn!(elapsed_ms = dt.as_millis(), %status, "Notification rejected");
                NotifyOutcome::Failed {
                    reason: format!("notification service responded {}", status),
                }
            }
            Err(e) => {
                error!(elapsed_ms = dt.as_millis(), error = %e, "Notification request failed");
                NotifyOutcome::Failed {
                    reason: format!("notification request failed: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use httpmock::prelude::*;
    use serde_json::json;

    fn notification() -> Notification {
        Notification {
            topic: "dev-preview".to_string(),
            message: "Preview deployed successfully!".to_string(),
            priority: 3,
            tags: vec!["🔍".to_string(), "preview".to_string()],
            title: Some("🔍 Preview Ready".to_string()),
            click: Some("https://app-rhapdev/preview-x.html".to_string()),
        }
    }

    fn client_for(server: &MockServer) -> NtfyClient {
        let endpoint = Url::parse(&server.url("/")).unwrap();
        NtfyClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_compose_notification_links_deployed_url() {
        let config = PreviewConfig::default();
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 51, 7).unwrap();
        let n = compose_notification(&config, "dev-preview", "Demo", "https://b/k.html", at);

        assert_eq!(n.topic, "dev-preview");
        assert_eq!(n.click.as_deref(), Some("https://b/k.html"));
        assert_eq!(n.priority, 3);
        assert_eq!(n.tags, vec!["🔍", "preview"]);
        assert_eq!(n.title.as_deref(), Some("🔍 Preview Ready"));
        assert!(n.message.starts_with("Preview deployed successfully!\n\nTitle: Demo\nTimestamp: "));
    }

    #[tokio::test]
    async fn test_posts_json_body_once() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/")
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "topic": "dev-preview",
                        "message": "Preview deployed successfully!",
                        "priority": 3,
                        "tags": ["🔍", "preview"],
                        "title": "🔍 Preview Ready",
                        "click": "https://app-rhapdev/preview-x.html"
                    }));
                then.status(200).body("{}");
            })
            .await;

        let outcome = client_for(&server).notify(&notification()).await;

        assert_eq!(outcome, NotifyOutcome::Delivered);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_soft_failure() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/");
                then.status(500);
            })
            .await;

        let outcome = client_for(&server).notify(&notification()).await;

        match outcome {
            NotifyOutcome::Failed { reason } => assert!(reason.contains("500")),
            other => panic!("expected failure, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_soft_failure() {
        let endpoint = Url::parse("http://127.0.0.1:1/").unwrap();
        let client = NtfyClient::new(endpoint, Duration::from_secs(2)).unwrap();

        let outcome = client.notify(&notification()).await;

        match outcome {
            NotifyOutcome::Failed { reason } => {
                assert!(reason.starts_with("notification request failed"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
