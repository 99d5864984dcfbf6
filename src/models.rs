//! Data models for a single preview run.
//!
//! This module defines the values that flow through the pipeline:
//! - [`PreviewRequest`]: What to render and where to send it
//! - [`PreviewResult`]: The record returned to the CLI and optionally printed as JSON
//! - [`PublishOutcome`] / [`NotifyOutcome`]: Results of the two best-effort remote steps
//! - [`Notification`]: The JSON body posted to the notification service
//!
//! Nothing here outlives the process.

use serde::Serialize;
use std::path::Path;

/// The user-facing inputs of one run.
///
/// Values missing on the command line are filled from
/// [`crate::config::PreviewConfig`] before the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    /// Heading and `<title>` of the page. Inserted verbatim.
    pub title: String,
    /// HTML fragment placed in the content block. Inserted verbatim.
    pub content: String,
    /// Destination bucket; also the host of the public URL.
    pub bucket: String,
    /// Notification topic. An empty topic disables notification.
    pub notify_topic: String,
}

/// Outcome of a preview run.
///
/// `deployed_url` can only be set on a successful result and `error` only on a
/// failed one; the two constructors are the only way to build a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployed_url: Option<String>,
    /// ISO-8601 UTC time the result was produced.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PreviewResult {
    /// Local generation succeeded. `deployed_url` is `None` when the upload was
    /// skipped or failed.
    pub fn generated(local_path: &Path, deployed_url: Option<String>, timestamp: String) -> Self {
        Self {
            success: true,
            local_path: Some(local_path.display().to_string()),
            deployed_url,
            timestamp,
            error: None,
        }
    }

    /// Local generation failed; nothing was uploaded.
    pub fn failed(error: impl Into<String>, timestamp: String) -> Self {
        Self {
            success: false,
            local_path: None,
            deployed_url: None,
            timestamp,
            error: Some(error.into()),
        }
    }
}

/// Result of pushing the local file to the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The sync tool exited cleanly; `url` is the public location.
    Published { url: String },
    /// Upload did not happen. `reason` is meant for logs and the console.
    Failed { reason: String },
}

/// Result of posting a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Delivered,
    Failed { reason: String },
}

/// JSON body accepted by the notification service.
///
/// `title` and `click` are omitted from the payload when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub topic: String,
    pub message: String,
    pub priority: u8,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<String>,
}
