//! Command-line interface definitions for the preview tool.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also be provided through `PREVIEW_*` environment variables.

use crate::config::{
    DEFAULT_NOTIFY_TIMEOUT_SECS, DEFAULT_PRIORITY, DEFAULT_SYNC_TIMEOUT_SECS, PreviewConfig,
};
use crate::models::PreviewRequest;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Command-line arguments for the preview tool.
///
/// # Examples
///
/// ```sh
/// # Default title and placeholder content
/// preview_drop
///
/// # Custom page
/// preview_drop "Demo" "<p>hi</p>"
///
/// # Different bucket, no notification
/// preview_drop "Demo" "<p>hi</p>" --bucket previews.example.com --topic ""
///
/// # Only write dist/preview.html
/// preview_drop "Demo" "<p>hi</p>" --local-only
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page title, used for <title> and the heading
    pub title: Option<String>,

    /// HTML fragment for the page body (inserted as-is)
    pub content: Option<String>,

    /// Bucket to upload to; also the host of the public URL
    #[arg(long, env = "PREVIEW_BUCKET")]
    pub bucket: Option<String>,

    /// Notification topic (empty string disables notifications)
    #[arg(long, env = "PREVIEW_TOPIC")]
    pub topic: Option<String>,

    /// Remote alias configured in the sync tool
    #[arg(long, env = "PREVIEW_REMOTE")]
    pub remote: Option<String>,

    /// Sync tool executable
    #[arg(long, env = "PREVIEW_SYNC_PROGRAM")]
    pub sync_program: Option<String>,

    /// Notification service endpoint
    #[arg(long, env = "PREVIEW_NOTIFY_URL")]
    pub notify_url: Option<Url>,

    /// Notification priority (1 = min, 5 = max)
    #[arg(long, default_value_t = DEFAULT_PRIORITY, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub priority: u8,

    /// Directory the page is written to
    #[arg(long, env = "PREVIEW_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seconds to wait for the sync tool before killing it
    #[arg(long, default_value_t = DEFAULT_SYNC_TIMEOUT_SECS)]
    pub sync_timeout_secs: u64,

    /// Seconds to wait for the notification service
    #[arg(long, default_value_t = DEFAULT_NOTIFY_TIMEOUT_SECS)]
    pub notify_timeout_secs: u64,

    /// Only write the page locally; skip upload and notification
    #[arg(long)]
    pub local_only: bool,

    /// Print the result record as JSON after the status lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Split the parsed arguments into the run's request and configuration,
    /// filling anything left unset from [`PreviewConfig::default`].
    pub fn into_parts(self) -> (PreviewRequest, PreviewConfig) {
        let defaults = PreviewConfig::default();

        let request = PreviewRequest {
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| defaults.default_title.clone()),
            content: self
                .content
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| defaults.default_content.clone()),
            bucket: self
                .bucket
                .unwrap_or_else(|| defaults.default_bucket.clone()),
            notify_topic: self
                .topic
                .unwrap_or_else(|| defaults.default_topic.clone()),
        };

        let config = PreviewConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir.clone()),
            sync_program: self.sync_program.unwrap_or(defaults.sync_program.clone()),
            remote: self.remote.unwrap_or(defaults.remote.clone()),
            sync_timeout: Duration::from_secs(self.sync_timeout_secs),
            notify_url: self.notify_url.unwrap_or(defaults.notify_url.clone()),
            notify_priority: self.priority,
            notify_timeout: Duration::from_secs(self.notify_timeout_secs),
            local_only: self.local_only,
            ..defaults
        };

        (request, config)
    }
}
