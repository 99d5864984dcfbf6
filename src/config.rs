//! Runtime configuration for a preview run.
//!
//! Every default the tool relies on lives in [`PreviewConfig`]. The CLI
//! overlays its flags and environment variables on top of
//! [`PreviewConfig::default`]; there is no configuration file.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TITLE: &str = "Development Preview";
pub const DEFAULT_CONTENT: &str =
    "<h2>Hello from preview tool!</h2><p>This is a test preview page.</p>";
pub const DEFAULT_BUCKET: &str = "app-rhapdev";
pub const DEFAULT_TOPIC: &str = "dev-preview";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const PREVIEW_FILE_NAME: &str = "preview.html";
pub const DEFAULT_SYNC_PROGRAM: &str = "rclone";
pub const DEFAULT_REMOTE: &str = "r2";
pub const DEFAULT_NOTIFY_URL: &str = "https://ntfy.rhappsody.com/";
pub const DEFAULT_PRIORITY: u8 = 3;
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Settings shared by every step of the pipeline.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Title used when none is given.
    pub default_title: String,
    /// Content fragment used when none is given.
    pub default_content: String,
    pub default_bucket: String,
    pub default_topic: String,
    /// Directory the page is written into, relative to the working directory.
    pub output_dir: PathBuf,
    /// File name inside `output_dir`.
    pub file_name: String,
    /// Executable used to upload the page.
    pub sync_program: String,
    /// Remote alias as known to the sync tool's own configuration.
    pub remote: String,
    /// Upper bound on the upload subprocess.
    pub sync_timeout: Duration,
    /// Notification endpoint receiving the JSON POST.
    pub notify_url: Url,
    pub notify_priority: u8,
    pub notify_tags: Vec<String>,
    /// Display title of the notification.
    pub notify_title: Option<String>,
    /// Upper bound on the notification request.
    pub notify_timeout: Duration,
    /// Skip upload and notification.
    pub local_only: bool,
}

impl PreviewConfig {
    /// Full path of the rendered page.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            default_content: DEFAULT_CONTENT.to_string(),
            default_bucket: DEFAULT_BUCKET.to_string(),
            default_topic: DEFAULT_TOPIC.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: PREVIEW_FILE_NAME.to_string(),
            sync_program: DEFAULT_SYNC_PROGRAM.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            sync_timeout: Duration::from_secs(DEFAULT_SYNC_TIMEOUT_SECS),
            notify_url: Url::parse(DEFAULT_NOTIFY_URL).expect("default notify URL is valid"),
            notify_priority: DEFAULT_PRIORITY,
            notify_tags: vec!["🔍".to_string(), "preview".to_string()],
            notify_title: Some("🔍 Preview Ready".to_string()),
            notify_timeout: Duration::from_secs(DEFAULT_NOTIFY_TIMEOUT_SECS),
            local_only: false,
        }
    }
}
