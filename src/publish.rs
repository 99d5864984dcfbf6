//! Uploading the rendered page to object storage.
//!
//! The upload is delegated to an external sync tool (`rclone` by default),
//! which owns the bucket credentials and remote aliases. This module only
//! decides the object key, runs the tool once, and turns the exit status into
//! a [`PublishOutcome`].
//!
//! # Design Pattern
//!
//! [`Publisher`] is the seam between the orchestrator and the outside world.
//! [`RcloneSync`] is the production implementation; tests substitute their
//! own implementors.
//!
//! # Failure Policy
//!
//! A failed upload is an expected outcome, not an error: the tool may be
//! missing, misconfigured, or offline. Every failure is logged and reported
//! as [`PublishOutcome::Failed`]; nothing propagates to the caller.

use crate::config::PreviewConfig;
use crate::models::PublishOutcome;
use crate::utils::{key_safe_timestamp, truncate_for_log};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

/// Bytes of sync tool output kept in logs and failure reasons.
const OUTPUT_LOG_LIMIT: usize = 2_000;

/// Trait for pushing a local file to a bucket.
pub trait Publisher {
    /// Copy `local_path` to `bucket` under `remote_key`.
    ///
    /// # Returns
    ///
    /// [`PublishOutcome::Published`] with the public URL on success, or
    /// [`PublishOutcome::Failed`] with a diagnostic message.
    async fn publish(&self, local_path: &Path, bucket: &str, remote_key: &str) -> PublishOutcome;
}

/// Object key for a page published at `at`, e.g. `preview-2026-10-18T09-51-07-123Z.html`.
pub fn remote_key(at: DateTime<Utc>) -> String {
    format!("preview-{}.html", key_safe_timestamp(at))
}

/// Public URL of `remote_key` in `bucket`.
///
/// The bucket name doubles as the public host name.
pub fn public_url(bucket: &str, remote_key: &str) -> String {
    format!("https://{}/{}", bucket, remote_key)
}

/// [`Publisher`] backed by an rclone-compatible command line tool.
///
/// Runs `<program> copyto <local> <remote>:<bucket>/<key> --progress`.
#[derive(Debug, Clone)]
pub struct RcloneSync {
    /// Executable name or path.
    program: String,
    /// Remote alias configured in the tool, e.g. `r2`.
    remote: String,
    /// Upper bound on the whole subprocess run.
    timeout: Duration,
}

impl RcloneSync {
    pub fn new(program: impl Into<String>, remote: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            remote: remote.into(),
            timeout,
        }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(&config.sync_program, &config.remote, config.sync_timeout)
    }

    /// Tool-specific destination, e.g. `r2:app-rhapdev/preview-….html`.
    fn destination(&self, bucket: &str, remote_key: &str) -> String {
        format!("{}:{}/{}", self.remote, bucket, remote_key)
    }
}

impl Publisher for RcloneSync {
    #[instrument(level = "info", skip_all, fields(local = %local_path.display(), %bucket, %remote_key))]
    async fn publish(&self, local_path: &Path, bucket: &str, remote_key: &str) -> PublishOutcome {
        let destination = self.destination(bucket, remote_key);
        info!(program = %self.program, %destination, "Starting upload");

        let t0 = Instant::now();
        let mut cmd = Command::new(&self.program);
        cmd.arg("copyto")
            .arg(local_path)
            .arg(&destination)
            .arg("--progress")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!(program = %self.program, error = %e, "Failed to run sync tool");
                return PublishOutcome::Failed {
                    reason: format!("failed to run {}: {}", self.program, e),
                };
            }
            Err(_) => {
                error!(program = %self.program, timeout = ?self.timeout, "Sync tool timed out; killed");
                return PublishOutcome::Failed {
                    reason: format!("{} timed out after {:?}", self.program, self.timeout),
                };
            }
        };
        let dt = t0.elapsed();

        debug!(
            stdout = %truncate_for_log(&String::from_utf8_lossy(&output.stdout), OUTPUT_LOG_LIMIT),
            "Sync tool stdout"
        );

        if output.status.success() {
            let url = public_url(bucket, remote_key);
            info!(elapsed_ms = dt.as_millis(), %url, "Upload succeeded");
            return PublishOutcome::Published { url };
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = truncate_for_log(stderr.trim(), OUTPUT_LOG_LIMIT);
        error!(
            elapsed_ms = dt.as_millis(),
            status = %output.status,
            %stderr,
            "Upload failed"
        );

        let reason = if stderr.is_empty() {
            format!("{} exited with {}", self.program, output.status)
        } else {
            format!("{} exited with {}: {}", self.program, output.status, stderr)
        };
        PublishOutcome::Failed { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 51, 7).unwrap() + chrono::Duration::milliseconds(42)
    }

    #[test]
    fn test_remote_key_is_url_safe() {
        let key = remote_key(at());
        assert_eq!(key, "preview-2026-10-18T09-51-07-042Z.html");
        assert_eq!(key.matches('.').count(), 1);
        assert!(!key.contains(':'));
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("app-rhapdev", "preview-x.html"),
            "https://app-rhapdev/preview-x.html"
        );
    }

    #[test]
    fn test_destination_uses_remote_alias() {
        let sync = RcloneSync::new("rclone", "r2", Duration::from_secs(1));
        assert_eq!(
            sync.destination("app-rhapdev", "preview-x.html"),
            "r2:app-rhapdev/preview-x.html"
        );
    }

    #[test]
    fn test_from_config_copies_settings() {
        let config = PreviewConfig::default();
        let sync = RcloneSync::from_config(&config);
        assert_eq!(sync.program, "rclone");
        assert_eq!(sync.remote, "r2");
        assert_eq!(sync.timeout, config.sync_timeout);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_publishes_url() {
        let sync = RcloneSync::new("true", "r2", Duration::from_secs(10));
        let outcome = sync
            .publish(&PathBuf::from("dist/preview.html"), "app-rhapdev", "preview-x.html")
            .await;
        assert_eq!(
            outcome,
            PublishOutcome::Published {
                url: "https://app-rhapdev/preview-x.html".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_fails_without_url() {
        let sync = RcloneSync::new("false", "r2", Duration::from_secs(10));
        let outcome = sync
            .publish(&PathBuf::from("dist/preview.html"), "app-rhapdev", "preview-x.html")
            .await;
        match outcome {
            PublishOutcome::Failed { reason } => assert!(reason.starts_with("false exited with")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stderr_is_kept_in_reason() {
        // `ls` rejects `--progress` and says so on stderr
        let sync = RcloneSync::new("ls", "r2", Duration::from_secs(10));
        let outcome = sync
            .publish(&PathBuf::from("dist/preview.html"), "app-rhapdev", "preview-x.html")
            .await;
        match outcome {
            PublishOutcome::Failed { reason } => {
                assert!(reason.starts_with("ls exited with"));
                assert!(reason.contains(": "));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_a_failed_outcome() {
        let sync = RcloneSync::new("definitely-not-a-sync-tool-12345", "r2", Duration::from_secs(10));
        let outcome = sync
            .publish(&PathBuf::from("dist/preview.html"), "app-rhapdev", "preview-x.html")
            .await;
        match outcome {
            PublishOutcome::Failed { reason } => {
                assert!(reason.starts_with("failed to run definitely-not-a-sync-tool-12345"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_is_a_failed_outcome() {
        let sync = RcloneSync::new("true", "r2", Duration::ZERO);
        let outcome = sync
            .publish(&PathBuf::from("dist/preview.html"), "app-rhapdev", "preview-x.html")
            .await;
        match outcome {
            PublishOutcome::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
