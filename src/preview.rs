//! Preview pipeline orchestration.
//!
//! Runs the steps of a preview in a fixed order:
//!
//! 1. **Render**: Build the HTML document from the request
//! 2. **Write**: Store it at `{output_dir}/{file_name}`
//! 3. **Publish**: Upload it to the bucket under a timestamped key
//! 4. **Notify**: Announce the public URL (only if step 3 produced one)
//!
//! Only steps 1 and 2 can fail the run. A failed upload leaves the run
//! successful without a deployed URL, and the notification outcome never
//! changes the result.

use crate::config::PreviewConfig;
use crate::models::{NotifyOutcome, PreviewRequest, PreviewResult, PublishOutcome};
use crate::notify::{Notifier, compose_notification};
use crate::outputs::{html::render_preview, local::write_preview};
use crate::publish::{Publisher, remote_key};
use crate::status;
use crate::utils::iso_timestamp;
use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

/// Run one preview end to end.
///
/// # Arguments
///
/// * `request` - Title, content, bucket, and topic for this run
/// * `config` - Output location and remote settings
/// * `publisher` - Uploads the written file
/// * `notifier` - Announces the deployed URL
///
/// # Returns
///
/// A [`PreviewResult`]; `success` is `false` only when local generation failed.
#[instrument(level = "info", skip_all, fields(title = %request.title, bucket = %request.bucket))]
pub async fn create_preview<P, N>(
    request: &PreviewRequest,
    config: &PreviewConfig,
    publisher: &P,
    notifier: &N,
) -> PreviewResult
where
    P: Publisher,
    N: Notifier,
{
    status::step("🎨 Generating HTML preview...");
    let html = render_preview(&request.title, &request.content, Utc::now());
    debug!(bytes = html.len(), "Rendered preview");

    let local_path = match write_preview(&html, &config.output_path()).await {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "Local generation failed");
            status::failure(format!("❌ Preview creation failed: {}", e));
            return PreviewResult::failed(e.to_string(), iso_timestamp(Utc::now()));
        }
    };
    status::success(format!("✅ HTML generated: {}", local_path.display()));

    if config.local_only {
        info!("Local-only run; skipping upload and notification");
        return PreviewResult::generated(&local_path, None, iso_timestamp(Utc::now()));
    }

    let key = remote_key(Utc::now());
    status::step(format!(
        "📤 Deploying {} to {}/{}...",
        local_path.display(),
        request.bucket,
        key
    ));
    let deployed_url = match publisher.publish(&local_path, &request.bucket, &key).await {
        PublishOutcome::Published { url } => {
            status::success("✅ Successfully deployed");
            status::step(format!("🔗 URL: {}", url));
            Some(url)
        }
        PublishOutcome::Failed { reason } => {
            warn!(%reason, "Upload failed; continuing without a deployed URL");
            status::failure(format!("❌ Deployment failed: {}", reason));
            None
        }
    };

    match &deployed_url {
        Some(url) if !request.notify_topic.is_empty() => {
            let notification = compose_notification(
                config,
                &request.notify_topic,
                &request.title,
                url,
                Utc::now(),
            );
            match notifier.notify(&notification).await {
                NotifyOutcome::Delivered => status::success(format!(
                    "✅ Notification sent to topic: {}",
                    request.notify_topic
                )),
                NotifyOutcome::Failed { reason } => {
                    status::warning(format!("⚠️ Notification failed: {}", reason))
                }
            }
        }
        Some(_) => debug!("No notification topic; skipping notification"),
        None => debug!("Nothing deployed; skipping notification"),
    }

    PreviewResult::generated(&local_path, deployed_url, iso_timestamp(Utc::now()))
}
