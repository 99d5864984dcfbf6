//! # Preview Drop
//!
//! A one-shot developer tool that renders a static HTML preview page, uploads
//! it to an object-storage bucket with an rclone-compatible sync tool, and
//! announces the public URL on an ntfy topic.
//!
//! ## Usage
//!
//! ```sh
//! preview_drop "Demo" "<p>hi</p>"
//! ```
//!
//! ## Architecture
//!
//! Each run is a straight pipeline:
//! 1. **Render**: Build the HTML document
//! 2. **Write**: Store it as `dist/preview.html`
//! 3. **Publish**: Copy it to `<remote>:<bucket>/preview-<timestamp>.html`
//! 4. **Notify**: POST the public URL to the notification service
//!
//! Only a failure in steps 1-2 makes the process exit non-zero.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod notify;
mod outputs;
mod preview;
mod publish;
mod status;
mod utils;

use cli::Cli;
use notify::NtfyClient;
use preview::create_preview;
use publish::RcloneSync;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // Parse CLI
    let args = Cli::parse();
    let print_json = args.json;
    let (request, config) = args.into_parts();
    debug!(?request, ?config, "Parsed CLI arguments");

    let publisher = RcloneSync::from_config(&config);
    let notifier = NtfyClient::from_config(&config)?;

    status::step(format!("🚀 Creating preview: \"{}\"", request.title));
    let result = create_preview(&request, &config, &publisher, &notifier).await;

    if result.success {
        status::success("\n🎉 Preview created successfully!");
        if let Some(url) = &result.deployed_url {
            status::step(format!("🔗 URL: {}", url));
        }
    } else {
        status::failure(format!(
            "\n❌ Preview creation failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        ));
    }

    if print_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    let elapsed = start_time.elapsed();
    info!(
        success = result.success,
        deployed = result.deployed_url.is_some(),
        millis = elapsed.as_millis(),
        "Execution complete"
    );

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
