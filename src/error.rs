//! Errors that abort a preview run.
//!
//! Only local generation can fail hard. Upload and notification problems are
//! routine outcomes and are reported through [`crate::models::PublishOutcome`]
//! and [`crate::models::NotifyOutcome`] instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to resolve output path {path}: {source}")]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preview to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
