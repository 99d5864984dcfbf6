//! Writing the rendered page to disk.
//!
//! The page always lands at the configured output path; its directory is
//! created on demand and an existing file is overwritten.

use crate::error::PreviewError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `html` to `path`, creating the parent directory if needed.
///
/// A relative `path` is resolved against the working directory first.
///
/// # Returns
///
/// The absolute path of the written file.
///
/// # Errors
///
/// [`PreviewError::ResolvePath`] if the working directory cannot be read,
/// [`PreviewError::CreateDir`] if the directory cannot be created,
/// [`PreviewError::Write`] if the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_preview(html: &str, path: &Path) -> Result<PathBuf, PreviewError> {
    let path = std::path::absolute(path).map_err(|source| PreviewError::ResolvePath {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring output directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(error = %e, "Failed to create output dir");
            return Err(PreviewError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    }

    fs::write(&path, html)
        .await
        .map_err(|source| PreviewError::Write {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), bytes = html.len(), "Wrote preview HTML");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_nested_directory() {
        let tmp = tempdir().unwrap();
        let out = tmp.path().join("a").join("dist");

        let path = write_preview("<p>one</p>", &out.join("preview.html"))
            .await
            .unwrap();

        assert_eq!(path, out.join("preview.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>one</p>");
    }

    #[tokio::test]
    async fn test_second_write_overwrites_first() {
        let tmp = tempdir().unwrap();
        let out = tmp.path().join("dist");

        write_preview("<p>first render, longer</p>", &out.join("preview.html"))
            .await
            .unwrap();
        let path = write_preview("<p>second</p>", &out.join("preview.html"))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>second</p>");
    }

    #[tokio::test]
    async fn test_directory_under_a_file_fails() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_preview("<p>x</p>", &blocker.join("dist").join("preview.html"))
            .await
            .unwrap_err();

        assert!(matches!(err, PreviewError::CreateDir { .. }));
        assert!(err.to_string().contains("not-a-dir"));
    }

    #[tokio::test]
    async fn test_target_is_a_directory_fails_on_write() {
        let tmp = tempdir().unwrap();
        let out = tmp.path().join("dist");
        std::fs::create_dir_all(out.join("preview.html")).unwrap();

        let err = write_preview("<p>x</p>", &out.join("preview.html"))
            .await
            .unwrap_err();

        assert!(matches!(err, PreviewError::Write { .. }));
    }
}
