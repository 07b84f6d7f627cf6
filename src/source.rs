//! File acquisition
//!
//! Wraps the platform's asynchronous file read behind the [`FileSource`]
//! seam: a single-shot operation that yields the full decoded content
//! exactly once, or a tagged read failure exactly once. No partial content
//! is ever delivered.

use async_trait::async_trait;

use crate::document::{RawContent, SelectedFile};
use crate::error::PipelineError;

/// Trait for reading the content of a selected file
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Read the full content of `file`, decoded as UTF-8.
    ///
    /// Non-blocking from the caller's perspective; the only suspension point
    /// in the pipeline is here.
    async fn read(&self, file: &SelectedFile) -> Result<RawContent, PipelineError>;
}

/// Production source reading from the local filesystem via tokio
#[derive(Debug, Default)]
pub struct DiskSource;

impl DiskSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSource for DiskSource {
    async fn read(&self, file: &SelectedFile) -> Result<RawContent, PipelineError> {
        // Lossy decode: no size or type restriction is enforced here, so a
        // binary file passes through as garbage text for the parser to
        // reject.
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| PipelineError::read(&file.name, &e))?;
        Ok(RawContent::new(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_disk_source_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"{\"a\":1}")
            .unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        let content = DiskSource::new().read(&file).await.unwrap();
        assert_eq!(content.as_str(), "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_disk_source_missing_file_is_read_error() {
        let mut file = SelectedFile::with_name("missing.json");
        file.path = "/nonexistent/missing.json".into();

        let err = DiskSource::new().read(&file).await.unwrap_err();
        assert!(err.is_read());
    }

    #[tokio::test]
    async fn test_disk_source_binary_content_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        // Invalid UTF-8 is not a read failure; it decodes lossily.
        let content = DiskSource::new().read(&file).await.unwrap();
        assert!(content.as_str().contains('\u{fffd}'));
        assert!(content.as_str().ends_with('A'));
    }
}
