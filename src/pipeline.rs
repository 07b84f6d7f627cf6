//! Pipeline composition
//!
//! Wires a selection event through file acquisition and the content parser
//! into the shared viewer state: selection -> async read -> on success,
//! synchronous parse -> atomic state commit. Read failure short-circuits;
//! the parser never runs for a failed read. A superseded selection's late
//! result is discarded by the state holder's ticket check.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::document::SelectedFile;
use crate::events::{EventSink, NullSink, TracingSink};
use crate::parser::parse_document;
use crate::source::{DiskSource, FileSource};
use crate::state::{ViewSnapshot, ViewerState};

/// The ingestion pipeline: file acquisition, content parsing, and state
/// wiring for a single "current selection" slot.
pub struct Pipeline {
    state: Arc<ViewerState>,
    source: Arc<dyn FileSource>,
    sink: Arc<dyn EventSink>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Pipeline {
    /// Build a pipeline reading from disk, with diagnostics routed to
    /// tracing (or dropped, per `config.diagnostics.enabled`).
    pub fn new(config: Config) -> Self {
        let sink: Arc<dyn EventSink> = if config.diagnostics.enabled {
            Arc::new(TracingSink)
        } else {
            Arc::new(NullSink)
        };
        Self::with_parts(Arc::new(DiskSource::new()), sink)
    }

    /// Build a pipeline from explicit collaborators (tests and embedders)
    pub fn with_parts(source: Arc<dyn FileSource>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            state: Arc::new(ViewerState::new()),
            source,
            sink,
        }
    }

    /// Shared viewer state for display collaborators
    pub fn state(&self) -> Arc<ViewerState> {
        Arc::clone(&self.state)
    }

    /// Read-only view of the current outcome
    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.snapshot()
    }

    /// Register a selection and start its read, without waiting.
    ///
    /// The returned handle resolves when this selection's pipeline run has
    /// either committed or been discarded as stale. Issuing a new selection
    /// while one is outstanding supersedes it for display purposes; the
    /// in-flight read may still complete, but its result is dropped.
    pub fn select(&self, file: SelectedFile) -> JoinHandle<()> {
        let ticket = self.state.begin(file.clone());
        let state = Arc::clone(&self.state);
        let source = Arc::clone(&self.source);
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            sink.read_started(&file);

            let result = match source.read(&file).await {
                Ok(content) => {
                    sink.read_completed(&file, content.len());
                    match parse_document(&content) {
                        Ok(document) => {
                            sink.parse_succeeded(&file, document.node_count());
                            Ok(document)
                        }
                        Err(error) => {
                            sink.parse_failed(&file, &error);
                            Err(error)
                        }
                    }
                }
                Err(error) => {
                    sink.read_failed(&file, &error);
                    Err(error)
                }
            };

            if !state.complete(ticket, result) {
                tracing::debug!(file = %file.name, "selection superseded, result dropped");
            }
        })
    }

    /// Select a file and wait for its pipeline run to finish, returning the
    /// resulting snapshot. Convenience for sequential callers (the CLI).
    pub async fn run(&self, file: SelectedFile) -> ViewSnapshot {
        if let Err(e) = self.select(file).await {
            tracing::warn!(%e, "pipeline task failed to join");
        }
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RawContent;
    use crate::error::PipelineError;
    use crate::events::recording::RecordingSink;
    use async_trait::async_trait;
    use serde_json::json;
    use std::io;

    /// Source serving canned content keyed by file name
    struct CannedSource;

    #[async_trait]
    impl FileSource for CannedSource {
        async fn read(&self, file: &SelectedFile) -> Result<RawContent, PipelineError> {
            match file.name.as_str() {
                "good.json" => Ok(RawContent::new(r#"{"a":1,"b":[true,false,null]}"#)),
                "bad.json" => Ok(RawContent::new("not valid json")),
                "empty.json" => Ok(RawContent::new("")),
                _ => Err(PipelineError::read(
                    &file.name,
                    &io::Error::other("device error"),
                )),
            }
        }
    }

    fn pipeline(sink: Arc<RecordingSink>) -> Pipeline {
        Pipeline::with_parts(Arc::new(CannedSource), sink)
    }

    #[tokio::test]
    async fn test_valid_file_yields_document() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink));

        let snapshot = pipeline.run(SelectedFile::with_name("good.json")).await;
        assert_eq!(
            snapshot.document.map(|d| d.root().clone()),
            Some(json!({"a": 1, "b": [true, false, null]}))
        );
        assert!(snapshot.error.is_none());
        assert_eq!(
            sink.events(),
            [
                "read_started:good.json",
                "read_completed:good.json",
                "parse_succeeded:good.json"
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_content_yields_parse_error() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink));

        let snapshot = pipeline.run(SelectedFile::with_name("bad.json")).await;
        assert!(snapshot.document.is_none());
        assert!(snapshot.error.is_some_and(|e| e.is_parse()));
        assert_eq!(
            sink.events(),
            [
                "read_started:bad.json",
                "read_completed:bad.json",
                "parse_failed:bad.json"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_content_is_parse_error() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink));

        let snapshot = pipeline.run(SelectedFile::with_name("empty.json")).await;
        assert!(snapshot.error.is_some_and(|e| e.is_parse()));
    }

    #[tokio::test]
    async fn test_read_failure_never_invokes_parser() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink));

        let snapshot = pipeline.run(SelectedFile::with_name("missing.json")).await;
        assert!(snapshot.document.is_none());
        assert!(snapshot.error.is_some_and(|e| e.is_read()));
        // No parse event of either kind after a failed read.
        assert_eq!(
            sink.events(),
            ["read_started:missing.json", "read_failed:missing.json"]
        );
    }

    #[tokio::test]
    async fn test_new_selection_replaces_prior_outcome() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink));

        pipeline.run(SelectedFile::with_name("bad.json")).await;
        let snapshot = pipeline.run(SelectedFile::with_name("good.json")).await;
        assert!(snapshot.error.is_none());
        assert!(snapshot.document.is_some());
        assert_eq!(snapshot.file_name.as_deref(), Some("good.json"));
    }
}
