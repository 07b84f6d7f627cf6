//! Diagnostic event surface
//!
//! The pipeline emits lifecycle signals to an [`EventSink`]. Signals are
//! diagnostics only; they never affect control flow.

use crate::document::SelectedFile;
use crate::error::PipelineError;

/// Sink for pipeline lifecycle signals.
///
/// All methods default to no-ops so implementations only override what they
/// care about.
pub trait EventSink: Send + Sync {
    /// A read was issued for `file`
    fn read_started(&self, _file: &SelectedFile) {}

    /// The read resolved with `bytes` of decoded content
    fn read_completed(&self, _file: &SelectedFile, _bytes: usize) {}

    /// The read failed; the parser will not run for this selection
    fn read_failed(&self, _file: &SelectedFile, _error: &PipelineError) {}

    /// The parse attempt produced a document of `nodes` nodes
    fn parse_succeeded(&self, _file: &SelectedFile, _nodes: usize) {}

    /// The parse attempt failed
    fn parse_failed(&self, _file: &SelectedFile, _error: &PipelineError) {}
}

/// Default sink emitting structured tracing events
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn read_started(&self, file: &SelectedFile) {
        tracing::info!(file = %file.name, size = file.size, "read started");
    }

    fn read_completed(&self, file: &SelectedFile, bytes: usize) {
        tracing::info!(file = %file.name, bytes, "read completed");
    }

    fn read_failed(&self, file: &SelectedFile, error: &PipelineError) {
        tracing::warn!(file = %file.name, %error, "read failed");
    }

    fn parse_succeeded(&self, file: &SelectedFile, nodes: usize) {
        tracing::info!(file = %file.name, nodes, "parsed document");
    }

    fn parse_failed(&self, file: &SelectedFile, error: &PipelineError) {
        tracing::warn!(file = %file.name, %error, "parse failed");
    }
}

/// No-op sink used when diagnostics are disabled
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {}
