//! Content parser
//!
//! Strict JSON decoding of raw file content into a [`ParsedDocument`].
//! Synchronous and pure: no pre-validation, no partial or best-effort
//! parse, and any malformed input (unterminated structures, invalid tokens,
//! empty input) becomes a tagged [`PipelineError::Parse`] rather than a
//! panic.

use crate::document::{ParsedDocument, RawContent};
use crate::error::PipelineError;

/// Parse `content` as strict JSON.
///
/// Standard grammar only: objects, arrays, strings, numbers, booleans,
/// null. No comments, no trailing commas, no extensions. Object key order
/// is preserved as encountered; duplicate keys resolve last-write-wins.
pub fn parse_document(content: &RawContent) -> Result<ParsedDocument, PipelineError> {
    serde_json::from_str::<serde_json::Value>(content.as_str())
        .map(ParsedDocument::new)
        .map_err(|e| PipelineError::parse(&e))
}
