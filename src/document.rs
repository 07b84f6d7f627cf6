//! Data model for the ingestion pipeline
//!
//! A selection moves through three shapes: the opaque [`SelectedFile`]
//! handle, the fully-read [`RawContent`] text, and the validated
//! [`ParsedDocument`] tree.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Handle to a user-chosen local file, captured at selection time.
///
/// Immutable: a new selection produces a new handle, it never mutates the
/// previous one.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Display name (final path component)
    pub name: String,
    /// Full path to the file on disk
    pub path: PathBuf,
    /// Byte size as reported by metadata at selection time
    pub size: u64,
    /// MIME hint guessed from the extension, if any
    pub mime: Option<String>,
}

impl SelectedFile {
    /// Create a handle from a path, reading size from file metadata.
    ///
    /// Fails only if the metadata lookup fails; the content itself is not
    /// touched here.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = guess_mime(path);
        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
            mime,
        })
    }

    /// Create a handle without touching the filesystem (tests and
    /// non-disk sources).
    pub fn with_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            size: 0,
            mime: None,
        }
    }
}

/// MIME hint from the file extension. Advisory only; nothing in the
/// pipeline gates on it.
fn guess_mime(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "json" => "application/json",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Fully-read text content of a selected file.
///
/// Owned by the pipeline until handed to the parser; not retained after a
/// parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent(String);

impl RawContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes of the decoded text
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RawContent {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Validated JSON document tree.
///
/// Object key order is preserved as encountered and duplicate keys resolve
/// last-write-wins, per standard JSON semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    root: Value,
}

impl ParsedDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Root of the parsed tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Total number of nodes in the tree (containers count themselves plus
    /// their children). Used for diagnostics.
    pub fn node_count(&self) -> usize {
        count_nodes(&self.root)
    }

    /// Pretty-printed serialization for display
    pub fn to_pretty_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.root)
    }

    /// Compact serialization
    pub fn to_compact_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.root)
    }
}

fn count_nodes(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(count_nodes).sum::<usize>(),
        Value::Object(map) => 1 + map.values().map(count_nodes).sum::<usize>(),
        _ => 1,
    }
}
