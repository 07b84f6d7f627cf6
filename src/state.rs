//! Process-wide viewer state
//!
//! An explicit state holder with one atomic transition per pipeline event,
//! so the selection state machine is testable without any rendering
//! concern. Per selection the machine runs
//! `Idle -> Reading -> {Ready, Failed}`; a new selection always returns it
//! to `Reading`, discarding the prior terminal state.

use std::sync::RwLock;

use crate::document::{ParsedDocument, SelectedFile};
use crate::error::PipelineError;

/// Where the current selection is in the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No selection has been made yet
    Idle,
    /// A read is in flight for the current selection
    Reading,
    /// The current selection parsed successfully
    Ready(ParsedDocument),
    /// The current selection failed to read or parse
    Failed(PipelineError),
}

/// Proof that a completion belongs to a particular selection.
///
/// Issued by [`ViewerState::begin`]; a completion presenting a superseded
/// ticket is discarded (the stale-result guard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Read-only view handed to the display collaborator.
///
/// Exactly one of `document` / `error` is `Some` once the pipeline has
/// resolved; both are `None` while idle or reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Display name of the current selection, if any
    pub file_name: Option<String>,
    /// The validated document, if the last run succeeded
    pub document: Option<ParsedDocument>,
    /// The tagged failure, if the last run failed
    pub error: Option<PipelineError>,
}

impl ViewSnapshot {
    /// True while no terminal state has been reached for the current
    /// selection (or no selection exists).
    pub fn is_pending(&self) -> bool {
        self.document.is_none() && self.error.is_none()
    }
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    file: Option<SelectedFile>,
    generation: u64,
}

/// State holder for the current selection and its pipeline outcome
#[derive(Debug)]
pub struct ViewerState {
    inner: RwLock<Inner>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                phase: Phase::Idle,
                file: None,
                generation: 0,
            }),
        }
    }

    /// Register a new selection and enter `Reading`.
    ///
    /// Supersedes any in-flight or terminal state for a previous selection
    /// and returns the ticket that the eventual completion must present.
    pub fn begin(&self, file: SelectedFile) -> Ticket {
        let mut inner = match self.inner.write() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.generation += 1;
        inner.phase = Phase::Reading;
        inner.file = Some(file);
        Ticket(inner.generation)
    }

    /// Commit the outcome of the selection identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) if a newer selection has
    /// superseded the ticket; the late result is simply discarded.
    pub fn complete(
        &self,
        ticket: Ticket,
        result: Result<ParsedDocument, PipelineError>,
    ) -> bool {
        let mut inner = match self.inner.write() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        if inner.generation != ticket.0 {
            tracing::debug!(
                ticket = ticket.0,
                current = inner.generation,
                "discarding stale pipeline result"
            );
            return false;
        }
        inner.phase = match result {
            Ok(document) => Phase::Ready(document),
            Err(error) => Phase::Failed(error),
        };
        true
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> Phase {
        self.inner
            .read()
            .map(|inner| inner.phase.clone())
            .unwrap_or(Phase::Idle)
    }

    /// Read-only view for the display collaborator
    pub fn snapshot(&self) -> ViewSnapshot {
        let Ok(inner) = self.inner.read() else {
            return ViewSnapshot {
                file_name: None,
                document: None,
                error: None,
            };
        };
        let (document, error) = match &inner.phase {
            Phase::Ready(document) => (Some(document.clone()), None),
            Phase::Failed(error) => (None, Some(error.clone())),
            Phase::Idle | Phase::Reading => (None, None),
        };
        ViewSnapshot {
            file_name: inner.file.as_ref().map(|f| f.name.clone()),
            document,
            error,
        }
    }
}
