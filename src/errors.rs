//! Unified error types for pipeline construction and evaluation.
//!
//! Wiring errors (`SourceCountMismatch`, `TypeMismatch`) are raised when a
//! connection is made and are fatal to pipeline construction; since wiring is
//! constructor-based, a failed wiring builds nothing and leaves no partial
//! graph state. The remaining variants are raised during evaluation and abort
//! the run that triggered them; the engine never retries a failed stage and
//! never downgrades a fatal error into a diagnostic skip.

use crate::core::RecordKind;
use thiserror::Error;

/// Errors raised while wiring or evaluating a pipeline graph.
///
/// The enum is `Clone` so a memoized node can hand the same error to every
/// downstream consumer within a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A stage was wired to the wrong number of sources.
    #[error("'{consumer}' declares {expected} input(s) but {found} source(s) were attached")]
    SourceCountMismatch {
        consumer: String,
        expected: usize,
        found: usize,
    },

    /// A source's output kind does not match the consumer's declared input
    /// kind at that position.
    #[error("'{consumer}' input {position} expects {expected} but source '{source_name}' produces {found}")]
    TypeMismatch {
        consumer: String,
        source_name: String,
        position: usize,
        expected: RecordKind,
        found: RecordKind,
    },

    /// A stage produced a sequence of a kind other than its declared output.
    #[error("'{stage}' produced {found} but declares {expected}")]
    OutputMismatch {
        stage: String,
        expected: RecordKind,
        found: RecordKind,
    },

    /// A filter precondition over the input as a whole is violated, or a
    /// stage was built from unusable settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An external-data stage failed. Propagated unchanged, never retried.
    #[error("collaborator stage '{stage}' failed: {message}")]
    Collaborator { stage: String, message: String },

    /// A recipe parameter is missing or failed validation.
    #[error("invalid parameter '{name}': {message}")]
    Parameter { name: String, message: String },

    /// Catch-all for internal contract violations.
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a configuration error with a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a collaborator error for the named stage.
    pub fn collaborator(stage: impl Into<String>, message: impl ToString) -> Self {
        Self::Collaborator {
            stage: stage.into(),
            message: message.to_string(),
        }
    }

    /// Create a parameter error for the named parameter.
    pub fn parameter(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Parameter {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error was raised at wiring time.
    pub fn is_wiring_error(&self) -> bool {
        matches!(
            self,
            Self::SourceCountMismatch { .. } | Self::TypeMismatch { .. }
        )
    }
}
