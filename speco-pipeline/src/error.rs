//! Error types for stages, train construction and runs.

use thiserror::Error;

/// A stage could not process a tree it was required to handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("'{tag}' node is missing required attribute '{attr}'")]
    MissingAttribute { tag: String, attr: String },

    #[error("malformed '{tag}' node: {reason}")]
    Malformed { tag: String, reason: String },

    #[error("{message}")]
    Precondition { message: String },
}

impl StageError {
    /// Create a missing attribute error.
    pub fn missing_attribute(tag: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::MissingAttribute {
            tag: tag.into(),
            attr: attr.into(),
        }
    }

    /// Create a malformed node error.
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a precondition violation error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }
}

/// Why a stage wrapper failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The wrapped stage rejected the tree.
    ///
    /// `iteration` is the 1-based application that failed inside a fixpoint
    /// wrapper, and `None` for a single-shot stage.
    #[error("{}{error}", in_iteration(.iteration))]
    Stage {
        error: StageError,
        iteration: Option<usize>,
    },

    /// A fixpoint wrapper kept changing the tree past its bound.
    #[error("no fixpoint reached: tree still changing after {iterations} iterations (bound {bound})")]
    NonConvergence { bound: usize, iterations: usize },
}

fn in_iteration(iteration: &Option<usize>) -> String {
    match iteration {
        Some(n) => format!("iteration {}: ", n),
        None => String::new(),
    }
}

/// A run aborted at the first failing stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stage #{index} '{stage}' failed: {failure}")]
pub struct PipelineError {
    /// Zero-based position of the failing stage in the train.
    pub index: usize,
    /// Id of the failing stage.
    pub stage: String,
    /// The underlying failure, unmodified.
    pub failure: Failure,
}

impl PipelineError {
    /// The stage error, if the stage itself failed.
    pub fn stage_error(&self) -> Option<&StageError> {
        match &self.failure {
            Failure::Stage { error, .. } => Some(error),
            Failure::NonConvergence { .. } => None,
        }
    }

    /// Returns true if a fixpoint wrapper exhausted its bound.
    pub fn is_non_convergence(&self) -> bool {
        matches!(self.failure, Failure::NonConvergence { .. })
    }
}

/// A train could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("a train needs at least one stage")]
    EmptyTrain,

    #[error("unknown stage '{id}' at position {index}")]
    UnknownStage { id: String, index: usize },

    #[error("stage '{id}' at position {index} repeats with a bound of 0")]
    ZeroBound { id: String, index: usize },
}
