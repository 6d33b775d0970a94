//! The stage trait.

use speco_ir::Node;

use crate::StageError;

/// Information about a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInfo {
    /// The stage id.
    pub id: String,
    /// A human-readable description.
    pub description: String,
}

/// A single rewrite of the IR tree.
///
/// Stages are deterministic and hold no state between invocations. A stage
/// that has nothing to do returns a tree equal to its input; trees it does
/// not recognize pass through unchanged.
///
/// A stage is constructed once and shared read-only by every run, hence the
/// `Send + Sync` bound.
pub trait Stage: Send + Sync {
    /// The identifier the stage is registered under.
    fn id(&self) -> &str;

    /// A human-readable description of what this stage rewrites.
    fn description(&self) -> &str {
        ""
    }

    /// Rewrite the tree.
    ///
    /// # Errors
    ///
    /// Returns a [`StageError`] only when the tree is malformed in a way the
    /// stage cannot safely process. Indifference is never an error.
    fn apply(&self, tree: &Node) -> Result<Node, StageError>;

    /// Get information about this stage.
    fn info(&self) -> StageInfo {
        StageInfo {
            id: self.id().to_string(),
            description: self.description().to_string(),
        }
    }
}
