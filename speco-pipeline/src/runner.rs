//! Train runner.

use std::borrow::Cow;

use serde::Serialize;
use speco_ir::Node;
use tracing::{debug, debug_span};

use crate::{Mode, PipelineError, Plugin, Train};

/// What one stage did during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    /// Zero-based position in the train.
    pub index: usize,
    /// Stage id.
    pub id: String,
    /// Application discipline.
    #[serde(flatten)]
    pub mode: Mode,
    /// Applications that changed the tree.
    pub iterations: usize,
    /// Whether the stage's output differs from its input.
    pub changed: bool,
}

/// The outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The final tree.
    pub tree: Node,
    /// One report per stage, in train order.
    pub stages: Vec<StageReport>,
}

impl RunReport {
    /// Returns true if any stage changed the tree.
    pub fn changed(&self) -> bool {
        self.stages.iter().any(|s| s.changed)
    }
}

/// Runs trees through trains.
///
/// The runner holds no per-run state: the same runner and train may be used
/// from many threads at once, each with its own tree.
///
/// # Example
///
/// ```ignore
/// let runner = Runner::new().plugin(SnapshotPlugin::new());
/// let report = runner.run(&tree, &train)?;
/// ```
#[derive(Default)]
pub struct Runner {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Runner {
    /// Create a runner without plugins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin to receive stage lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of the attached plugins, in the order they receive hooks.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run a tree through the train, left to right.
    ///
    /// The output of stage `i` is the input of stage `i + 1`. The first
    /// failing stage aborts the run; later stages never execute and no
    /// partial tree is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] tagged with the failing stage's position.
    pub fn run(&self, tree: &Node, train: &Train) -> Result<RunReport, PipelineError> {
        debug!(stages = train.len(), plugins = ?self.plugin_names(), "run started");
        let mut current = Cow::Borrowed(tree);
        let mut stages = Vec::with_capacity(train.len());

        for (index, kind) in train.iter().enumerate() {
            let _span = debug_span!("stage", index, id = kind.id()).entered();

            for plugin in &self.plugins {
                plugin.on_before_stage(index, kind, &current);
            }

            let applied = kind.apply(&current).map_err(|failure| PipelineError {
                index,
                stage: kind.id().to_string(),
                failure,
            })?;

            let report = StageReport {
                index,
                id: kind.id().to_string(),
                mode: kind.mode(),
                iterations: applied.iterations,
                changed: applied.iterations > 0,
            };
            debug!(
                mode = %report.mode,
                iterations = report.iterations,
                changed = report.changed,
                "stage finished"
            );

            for plugin in &self.plugins {
                plugin.on_after_stage(kind, &applied.tree, &report);
            }

            stages.push(report);
            current = Cow::Owned(applied.tree);
        }

        Ok(RunReport {
            tree: current.into_owned(),
            stages,
        })
    }

    /// Run a tree through the train and return the final tree.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] tagged with the failing stage's position.
    pub fn specialize(&self, tree: &Node, train: &Train) -> Result<Node, PipelineError> {
        self.run(tree, train).map(|report| report.tree)
    }
}

/// Specialize a tree with a train.
///
/// This is the entry point for callers that need no plugins.
///
/// # Errors
///
/// Returns a [`PipelineError`] tagged with the failing stage's position.
pub fn specialize(tree: &Node, train: &Train) -> Result<Node, PipelineError> {
    Runner::new().specialize(tree, train)
}
