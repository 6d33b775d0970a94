//! Stage snapshot plugin for inspecting intermediate trees.
//!
//! This module provides a plugin that captures the tree after each stage,
//! so every step of a train can be examined on its own.

use std::{
    fs,
    path::Path,
    sync::{PoisonError, RwLock},
};

use eyre::Result;
use serde::Serialize;
use speco_ir::Node;

use crate::{Plugin, StageKind, StageReport};

/// File name of the captured input tree.
pub const SNAPSHOT_INPUT_FILE: &str = "input.json";

/// The tree as it left one stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageSnapshot {
    /// What the stage did.
    #[serde(flatten)]
    pub report: StageReport,
    /// The stage's output.
    pub tree: Node,
}

impl StageSnapshot {
    /// File name used by [`SnapshotPlugin::write_to_dir`], e.g. `01-inline.json`.
    pub fn file_name(&self) -> String {
        format!("{:02}-{}.json", self.report.index, self.report.id)
    }
}

/// A plugin that captures the tree after each stage.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let runner = Runner::new().plugin(snapshots.clone());
/// runner.run(&tree, &train)?;
///
/// snapshots.write_to_dir("snapshots")?;
/// ```
#[derive(Debug, Default)]
pub struct SnapshotPlugin {
    input: RwLock<Option<Node>>,
    snapshots: RwLock<Vec<StageSnapshot>>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<StageSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The tree the first stage received, once a run has started.
    pub fn input(&self) -> Option<Node> {
        self.input
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop all collected snapshots.
    pub fn clear(&self) {
        *self.input.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Write the input as `input.json` and every snapshot as pretty JSON
    /// into `dir`.
    ///
    /// After a failed run, the tree the failing stage received is the last
    /// snapshot written, or `input.json` when the first stage failed.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        if let Some(input) = self.input() {
            let json = serde_json::to_string_pretty(&input)?;
            fs::write(dir.join(SNAPSHOT_INPUT_FILE), json)?;
        }

        for snapshot in self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            let path = dir.join(snapshot.file_name());
            let json = serde_json::to_string_pretty(snapshot)?;
            fs::write(&path, json)?;
        }

        Ok(())
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_before_stage(&self, index: usize, _kind: &StageKind, tree: &Node) {
        if index == 0 {
            *self.input.write().unwrap_or_else(PoisonError::into_inner) =
                Some(tree.clone());
        }
    }

    fn on_after_stage(&self, _kind: &StageKind, tree: &Node, report: &StageReport) {
        let snapshot = StageSnapshot {
            report: report.clone(),
            tree: tree.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
    }
}
