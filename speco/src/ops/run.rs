//! Run operation - specialize trees.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::{Context, Result, bail};
use speco_ir::Node;
use speco_pipeline::{RunReport, Runner, SnapshotPlugin, Train};
use tracing::{debug, info};

/// What `speco run` was pointed at.
#[derive(Debug)]
pub enum Inputs {
    /// A single tree.
    File(PathBuf),
    /// Every `*.json` tree directly inside a directory, sorted by name.
    Dir { dir: PathBuf, files: Vec<PathBuf> },
}

/// Per-file knobs for [`specialize_file`].
#[derive(Debug, Default)]
pub struct SpecializeOptions<'a> {
    /// Where to write the final tree. `None` keeps it in the report only.
    pub output: Option<&'a Path>,
    /// Where to dump one JSON file per stage.
    pub snapshots: Option<&'a Path>,
}

/// Resolve the input path into the trees to specialize.
pub fn collect_inputs(input: &Path) -> Result<Inputs> {
    if !input.is_dir() {
        return Ok(Inputs::File(input.to_path_buf()));
    }

    let mut files = Vec::new();
    let entries =
        fs::read_dir(input).wrap_err_with(|| format!("Failed to read {}", input.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        bail!("no *.json trees found in {}", input.display());
    }

    Ok(Inputs::Dir {
        dir: input.to_path_buf(),
        files,
    })
}

/// Run one tree through the train.
///
/// Snapshots are written even when the train fails: the input tree plus one
/// file per stage that finished, so the failing stage's input is always on
/// disk.
pub fn specialize_file(
    tree: &Node,
    train: &Train,
    options: &SpecializeOptions<'_>,
) -> Result<RunReport> {
    let snapshots = Arc::new(SnapshotPlugin::new());
    let runner = match options.snapshots {
        Some(_) => Runner::new().plugin(snapshots.clone()),
        None => Runner::new(),
    };

    let result = runner.run(tree, train);

    if let Some(dir) = options.snapshots {
        snapshots
            .write_to_dir(dir)
            .wrap_err_with(|| format!("Failed to write snapshots to {}", dir.display()))?;
        debug!(dir = %dir.display(), count = snapshots.snapshots().len(), "wrote snapshots");
    }

    let report = result?;

    if let Some(path) = options.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        report.tree.write_file(path)?;
        info!(path = %path.display(), changed = report.changed(), "wrote tree");
    }

    Ok(report)
}
