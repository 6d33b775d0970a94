//! Explain operation - describe a train.

use std::path::Path;

use eyre::{Context, Result};
use speco_manifest::Manifest;
use speco_pipeline::StageRegistry;

use crate::reports::ExplainReport;

/// Build the manifest's train and describe each step.
pub fn explain(
    manifest: &Manifest,
    registry: &StageRegistry,
    manifest_path: &Path,
) -> Result<ExplainReport> {
    let train = registry
        .build_train(&manifest.stage_specs())
        .wrap_err_with(|| format!("Failed to build train from {}", manifest_path.display()))?;

    Ok(ExplainReport {
        manifest_path: manifest_path.to_path_buf(),
        name: manifest.name().to_string(),
        description: manifest.train.description.clone(),
        steps: train.steps(),
    })
}
