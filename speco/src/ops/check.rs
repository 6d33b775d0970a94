//! Check operation - train validation.

use std::path::Path;

use speco_manifest::Manifest;
use speco_pipeline::StageRegistry;

use crate::reports::CheckReport;

/// Resolve every stage of the manifest against the registry.
///
/// Unlike [`StageRegistry::build_train`], which stops at the first unknown
/// stage, this collects every problem.
pub fn check(manifest: &Manifest, registry: &StageRegistry, manifest_path: &Path) -> CheckReport {
    let specs = manifest.stage_specs();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        if !registry.contains(spec.id()) {
            errors.push(format!(
                "unknown stage '{}' at position {} (see `speco stages`)",
                spec.id(),
                index
            ));
        }
    }

    for (index, pair) in specs.windows(2).enumerate() {
        if pair[0] == pair[1] && pair[0].bound().is_none() {
            warnings.push(format!(
                "stage '{}' runs twice in a row at positions {} and {}; consider `repeat = true`",
                pair[0].id(),
                index,
                index + 1
            ));
        }
    }

    CheckReport {
        manifest_path: manifest_path.to_path_buf(),
        train_name: manifest.name().to_string(),
        stage_count: specs.len(),
        errors,
        warnings,
    }
}
