//! Manifest types, parsing and lowering to stage specs.

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use speco_pipeline::StageSpec;
use toml::Spanned;

use crate::{Error, Result, SourceContext};

/// Bound used by `repeat = true` when `[train] default-bound` is not set.
pub const DEFAULT_BOUND: usize = 50;

/// Root schema for speco.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Train metadata
    #[serde(default)]
    pub train: TrainMeta,

    /// Stages in execution order
    #[serde(default, rename = "stage")]
    pub stages: Vec<StageEntry>,
}

/// The `[train]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TrainMeta {
    /// Train name, for reports
    pub name: Option<String>,

    /// Description, for reports
    pub description: Option<String>,

    /// Bound for stages declared with `repeat = true`
    #[serde(default = "default_bound")]
    pub default_bound: Spanned<i64>,
}

fn default_bound() -> Spanned<i64> {
    Spanned::new(0..0, DEFAULT_BOUND as i64)
}

impl Default for TrainMeta {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            default_bound: default_bound(),
        }
    }
}

/// One `[[stage]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageEntry {
    /// Registered stage id
    pub id: Spanned<String>,

    /// Repeat to fixpoint: `true` for the default bound, or an explicit bound
    #[serde(default)]
    pub repeat: Option<Spanned<Repeat>>,
}

/// Value of a stage's `repeat` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Repeat {
    Flag(bool),
    Bound(i64),
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "speco.toml")
    }
}

impl Manifest {
    /// Parse a speco.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a speco.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }

    /// Display name of the train.
    pub fn name(&self) -> &str {
        self.train.name.as_deref().unwrap_or("unnamed")
    }

    /// Lower the stage entries to specs, in order.
    pub fn stage_specs(&self) -> Vec<StageSpec> {
        // bounds were checked to be positive during parsing
        let default_bound = *self.train.default_bound.get_ref() as usize;
        self.stages
            .iter()
            .map(|stage| {
                let id = stage.id.get_ref().clone();
                match stage.repeat.as_ref().map(|r| *r.get_ref()) {
                    None | Some(Repeat::Flag(false)) => StageSpec::Once(id),
                    Some(Repeat::Flag(true)) => StageSpec::Repeat(id, default_bound),
                    Some(Repeat::Bound(bound)) => StageSpec::Repeat(id, bound as usize),
                }
            })
            .collect()
    }
}

/// Parse a manifest from content with the given filename for error reporting.
fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let default_bound = &manifest.train.default_bound;
    if *default_bound.get_ref() < 1 {
        return Err(ctx.validation_error_at(
            "default-bound must be at least 1",
            default_bound.span(),
        ));
    }

    if manifest.stages.is_empty() {
        return Err(ctx.validation_error("train has no stages; add at least one [[stage]]"));
    }

    for stage in &manifest.stages {
        if stage.id.get_ref().trim().is_empty() {
            return Err(ctx.validation_error_at("stage id must not be empty", stage.id.span()));
        }

        let Some(repeat) = &stage.repeat else {
            continue;
        };
        if let Repeat::Bound(bound) = *repeat.get_ref() {
            if bound < 1 {
                return Err(ctx.validation_error_at(
                    format!("repeat bound must be at least 1, found {}", bound),
                    repeat.span(),
                ));
            }
        }
    }

    Ok(())
}
