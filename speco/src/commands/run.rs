use std::{io::Write, path::PathBuf};

use clap::Args;
use eyre::{Context, Result, bail};
use speco_ir::Node;
use speco_manifest::Manifest;
use tracing::info;

use super::UnwrapOrExit;
use crate::{
    ops::{self, Inputs, SpecializeOptions},
    reports::{Report, RunSummary, TerminalOutput},
};

#[derive(Args)]
pub struct RunCommand {
    /// IR tree as JSON, or a directory of *.json trees
    pub input: PathBuf,

    /// Path to the train manifest
    #[arg(short, long, default_value = "speco.toml")]
    pub train: PathBuf,

    /// Where to write the result (a directory when INPUT is one; stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the tree after every stage into this directory
    #[arg(long)]
    pub snapshots: Option<PathBuf>,
}

impl RunCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.train).unwrap_or_exit();
        let train = speco_rules::builtin_registry()
            .build_train(&manifest.stage_specs())
            .wrap_err_with(|| format!("Failed to build train from {}", self.train.display()))?;
        info!(train = manifest.name(), stages = train.len(), "loaded train");

        match ops::collect_inputs(&self.input)? {
            Inputs::File(path) => {
                let tree = Node::read_file(&path).unwrap_or_exit();
                let options = SpecializeOptions {
                    output: self.output.as_deref(),
                    snapshots: self.snapshots.as_deref(),
                };
                let report = ops::specialize_file(&tree, &train, &options)
                    .wrap_err_with(|| format!("Failed to specialize {}", path.display()))?;

                if self.output.is_none() {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{}", report.tree.to_json_pretty()?)?;
                }

                RunSummary {
                    input: path,
                    output: self.output.clone(),
                    stages: report.stages,
                }
                .render(&mut TerminalOutput::stderr());
            }
            Inputs::Dir { dir, files } => {
                let Some(output_dir) = &self.output else {
                    bail!(
                        "{} is a directory; pass --output <DIR> for the specialized trees",
                        dir.display()
                    );
                };

                for path in files {
                    let Some(file_name) = path.file_name() else {
                        continue;
                    };
                    let output = output_dir.join(file_name);
                    let snapshots = self
                        .snapshots
                        .as_ref()
                        .zip(path.file_stem())
                        .map(|(root, stem)| root.join(stem));

                    let tree = Node::read_file(&path).unwrap_or_exit();
                    let options = SpecializeOptions {
                        output: Some(&output),
                        snapshots: snapshots.as_deref(),
                    };
                    let report = ops::specialize_file(&tree, &train, &options)
                        .wrap_err_with(|| format!("Failed to specialize {}", path.display()))?;

                    RunSummary {
                        input: path,
                        output: Some(output),
                        stages: report.stages,
                    }
                    .render(&mut TerminalOutput::new());
                }
            }
        }

        Ok(())
    }
}
