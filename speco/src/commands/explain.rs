use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use speco_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Path to the train manifest
    #[arg(short, long, default_value = "speco.toml")]
    pub train: PathBuf,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.train).unwrap_or_exit();
        let registry = speco_rules::builtin_registry();

        let report = ops::explain(&manifest, &registry, &self.train)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
