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
pub struct CheckCommand {
    /// Path to the train manifest
    #[arg(short, long, default_value = "speco.toml")]
    pub train: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.train).unwrap_or_exit();
        let registry = speco_rules::builtin_registry();

        let report = ops::check(&manifest, &registry, &self.train);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
