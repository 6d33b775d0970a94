use clap::Args;
use eyre::Result;

use crate::reports::{Report, StagesReport, TerminalOutput};

#[derive(Args)]
pub struct StagesCommand {}

impl StagesCommand {
    pub fn run(&self) -> Result<()> {
        let report = StagesReport {
            stages: speco_rules::builtin_registry().stage_info(),
        };
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
