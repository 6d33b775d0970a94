//! Stages command report data structures.

use speco_pipeline::StageInfo;

use super::output::{Output, Report};

/// The stages a registry offers.
#[derive(Debug)]
pub struct StagesReport {
    pub stages: Vec<StageInfo>,
}

impl Report for StagesReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Available stages");
        for stage in &self.stages {
            if stage.description.is_empty() {
                out.list_item(&stage.id);
            } else {
                out.list_item(&format!("{}: {}", stage.id, stage.description));
            }
        }
    }
}
