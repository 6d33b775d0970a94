//! Explain command report data structures.

use std::path::PathBuf;

use speco_pipeline::TrainStep;

use super::output::{Output, Report};

/// Report data describing a train.
#[derive(Debug)]
pub struct ExplainReport {
    pub manifest_path: PathBuf,
    pub name: String,
    pub description: Option<String>,
    pub steps: Vec<TrainStep>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("Train '{}'", self.name));
        out.newline();

        out.key_value("Manifest", &self.manifest_path.display().to_string());
        if let Some(description) = &self.description {
            out.key_value("Description", description);
        }
        out.newline();

        out.section("Stages");
        for step in &self.steps {
            out.numbered_item(step.index + 1, &format!("{} [{}]", step.id, step.mode));
            if !step.description.is_empty() {
                out.preformatted(&format!("     {}", step.description));
            }
        }
    }
}
