//! Run command report data structures.

use std::path::PathBuf;

use speco_pipeline::StageReport;

use super::output::{Output, Report};

/// What happened to one input tree.
#[derive(Debug)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub stages: Vec<StageReport>,
}

impl Report for RunSummary {
    fn render(&self, out: &mut dyn Output) {
        let changed = self.stages.iter().filter(|s| s.changed).count();
        let target = match &self.output {
            Some(path) => format!(" -> {}", path.display()),
            None => String::new(),
        };
        out.preformatted(&format!(
            "✓ {}{} ({} of {} stages changed the tree)",
            self.input.display(),
            target,
            changed,
            self.stages.len()
        ));

        for stage in self.stages.iter().filter(|s| s.changed) {
            out.key_value_indented(
                &format!("{:02} {}", stage.index, stage.id),
                &match stage.iterations {
                    1 => "1 iteration".to_string(),
                    n => format!("{} iterations", n),
                },
            );
        }
    }
}
