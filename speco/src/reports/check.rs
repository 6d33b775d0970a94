//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from train validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the manifest.
    pub manifest_path: PathBuf,
    /// Name of the train.
    pub train_name: String,
    /// Number of stages in the manifest.
    pub stage_count: usize,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid: train '{}' with {} stage{}",
                self.manifest_path.display(),
                self.train_name,
                self.stage_count,
                if self.stage_count == 1 { "" } else { "s" }
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            manifest_path: PathBuf::from("speco.toml"),
            train_name: "default".into(),
            stage_count: 1,
            errors: vec![],
            warnings: vec![],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.text(), "✓ speco.toml is valid: train 'default' with 1 stage");
    }

    #[test]
    fn test_render_errors_only() {
        let report = CheckReport {
            manifest_path: PathBuf::from("speco.toml"),
            train_name: "default".into(),
            stage_count: 2,
            errors: vec!["unknown stage 'x' at position 0".into()],
            warnings: vec![],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, ["! error: unknown stage 'x' at position 0", ""]);
    }
}
