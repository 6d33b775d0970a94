//! Runner plugin trait for observing runs.

use std::sync::Arc;

use speco_ir::Node;

use crate::{StageKind, StageReport};

/// A plugin that observes a run.
///
/// Plugins receive callbacks before and after each stage of the train. They
/// only observe: hooks take `&self` and cannot alter the tree, so a plugged
/// runner produces exactly the same output as a bare one.
///
/// # Example
///
/// ```ignore
/// struct TimingPlugin {
///     start: Mutex<Option<Instant>>,
/// }
///
/// impl Plugin for TimingPlugin {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_stage(&self, _index: usize, _kind: &StageKind, _tree: &Node) {
///         *self.start.lock().unwrap() = Some(Instant::now());
///     }
///
///     fn on_after_stage(&self, _kind: &StageKind, _tree: &Node, report: &StageReport) {
///         if let Some(start) = *self.start.lock().unwrap() {
///             println!("{} took {:?}", report.id, start.elapsed());
///         }
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a stage runs.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based position of the stage in the train
    /// * `kind` - The wrapped stage about to run
    /// * `tree` - The stage's input
    #[allow(unused_variables)]
    fn on_before_stage(&self, index: usize, kind: &StageKind, tree: &Node) {}

    /// Called after a stage completes successfully.
    ///
    /// # Arguments
    ///
    /// * `kind` - The wrapped stage that just completed
    /// * `tree` - The stage's output
    /// * `report` - Position, iteration count and change flag of the stage
    #[allow(unused_variables)]
    fn on_after_stage(&self, kind: &StageKind, tree: &Node, report: &StageReport) {}
}

/// Shared plugins, so a caller can keep a handle to inspect after the run.
impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_stage(&self, index: usize, kind: &StageKind, tree: &Node) {
        (**self).on_before_stage(index, kind, tree);
    }

    fn on_after_stage(&self, kind: &StageKind, tree: &Node, report: &StageReport) {
        (**self).on_after_stage(kind, tree, report);
    }
}
