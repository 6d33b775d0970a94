//! Stage registry: resolves stage ids to implementations.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{BuildError, Stage, StageInfo, StageSpec, Train, train::wrap};

/// Maps stage ids to shared stage implementations.
///
/// New rewrite rules are added by registering them here; the engine itself
/// never changes.
///
/// # Example
///
/// ```ignore
/// let registry = StageRegistry::new()
///     .with(DropUnusedDecls)
///     .with(InlineSingleUseRefs);
///
/// let train = registry.build_train(&[StageSpec::once("drop-unused-decls")])?;
/// ```
#[derive(Clone, Default)]
pub struct StageRegistry {
    stages: IndexMap<String, Arc<dyn Stage>>,
}

impl StageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stage, builder style.
    pub fn with(mut self, stage: impl Stage + 'static) -> Self {
        self.register(stage);
        self
    }

    /// Register a stage under its id, replacing any stage with the same id.
    ///
    /// Returns the replaced stage, if any.
    pub fn register(&mut self, stage: impl Stage + 'static) -> Option<Arc<dyn Stage>> {
        self.register_shared(Arc::new(stage))
    }

    /// Register an already shared stage.
    pub fn register_shared(&mut self, stage: Arc<dyn Stage>) -> Option<Arc<dyn Stage>> {
        self.stages.insert(stage.id().to_string(), stage)
    }

    /// Look up a stage by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Stage>> {
        self.stages.get(id).cloned()
    }

    /// Returns true if a stage is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.stages.contains_key(id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    /// Information about every registered stage.
    pub fn stage_info(&self) -> Vec<StageInfo> {
        self.stages.values().map(|s| s.info()).collect()
    }

    /// Number of registered stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if no stage is registered.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Build a train from declarative specs, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if `specs` is empty, an id is not registered, or a
    /// repeat bound is zero. The reported index is the position in `specs`.
    pub fn build_train(&self, specs: &[StageSpec]) -> Result<Train, BuildError> {
        let kinds = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let stage = self.get(spec.id()).ok_or_else(|| BuildError::UnknownStage {
                    id: spec.id().to_string(),
                    index,
                })?;
                wrap(index, stage, spec.bound())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Train::new(kinds)
    }
}

impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageRegistry")
            .field("stages", &self.stages.keys().collect::<Vec<_>>())
            .finish()
    }
}
