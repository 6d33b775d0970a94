//! Declarative stage specifications.

/// One entry of a train, naming its stage by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageSpec {
    /// Apply the stage once.
    Once(String),
    /// Apply the stage until convergence, at most `bound` changing iterations.
    Repeat(String, usize),
}

impl StageSpec {
    /// Create a single-shot entry.
    pub fn once(id: impl Into<String>) -> Self {
        StageSpec::Once(id.into())
    }

    /// Create a repeat-to-fixpoint entry.
    pub fn repeat(id: impl Into<String>, bound: usize) -> Self {
        StageSpec::Repeat(id.into(), bound)
    }

    /// The stage id this entry refers to.
    pub fn id(&self) -> &str {
        match self {
            StageSpec::Once(id) | StageSpec::Repeat(id, _) => id,
        }
    }

    /// The iteration bound, if this entry repeats.
    pub fn bound(&self) -> Option<usize> {
        match self {
            StageSpec::Once(_) => None,
            StageSpec::Repeat(_, bound) => Some(*bound),
        }
    }
}
