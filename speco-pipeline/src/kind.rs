//! Single-shot and fixpoint stage wrappers.

use std::{borrow::Cow, fmt, num::NonZeroUsize, sync::Arc};

use serde::Serialize;
use speco_ir::Node;
use tracing::trace;

use crate::{Failure, Stage};

/// How a stage is applied within a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// Applied exactly once.
    Once,
    /// Applied until the tree stops changing, at most `bound` changing times.
    Fixpoint { bound: usize },
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Once => write!(f, "once"),
            Mode::Fixpoint { bound } => write!(f, "fixpoint (bound {})", bound),
        }
    }
}

/// The result of applying a wrapper.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The rewritten tree.
    pub tree: Node,
    /// Number of applications that changed the tree (0 or 1 for single-shot).
    pub iterations: usize,
}

/// A stage wrapped with its application discipline.
#[derive(Clone)]
pub enum StageKind {
    /// Apply the stage exactly once.
    Once(Arc<dyn Stage>),
    /// Apply the stage until the output equals its input.
    Fixpoint {
        stage: Arc<dyn Stage>,
        bound: NonZeroUsize,
    },
}

impl StageKind {
    /// Wrap a stage for single application.
    pub fn once(stage: impl Stage + 'static) -> Self {
        StageKind::Once(Arc::new(stage))
    }

    /// Wrap a stage for repeated application.
    pub fn fixpoint(stage: impl Stage + 'static, bound: NonZeroUsize) -> Self {
        StageKind::Fixpoint {
            stage: Arc::new(stage),
            bound,
        }
    }

    /// The wrapped stage.
    pub fn stage(&self) -> &dyn Stage {
        match self {
            StageKind::Once(stage) | StageKind::Fixpoint { stage, .. } => stage.as_ref(),
        }
    }

    /// Id of the wrapped stage.
    pub fn id(&self) -> &str {
        self.stage().id()
    }

    /// The application discipline.
    pub fn mode(&self) -> Mode {
        match self {
            StageKind::Once(_) => Mode::Once,
            StageKind::Fixpoint { bound, .. } => Mode::Fixpoint {
                bound: bound.get(),
            },
        }
    }

    /// Apply the wrapped stage to a tree.
    ///
    /// A fixpoint wrapper stops as soon as an application returns a tree
    /// equal to its input and returns that tree. Every application that
    /// changes the tree counts as one iteration; exceeding `bound` such
    /// iterations fails with [`Failure::NonConvergence`]. Stage errors are
    /// never swallowed.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, or non-convergence.
    pub fn apply(&self, tree: &Node) -> Result<Applied, Failure> {
        match self {
            StageKind::Once(stage) => {
                let next = stage.apply(tree).map_err(|error| Failure::Stage {
                    error,
                    iteration: None,
                })?;
                let iterations = usize::from(next != *tree);
                Ok(Applied {
                    tree: next,
                    iterations,
                })
            }
            StageKind::Fixpoint { stage, bound } => {
                apply_fixpoint(stage.as_ref(), tree, bound.get())
            }
        }
    }
}

fn apply_fixpoint(stage: &dyn Stage, tree: &Node, bound: usize) -> Result<Applied, Failure> {
    let mut current = Cow::Borrowed(tree);
    let mut iterations = 0;

    loop {
        let next = stage.apply(&current).map_err(|error| Failure::Stage {
            error,
            iteration: Some(iterations + 1),
        })?;

        if next == *current {
            trace!(stage = stage.id(), iterations, "converged");
            return Ok(Applied {
                tree: current.into_owned(),
                iterations,
            });
        }

        current = Cow::Owned(next);
        iterations += 1;
        trace!(stage = stage.id(), iteration = iterations, "tree changed");

        if iterations > bound {
            return Err(Failure::NonConvergence { bound, iterations });
        }
    }
}

impl fmt::Debug for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageKind")
            .field("stage", &self.id())
            .field("mode", &self.mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::StageError;

    /// Appends a counter attribute: never converges.
    struct Grow {
        calls: Arc<AtomicUsize>,
    }

    impl Stage for Grow {
        fn id(&self) -> &str {
            "grow"
        }

        fn apply(&self, tree: &Node) -> Result<Node, StageError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(tree.clone().with_attr(format!("step{}", n), "x"))
        }
    }

    /// Increments a `count` attribute until it reaches `limit`.
    struct CountTo {
        limit: usize,
    }

    impl Stage for CountTo {
        fn id(&self) -> &str {
            "count-to"
        }

        fn apply(&self, tree: &Node) -> Result<Node, StageError> {
            let count: usize = tree
                .attr("count")
                .ok_or_else(|| StageError::missing_attribute(tree.tag(), "count"))?
                .parse()
                .map_err(|_| StageError::malformed(tree.tag(), "count is not a number"))?;
            if count >= self.limit {
                return Ok(tree.clone());
            }
            Ok(tree.clone().with_attr("count", (count + 1).to_string()))
        }
    }

    struct Identity;

    impl Stage for Identity {
        fn id(&self) -> &str {
            "identity"
        }

        fn apply(&self, tree: &Node) -> Result<Node, StageError> {
            Ok(tree.clone())
        }
    }

    fn bound(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn counter(start: usize) -> Node {
        Node::new("counter").with_attr("count", start.to_string())
    }

    #[test]
    fn test_once_applies_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let kind = StageKind::once(Grow {
            calls: calls.clone(),
        });

        let applied = kind.apply(&Node::new("root")).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(applied.iterations, 1);
        assert_eq!(applied.tree.attr("step0"), Some("x"));
    }

    #[test]
    fn test_once_noop_is_stable() {
        let input = counter(3);
        let applied = StageKind::once(Identity).apply(&input).unwrap();
        assert!(Node::equals(&input, &applied.tree));
        assert_eq!(applied.iterations, 0);
    }

    #[test]
    fn test_fixpoint_converges() {
        let kind = StageKind::fixpoint(CountTo { limit: 4 }, bound(10));
        let applied = kind.apply(&counter(0)).unwrap();
        assert_eq!(applied.tree.attr("count"), Some("4"));
        assert_eq!(applied.iterations, 4);
    }

    #[test]
    fn test_fixpoint_converges_at_exactly_the_bound() {
        let kind = StageKind::fixpoint(CountTo { limit: 5 }, bound(5));
        let applied = kind.apply(&counter(0)).unwrap();
        assert_eq!(applied.iterations, 5);
    }

    #[test]
    fn test_fixpoint_result_is_a_true_fixpoint() {
        let kind = StageKind::fixpoint(CountTo { limit: 3 }, bound(10));
        let first = kind.apply(&counter(0)).unwrap();
        let second = kind.apply(&first.tree).unwrap();
        assert_eq!(second.iterations, 0);
        assert_eq!(first.tree, second.tree);
    }

    #[test]
    fn test_fixpoint_enforces_bound() {
        let calls = Arc::new(AtomicUsize::new(0));
        let kind = StageKind::fixpoint(
            Grow {
                calls: calls.clone(),
            },
            bound(5),
        );

        let failure = kind.apply(&Node::new("root")).unwrap_err();

        assert_eq!(
            failure,
            Failure::NonConvergence {
                bound: 5,
                iterations: 6
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_fixpoint_propagates_stage_error() {
        let kind = StageKind::fixpoint(CountTo { limit: 3 }, bound(10));
        let failure = kind.apply(&Node::new("counter")).unwrap_err();
        assert_eq!(
            failure,
            Failure::Stage {
                error: StageError::missing_attribute("counter", "count"),
                iteration: Some(1),
            }
        );
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Once.to_string(), "once");
        assert_eq!(Mode::Fixpoint { bound: 50 }.to_string(), "fixpoint (bound 50)");
    }
}
