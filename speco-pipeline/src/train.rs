//! Ordered stage trains.

use std::{num::NonZeroUsize, sync::Arc};

use serde::Serialize;

use crate::{BuildError, Mode, Stage, StageKind};

/// An ordered, non-empty sequence of wrapped stages.
///
/// Stage `i + 1` only ever sees the output of stage `i`. A train is
/// immutable once built and may be shared by concurrent runs.
#[derive(Debug, Clone)]
pub struct Train {
    kinds: Vec<StageKind>,
}

/// A step of a train, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainStep {
    /// Zero-based position in the train.
    pub index: usize,
    /// Stage id.
    pub id: String,
    /// Stage description.
    pub description: String,
    /// Application discipline.
    #[serde(flatten)]
    pub mode: Mode,
}

impl Train {
    /// Create a train from wrapped stages.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyTrain`] if `kinds` is empty.
    pub fn new(kinds: Vec<StageKind>) -> Result<Self, BuildError> {
        if kinds.is_empty() {
            return Err(BuildError::EmptyTrain);
        }
        Ok(Self { kinds })
    }

    /// Start building a train stage by stage.
    pub fn builder() -> TrainBuilder {
        TrainBuilder::default()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false: a train has at least one stage.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Wrapped stages in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &StageKind> {
        self.kinds.iter()
    }

    /// Describe every step of the train.
    pub fn steps(&self) -> Vec<TrainStep> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| TrainStep {
                index,
                id: kind.id().to_string(),
                description: kind.stage().description().to_string(),
                mode: kind.mode(),
            })
            .collect()
    }
}

/// Builder for [`Train`].
///
/// # Example
///
/// ```ignore
/// let train = Train::builder()
///     .once(DropUnusedDecls)
///     .fixpoint(InlineSingleUseRefs, 50)
///     .build()?;
/// ```
#[derive(Default)]
pub struct TrainBuilder {
    entries: Vec<(Arc<dyn Stage>, Option<usize>)>,
}

impl TrainBuilder {
    /// Append a single-shot stage.
    pub fn once(self, stage: impl Stage + 'static) -> Self {
        self.shared(Arc::new(stage), None)
    }

    /// Append a repeat-to-fixpoint stage.
    pub fn fixpoint(self, stage: impl Stage + 'static, bound: usize) -> Self {
        self.shared(Arc::new(stage), Some(bound))
    }

    /// Append an already shared stage; `bound` selects the fixpoint wrapper.
    pub fn shared(mut self, stage: Arc<dyn Stage>, bound: Option<usize>) -> Self {
        self.entries.push((stage, bound));
        self
    }

    /// Build the train.
    ///
    /// # Errors
    ///
    /// Returns an error if no stage was added or a bound is zero.
    pub fn build(self) -> Result<Train, BuildError> {
        let kinds = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, (stage, bound))| wrap(index, stage, bound))
            .collect::<Result<Vec<_>, _>>()?;
        Train::new(kinds)
    }
}

/// Wrap a stage at `index`, validating its bound.
pub(crate) fn wrap(
    index: usize,
    stage: Arc<dyn Stage>,
    bound: Option<usize>,
) -> Result<StageKind, BuildError> {
    match bound {
        None => Ok(StageKind::Once(stage)),
        Some(bound) => {
            let bound = NonZeroUsize::new(bound).ok_or_else(|| BuildError::ZeroBound {
                id: stage.id().to_string(),
                index,
            })?;
            Ok(StageKind::Fixpoint { stage, bound })
        }
    }
}

#[cfg(test)]
mod tests {
    use speco_ir::Node;

    use super::*;
    use crate::StageError;

    struct Named(&'static str);

    impl Stage for Named {
        fn id(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test stage"
        }

        fn apply(&self, tree: &Node) -> Result<Node, StageError> {
            Ok(tree.clone())
        }
    }

    #[test]
    fn test_empty_train_rejected() {
        assert_eq!(Train::new(Vec::new()).unwrap_err(), BuildError::EmptyTrain);
        assert_eq!(
            Train::builder().build().unwrap_err(),
            BuildError::EmptyTrain
        );
    }

    #[test]
    fn test_zero_bound_rejected() {
        let err = Train::builder()
            .once(Named("a"))
            .fixpoint(Named("b"), 0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::ZeroBound {
                id: "b".into(),
                index: 1
            }
        );
    }

    #[test]
    fn test_steps_preserve_order() {
        let train = Train::builder()
            .once(Named("first"))
            .fixpoint(Named("second"), 50)
            .once(Named("third"))
            .build()
            .unwrap();

        let steps = train.steps();
        let ids: Vec<_> = steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
        assert_eq!(steps[1].mode, Mode::Fixpoint { bound: 50 });
        assert_eq!(steps[2].index, 2);
        assert_eq!(train.len(), 3);
        assert!(!train.is_empty());
    }

    #[test]
    fn test_step_serializes_flat() {
        let train = Train::builder().fixpoint(Named("x"), 7).build().unwrap();
        let json = serde_json::to_string(&train.steps()[0]).unwrap();
        assert_eq!(
            json,
            r#"{"index":0,"id":"x","description":"test stage","mode":"fixpoint","bound":7}"#
        );
    }
}
