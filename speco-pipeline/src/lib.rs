//! Stage train engine for the speco specializer.
//!
//! This crate rewrites an IR tree through an ordered [`Train`] of stages.
//! The engine provides:
//!
//! - The [`Stage`] trait: a named, pure `Node -> Node` rewrite
//! - Two wrappers ([`StageKind`]): apply once, or repeat until the tree stops
//!   changing, with a mandatory iteration bound
//! - A [`StageRegistry`] resolving stage ids, and [`StageRegistry::build_train`]
//! - A stateless [`Runner`] with observer [`Plugin`]s
//!
//! # Example
//!
//! ```ignore
//! use speco_pipeline::{StageSpec, specialize};
//!
//! let train = registry.build_train(&[
//!     StageSpec::once("drop-unused-decls"),
//!     StageSpec::repeat("inline-single-use-refs", 50),
//! ])?;
//!
//! let output = specialize(&tree, &train)?;
//! ```

mod error;
mod kind;
mod plugin;
mod registry;
mod runner;
mod snapshot;
mod spec;
mod stage;
mod train;

pub use error::{BuildError, Failure, PipelineError, StageError};
pub use kind::{Applied, Mode, StageKind};
pub use plugin::Plugin;
pub use registry::StageRegistry;
pub use runner::{RunReport, Runner, StageReport, specialize};
pub use snapshot::{SNAPSHOT_INPUT_FILE, SnapshotPlugin, StageSnapshot};
pub use spec::StageSpec;
pub use stage::{Stage, StageInfo};
pub use train::{Train, TrainBuilder, TrainStep};
