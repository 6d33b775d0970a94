//! Train manifest (`speco.toml`) parsing and validation.
//!
//! A manifest names the stages of a train, in order:
//!
//! ```toml
//! [train]
//! name = "default"
//! default-bound = 50
//!
//! [[stage]]
//! id = "drop-unused-decls"
//!
//! [[stage]]
//! id = "inline-single-use-refs"
//! repeat = true        # or an explicit bound: repeat = 20
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{DEFAULT_BOUND, Manifest, Repeat, StageEntry, TrainMeta};
