//! Intermediate representation for the speco specializer.
//!
//! This crate provides the tree value that every rewrite stage consumes and
//! produces. A program is a rooted, ordered tree of [`Node`]s; each node has a
//! tag, uniquely-keyed attributes, and ordered children.
//!
//! # Architecture
//!
//! ```text
//! front-end (parser) → Node (speco-ir) → Train (speco-pipeline) → Node → caller
//! ```
//!
//! Trees are plain values:
//! - Structural equality ignores attribute insertion order (see [`Node::canonical`])
//! - Stages never mutate their input; they build a new tree
//! - JSON persistence round-trips through [`Node::to_json`] / [`Node::from_json`]

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod canonical;
mod error;
mod json;
mod node;
mod serde_helpers;
mod walk;

pub use error::{Error, Result};
pub use json::MAX_DEPTH;
pub use node::Node;
pub use walk::Walk;
