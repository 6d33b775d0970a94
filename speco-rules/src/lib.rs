//! Built-in rewrite stages.
//!
//! The stages here work on a small declaration convention:
//!
//! ```text
//! program
//!   decl name="x"        a binding; exactly one child, the bound value
//!     literal value="1"
//!   print
//!     ref name="x"       a use site of "x"
//! ```
//!
//! Names are global to the tree and must be declared at most once. Nodes of
//! any other kind are carried through untouched.

mod decls;
mod drop_unused;
mod inline_single_use;

pub use drop_unused::DropUnusedDecls;
pub use inline_single_use::InlineSingleUseRefs;
use speco_pipeline::StageRegistry;

/// Create a registry holding every built-in stage.
pub fn builtin_registry() -> StageRegistry {
    StageRegistry::new()
        .with(DropUnusedDecls)
        .with(InlineSingleUseRefs)
}
