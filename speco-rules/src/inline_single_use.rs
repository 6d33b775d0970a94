//! Stage inlining declarations that are referenced exactly once.

use speco_ir::Node;
use speco_pipeline::{Stage, StageError};

use crate::decls::{Decl, declarations, is_ref_to, reference_counts, without_decls};

/// Replaces the single use of a declaration with its value.
///
/// Each application inlines one declaration: the first, in pre-order, that is
/// referenced exactly once and not from inside its own value. The `ref` is
/// replaced by a copy of the value and the `decl` is removed. Run it as a
/// fixpoint stage to inline transitively.
pub struct InlineSingleUseRefs;

impl Stage for InlineSingleUseRefs {
    fn id(&self) -> &str {
        "inline-single-use-refs"
    }

    fn description(&self) -> &str {
        "Inline one declaration that is referenced exactly once"
    }

    fn apply(&self, tree: &Node) -> Result<Node, StageError> {
        let decls = declarations(tree)?;
        let counts = reference_counts(tree)?;

        let candidate = decls.iter().find(|Decl { name, value }| {
            counts.get(name) == Some(&1) && value.find(|n| is_ref_to(n, name)).is_none()
        });
        let Some(Decl { name, value }) = candidate else {
            return Ok(tree.clone());
        };

        let inlined = tree.rewrite(&mut |n| is_ref_to(n, name).then(|| (*value).clone()));
        Ok(without_decls(inlined, &|d| d == *name))
    }
}
