//! Stage removing declarations that are never referenced.

use std::collections::{HashMap, HashSet};

use speco_ir::Node;
use speco_pipeline::{Stage, StageError};

use crate::decls::{DECL, Decl, NAME, declarations, is_ref_to, reference_counts, without_decls};

/// Removes every `decl` whose name has no `ref` anywhere in the tree.
///
/// References inside other declarations count, so dropping a declaration can
/// leave another one unused; run it as a fixpoint stage to clear such chains.
///
/// An unused declaration whose value declares a name that is referenced from
/// outside that value is kept, since removing it would leave the reference
/// dangling.
pub struct DropUnusedDecls;

impl Stage for DropUnusedDecls {
    fn id(&self) -> &str {
        "drop-unused-decls"
    }

    fn description(&self) -> &str {
        "Remove declarations that are never referenced"
    }

    fn apply(&self, tree: &Node) -> Result<Node, StageError> {
        let decls = declarations(tree)?;
        let counts = reference_counts(tree)?;

        let droppable: HashSet<&str> = decls
            .iter()
            .filter(|d| !counts.contains_key(d.name) && !exports_used_name(d, &counts))
            .map(|d| d.name)
            .collect();
        if droppable.is_empty() {
            return Ok(tree.clone());
        }

        Ok(without_decls(tree.clone(), &|name| droppable.contains(name)))
    }
}

/// Whether a name declared inside `decl`'s value is referenced outside it.
fn exports_used_name(decl: &Decl<'_>, counts: &HashMap<&str, usize>) -> bool {
    decl.value
        .walk()
        .filter(|n| n.is(DECL))
        .filter_map(|n| n.attr(NAME))
        .any(|name| {
            let inside = decl.value.count(|n| is_ref_to(n, name));
            counts.get(name).copied().unwrap_or(0) > inside
        })
}
