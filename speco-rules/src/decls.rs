//! Shared reading of the declaration convention.

use std::collections::HashMap;

use speco_ir::Node;
use speco_pipeline::StageError;

pub const DECL: &str = "decl";
pub const REF: &str = "ref";
pub const NAME: &str = "name";

/// A well-formed declaration.
pub struct Decl<'a> {
    pub name: &'a str,
    pub value: &'a Node,
}

fn name_of<'a>(node: &'a Node) -> Result<&'a str, StageError> {
    node.attr(NAME)
        .ok_or_else(|| StageError::missing_attribute(node.tag(), NAME))
}

/// All declarations in pre-order.
///
/// Fails if a declaration has no name, does not have exactly one child, or
/// reuses a name.
pub fn declarations(tree: &Node) -> Result<Vec<Decl<'_>>, StageError> {
    let mut decls: Vec<Decl<'_>> = Vec::new();
    for node in tree.walk().filter(|n| n.is(DECL)) {
        let name = name_of(node)?;
        let [value] = node.children() else {
            return Err(StageError::malformed(
                DECL,
                format!(
                    "'{}' must have exactly one child, found {}",
                    name,
                    node.children().len()
                ),
            ));
        };
        if decls.iter().any(|d| d.name == name) {
            return Err(StageError::malformed(
                DECL,
                format!("'{}' is declared more than once", name),
            ));
        }
        decls.push(Decl { name, value });
    }
    Ok(decls)
}

/// Number of `ref` nodes per name, anywhere in the tree.
pub fn reference_counts(tree: &Node) -> Result<HashMap<&str, usize>, StageError> {
    let mut counts = HashMap::new();
    for node in tree.walk().filter(|n| n.is(REF)) {
        *counts.entry(name_of(node)?).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Returns true if `node` is a reference to `name`.
pub fn is_ref_to(node: &Node, name: &str) -> bool {
    node.is(REF) && node.attr(NAME) == Some(name)
}

/// Rebuild the tree without the declarations selected by `remove`.
pub fn without_decls(node: Node, remove: &impl Fn(&str) -> bool) -> Node {
    node.retain_children(|c| !(c.is(DECL) && c.attr(NAME).is_some_and(remove)))
        .map_children(|c| without_decls(c, remove))
}
