//! Canonical form and structural equality.
//!
//! The canonical form writes the tag, the attributes sorted by key, and the
//! children in order. Every string is quoted and escaped, so structural
//! characters outside quotes can never collide with content.
//!
//! ```text
//! "program"("decl"["name"="x"]("literal"["value"="1"]) "ref"["name"="x"])
//! ```

use std::hash::{Hash, Hasher};

use crate::Node;

impl Node {
    /// Render the canonical serialization of this tree.
    ///
    /// Two trees are structurally equal exactly when their canonical forms
    /// are byte-identical.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        write_canonical(self, &mut out);
        out
    }

    /// Structural equality; identical to `a == b`.
    pub fn equals(a: &Node, b: &Node) -> bool {
        a == b
    }
}

fn write_canonical(node: &Node, out: &mut String) {
    write_quoted(node.tag(), out);

    let attrs = node.sorted_attrs();
    if !attrs.is_empty() {
        out.push('[');
        for (i, (key, value)) in attrs.into_iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write_quoted(key, out);
            out.push('=');
            write_quoted(value, out);
        }
        out.push(']');
    }

    if !node.is_leaf() {
        out.push('(');
        for (i, child) in node.children().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write_canonical(child, out);
        }
        out.push(')');
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

// Agrees with the canonical form: attribute order is irrelevant, child order is not.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
            && self.attr_count() == other.attr_count()
            && self.attrs().all(|(k, v)| other.attr(k) == Some(v))
            && self.children() == other.children()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        self.sorted_attrs().hash(state);
        self.children().hash(state);
    }
}
