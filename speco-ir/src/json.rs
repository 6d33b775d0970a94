//! JSON persistence for IR trees.
//!
//! The wire shape of a node is
//! `{"tag": "...", "attrs": {"key": "value"}, "children": [...]}` where
//! `attrs` and `children` may be omitted when empty.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Node, Result};

/// Deepest tree (in nodes, a leaf being 1) that can be written or read.
///
/// A node costs two levels of JSON nesting: its object and its `children`
/// array. Its `attrs` object sits one level below the node's own object.
pub const MAX_DEPTH: usize = 128;

impl Node {
    /// Serialize to compact JSON.
    ///
    /// Fails with [`Error::TooDeep`] for trees deeper than [`MAX_DEPTH`], which
    /// could not be read back.
    pub fn to_json(&self) -> Result<String> {
        self.check_depth()?;
        serde_json::to_string(self).map_err(|source| Box::new(Error::Encode { source }))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        self.check_depth()?;
        serde_json::to_string_pretty(self).map_err(|source| Box::new(Error::Encode { source }))
    }

    /// Parse a tree from JSON (uses "<input>" as the filename in diagnostics).
    pub fn from_json(content: &str) -> Result<Self> {
        Self::from_json_with_filename(content, "<input>")
    }

    /// Parse a tree from JSON with a custom filename for error reporting.
    pub fn from_json_with_filename(content: &str, filename: &str) -> Result<Self> {
        if let Some(offset) = too_deep_at(content) {
            return Err(Error::syntax_at(
                format!("tree is nested deeper than {} nodes", MAX_DEPTH),
                offset,
                content,
                filename,
            ));
        }

        // nesting is already bounded by too_deep_at
        let mut de = serde_json::Deserializer::from_str(content);
        de.disable_recursion_limit();
        let node =
            Node::deserialize(&mut de).map_err(|e| Error::syntax(e, content, filename))?;
        de.end().map_err(|e| Error::syntax(e, content, filename))?;
        Ok(node)
    }

    /// Read and parse a JSON tree file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_json_with_filename(&content, &path.display().to_string())
    }

    /// Write this tree to a file as indented JSON.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        std::fs::write(path, json).map_err(|e| {
            Box::new(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })
        })
    }
}

impl Node {
    fn check_depth(&self) -> Result<()> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(Box::new(Error::TooDeep {
                depth,
                max: MAX_DEPTH,
            }));
        }
        Ok(())
    }
}

/// Byte offset of the first bracket nested beyond what a [`MAX_DEPTH`] tree
/// needs, if any.
fn too_deep_at(content: &str) -> Option<usize> {
    let limit = 2 * MAX_DEPTH;
    let mut nesting = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in content.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                nesting += 1;
                if nesting > limit {
                    return Some(offset);
                }
            }
            b'}' | b']' => nesting = nesting.saturating_sub(1),
            _ => {}
        }
    }
    None
}
