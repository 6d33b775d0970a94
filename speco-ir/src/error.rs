use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for IR persistence (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid IR tree: {message}")]
    #[diagnostic(
        code(speco::ir::syntax),
        help("a tree node is an object {{\"tag\": ..., \"attrs\": {{...}}, \"children\": [...]}}")
    )]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("tree is {depth} nodes deep; at most {max} can be persisted")]
    #[diagnostic(code(speco::ir::too_deep))]
    TooDeep { depth: usize, max: usize },

    #[error("failed to encode IR tree")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a syntax error from a serde_json error with source context
    pub fn syntax(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column()).map(SourceSpan::from);
        Box::new(Error::Syntax {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: strip_position(&source.to_string()),
        })
    }

    /// Create a syntax error pointing at a byte offset
    pub fn syntax_at(
        message: impl Into<String>,
        offset: usize,
        src: &str,
        filename: &str,
    ) -> Box<Self> {
        Box::new(Error::Syntax {
            src: NamedSource::new(filename, src.to_string()),
            span: Some(SourceSpan::from(offset.min(src.len()))),
            message: message.into(),
        })
    }
}

/// Convert serde_json's 1-based line/column into a byte offset.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

/// serde_json appends " at line L column C", which the label already shows.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"tag\": 1\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 3), Some(4));
        assert_eq!(offset_of(src, 0, 0), None);
        assert_eq!(offset_of(src, 3, 99), Some(src.len()));
    }

    #[test]
    fn test_strip_position() {
        assert_eq!(
            strip_position("missing field `tag` at line 1 column 2"),
            "missing field `tag`"
        );
        assert_eq!(strip_position("EOF"), "EOF");
    }
}
