//! Error types for decoding, encoding, parsing and serializing documents.
//!
//! ## Error Categories
//!
//! - [`DecodeError`]: malformed YAML/TOML/JSON text, with the format and,
//!   when the backend reports one, the 1-based line
//! - [`EncodeError`]: a [`Value`](crate::Value) shape the target syntax cannot
//!   hold, located by a dotted key path
//! - [`ParseError`]: a config or strict frontmatter parse that failed to decode
//!   or whose root is not a mapping
//! - [`SerializeError`]: a typed document that could not be written
//!
//! ## Examples
//!
//! ```rust
//! use sitedoc::{parse_config, Format, ParseError};
//!
//! let err = parse_config("title = \"unterminated", Format::Toml).unwrap_err();
//! assert!(matches!(err, ParseError::Decode(_)));
//! assert!(err.to_string().contains("TOML"));
//! ```

use crate::Format;
use thiserror::Error;

/// Malformed input in one of the format codecs.
///
/// No partial value is ever returned alongside a `DecodeError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Syntax error at a known line.
    #[error("{format} syntax error at line {line}: {reason}")]
    Syntax {
        format: Format,
        line: usize,
        reason: String,
    },

    /// Syntax error without position information.
    #[error("{format} syntax error: {reason}")]
    Invalid { format: Format, reason: String },
}

impl DecodeError {
    /// Creates a decode error, attaching the line when one is known.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitedoc::{DecodeError, Format};
    ///
    /// let err = DecodeError::new(Format::Yaml, Some(3), "unexpected end of stream");
    /// assert_eq!(err.line(), Some(3));
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn new(format: Format, line: Option<usize>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        match line {
            Some(line) => DecodeError::Syntax {
                format,
                line,
                reason,
            },
            None => DecodeError::Invalid { format, reason },
        }
    }

    #[must_use]
    pub fn format(&self) -> Format {
        match self {
            DecodeError::Syntax { format, .. } | DecodeError::Invalid { format, .. } => *format,
        }
    }

    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            DecodeError::Syntax { line, .. } => Some(*line),
            DecodeError::Invalid { .. } => None,
        }
    }
}

/// A value the target syntax cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The shape at `path` has no spelling in `format`.
    #[error("{format} cannot represent the value at `{path}`: {reason}")]
    Unrepresentable {
        format: Format,
        path: String,
        reason: String,
    },

    /// NaN or an infinity in a format without a spelling for it.
    #[error("{format} cannot represent the non-finite number at `{path}`")]
    NonFiniteFloat { format: Format, path: String },

    /// The underlying serializer rejected the value.
    #[error("{format} encoding failed: {reason}")]
    Backend { format: Format, reason: String },
}

impl EncodeError {
    pub fn unrepresentable(format: Format, path: &str, reason: impl Into<String>) -> Self {
        EncodeError::Unrepresentable {
            format,
            path: display_path(path),
            reason: reason.into(),
        }
    }

    pub fn non_finite(format: Format, path: &str) -> Self {
        EncodeError::NonFiniteFloat {
            format,
            path: display_path(path),
        }
    }

    #[must_use]
    pub fn format(&self) -> Format {
        match self {
            EncodeError::Unrepresentable { format, .. }
            | EncodeError::NonFiniteFloat { format, .. }
            | EncodeError::Backend { format, .. } => *format,
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

/// Failure to turn text into a typed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The text decoded, but its root is not a mapping.
    #[error("{format} document root must be a map, found {found}")]
    NotAMap { format: Format, found: &'static str },
}

/// Failure to turn a typed document into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The encoded block has a line that would read back as its closing
    /// fence, typically inside a multi-line string.
    #[error("{format} frontmatter line {line} would be read as the closing `{delimiter}` fence")]
    FenceInBlock {
        format: Format,
        delimiter: &'static str,
        line: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_without_line() {
        let err = DecodeError::new(Format::Json, None, "bad escape");
        assert_eq!(err.line(), None);
        assert_eq!(err.format(), Format::Json);
        assert_eq!(err.to_string(), "JSON syntax error: bad escape");
    }

    #[test]
    fn test_encode_error_root_path() {
        let err = EncodeError::unrepresentable(Format::Toml, "", "root must be a table");
        assert_eq!(
            err.to_string(),
            "TOML cannot represent the value at `<root>`: root must be a table"
        );
    }

    #[test]
    fn test_parse_error_wraps_decode_error() {
        let err: ParseError = DecodeError::new(Format::Yaml, Some(2), "tab").into();
        assert_eq!(err.to_string(), "YAML syntax error at line 2: tab");
    }

    #[test]
    fn test_fence_in_block_message() {
        let err = SerializeError::FenceInBlock {
            format: Format::Toml,
            delimiter: "+++",
            line: 3,
        };
        assert_eq!(
            err.to_string(),
            "TOML frontmatter line 3 would be read as the closing `+++` fence"
        );
    }

    #[test]
    fn test_not_a_map_message() {
        let err = ParseError::NotAMap {
            format: Format::Yaml,
            found: "list",
        };
        assert_eq!(err.to_string(), "YAML document root must be a map, found list");
    }
}
