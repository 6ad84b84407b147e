//! Frontmatter splitting.
//!
//! A content file may open with a metadata block in one of three shapes:
//!
//! ```text
//! ---            +++            {
//! title: A       title = "A"      "title": "A"
//! ---            +++            }
//! body           body           body
//! ```
//!
//! [`split`] finds the block, names its [`Format`] and hands back the block
//! text and the body separately. Leading whitespace before the opening token
//! is skipped. A file with no recognizable block, or with an opening fence
//! that is never closed, is reported as having no frontmatter.

use crate::Format;

/// A content file cut into its metadata block and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Syntax of the metadata block.
    pub format: Format,
    /// The block without its fences. For JSON the braces are included, since
    /// they belong to the object.
    pub block: &'a str,
    /// Everything after the block.
    pub body: &'a str,
}

/// Splits `text` into a frontmatter block and a body.
///
/// Returns `None` when `text` does not start with a complete block; the
/// caller should then treat the whole text as body.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{split, Format};
///
/// let doc = split("---\ntitle: Hello\n---\nBody text\n").unwrap();
/// assert_eq!(doc.format, Format::Yaml);
/// assert_eq!(doc.block, "title: Hello");
/// assert_eq!(doc.body, "Body text\n");
///
/// assert!(split("Just a body").is_none());
/// assert!(split("---\ntitle: never closed\n").is_none());
/// ```
#[must_use]
pub fn split(text: &str) -> Option<SplitDocument<'_>> {
    let start = text.trim_start();
    if start.starts_with('{') {
        return split_json(start);
    }
    [Format::Yaml, Format::Toml]
        .into_iter()
        .find_map(|format| split_fenced(start, format))
}

fn split_fenced(text: &str, format: Format) -> Option<SplitDocument<'_>> {
    let delimiter = format.delimiter()?;
    let first_line_end = text.find('\n')?;
    if text[..first_line_end].trim_end() != delimiter {
        return None;
    }

    let content_start = first_line_end + 1;
    let mut offset = content_start;
    for line in text[content_start..].split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let block = text[content_start..offset]
                .strip_suffix('\n')
                .map(|block| block.strip_suffix('\r').unwrap_or(block))
                .unwrap_or("");
            return Some(SplitDocument {
                format,
                block,
                body: &text[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    None
}

fn split_json(text: &str) -> Option<SplitDocument<'_>> {
    let end = matching_brace(text)?;
    let rest = &text[end..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);
    Some(SplitDocument {
        format: Format::Json,
        block: &text[..end],
        body,
    })
}

/// Byte offset just past the brace that closes the object opening `text`.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
