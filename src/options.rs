//! Configuration options for encoding documents.
//!
//! The codec has no configuration files or environment variables; the only
//! knob a host can turn is how nested output is laid out.
//!
//! ## Examples
//!
//! ```rust
//! use sitedoc::{ConfigEngine, EncodeOptions};
//!
//! let engine = ConfigEngine::with_options(EncodeOptions::new().with_indent(4));
//! assert_eq!(engine.options().indent, 4);
//! ```

/// Layout options shared by the YAML and JSON encoders.
///
/// TOML output is laid out by table headers and does not indent.
///
/// # Examples
///
/// ```rust
/// use sitedoc::EncodeOptions;
///
/// let options = EncodeOptions::new();
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { indent: 2 }
    }
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width. Widths below 1 are raised to 1, since YAML
    /// block nesting cannot be expressed without indentation.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }
}
