//! Format codecs: text to [`Value`] and back.
//!
//! Each of the three surface syntaxes gets one [`FormatCodec`]:
//!
//! - [`YamlCodec`]: decodes with `serde_yaml`, encodes in block style with a
//!   hand-written emitter (2-space nesting, literal blocks for multi-line
//!   strings)
//! - [`TomlCodec`]: decodes with `toml`, encodes through `toml::Table` after
//!   checking that the tree has a TOML spelling
//! - [`JsonCodec`]: decodes and encodes with `serde_json`
//!
//! All three agree on the numeric discipline described in [`crate::value`].
//!
//! ## Examples
//!
//! ```rust
//! use sitedoc::{codec_for, EncodeOptions, Format, Value};
//!
//! let codec = codec_for(Format::Json, &EncodeOptions::default());
//! let value = codec.decode(r#"{"weight": 70, "ratio": 70.0}"#).unwrap();
//! let map = value.as_map().unwrap();
//! assert_eq!(map.get("weight"), Some(&Value::Integer(70)));
//! assert_eq!(map.get("ratio"), Some(&Value::Float(70.0)));
//! ```

pub mod json;
pub mod toml;
pub mod yaml;

pub use self::json::JsonCodec;
pub use self::toml::TomlCodec;
pub use self::yaml::YamlCodec;

use crate::{DecodeError, EncodeError, EncodeOptions, Value};
use std::fmt;
use std::path::Path;

/// One of the three interchangeable surface syntaxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Yaml,
    Toml,
    Json,
}

impl Format {
    /// The frontmatter fence for this format, if it uses one.
    ///
    /// JSON frontmatter is a bare object and has no fence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitedoc::Format;
    ///
    /// assert_eq!(Format::Yaml.delimiter(), Some("---"));
    /// assert_eq!(Format::Toml.delimiter(), Some("+++"));
    /// assert_eq!(Format::Json.delimiter(), None);
    /// ```
    #[must_use]
    pub const fn delimiter(self) -> Option<&'static str> {
        match self {
            Format::Yaml => Some("---"),
            Format::Toml => Some("+++"),
            Format::Json => None,
        }
    }

    /// Maps a file extension (without the dot, any case) to a format.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Picks the format of a config file from its name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitedoc::Format;
    ///
    /// assert_eq!(Format::from_path("config/_default/hugo.YML"), Some(Format::Yaml));
    /// assert_eq!(Format::from_path("README"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
            Format::Json => "JSON",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes text of one syntax into a [`Value`] and encodes it back.
///
/// Implementations are stateless apart from their [`EncodeOptions`], so they
/// can be shared freely across threads.
pub trait FormatCodec: Send + Sync {
    fn format(&self) -> Format;

    /// Decodes `text`, failing on any malformed input.
    fn decode(&self, text: &str) -> Result<Value, DecodeError>;

    /// Encodes `value`, failing when the syntax has no spelling for it.
    fn encode(&self, value: &Value) -> Result<String, EncodeError>;
}

/// Returns the codec for `format`, configured with `options`.
#[must_use]
pub fn codec_for(format: Format, options: &EncodeOptions) -> Box<dyn FormatCodec> {
    match format {
        Format::Yaml => Box::new(YamlCodec::new(options.clone())),
        Format::Toml => Box::new(TomlCodec::new()),
        Format::Json => Box::new(JsonCodec::new(options.clone())),
    }
}

/// Appends a map key to a dotted error path.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Appends a list index to an error path.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Converts a byte offset into a 1-based line number.
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
