//! Parse and serialize entry points for content files and site config.
//!
//! The engines tie the pieces together:
//!
//! ```text
//! text ─split─▶ block ─decode─▶ Value ─project─▶ typed document
//! typed document ─unproject─▶ Value ─encode─▶ block ─fence─▶ text
//! ```
//!
//! Both engines are immutable values; one instance can serve any number of
//! threads.

use crate::codec::{codec_for, Format};
use crate::error::{ParseError, SerializeError};
use crate::model::{ConfigDocument, FrontmatterDocument};
use crate::project::{project_config, project_frontmatter, unproject_config, unproject_frontmatter};
use crate::split::split;
use crate::{EncodeOptions, Map, Value};
use tracing::{debug, warn};

/// A content file: optional frontmatter plus the body text after it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentDocument {
    pub frontmatter: Option<FrontmatterDocument>,
    pub body: String,
}

impl ContentDocument {
    #[must_use]
    pub fn new(frontmatter: Option<FrontmatterDocument>, body: impl Into<String>) -> Self {
        ContentDocument {
            frontmatter,
            body: body.into(),
        }
    }
}

/// Reads and writes content files with YAML, TOML or JSON frontmatter.
///
/// # Examples
///
/// ```rust
/// use sitedoc::FrontmatterEngine;
///
/// let engine = FrontmatterEngine::new();
/// let mut doc = engine.parse("---\ntitle: Draft\n---\nHello\n");
///
/// let fm = doc.frontmatter.as_mut().unwrap();
/// fm.title = Some("Published".to_string());
/// fm.draft = Some(false);
///
/// let text = engine.serialize(&doc).unwrap();
/// assert_eq!(text, "---\ntitle: Published\ndraft: false\n---\nHello\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct FrontmatterEngine {
    options: EncodeOptions,
}

impl FrontmatterEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: EncodeOptions) -> Self {
        FrontmatterEngine { options }
    }

    #[must_use]
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Parses a content file, treating a malformed metadata block as absent.
    ///
    /// When the block cannot be decoded the whole input, fences included,
    /// comes back as the body so nothing is lost. Use
    /// [`parse_strict`](Self::parse_strict) to see the error instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitedoc::FrontmatterEngine;
    ///
    /// let text = "---\ntitle: [unclosed\n---\nBody";
    /// let doc = FrontmatterEngine::new().parse(text);
    /// assert!(doc.frontmatter.is_none());
    /// assert_eq!(doc.body, text);
    /// ```
    #[must_use]
    pub fn parse(&self, text: &str) -> ContentDocument {
        match self.parse_strict(text) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(error = %err, "discarding malformed frontmatter block");
                ContentDocument::new(None, text)
            }
        }
    }

    /// Parses a content file, failing when a metadata block is present but
    /// cannot be decoded or is not a mapping.
    ///
    /// Text without a complete block still succeeds, with no frontmatter.
    pub fn parse_strict(&self, text: &str) -> Result<ContentDocument, ParseError> {
        let Some(parts) = split(text) else {
            return Ok(ContentDocument::new(None, text));
        };

        let map = if parts.block.trim().is_empty() {
            Map::new()
        } else {
            let value = codec_for(parts.format, &self.options).decode(parts.block)?;
            root_map(value, parts.format)?
        };
        debug!(format = %parts.format, keys = map.len(), "parsed frontmatter");

        let frontmatter = project_frontmatter(map, parts.format);
        Ok(ContentDocument::new(Some(frontmatter), parts.body))
    }

    /// Writes a content file: the encoded frontmatter inside its fences,
    /// followed by the body. Without frontmatter the body is returned as is.
    pub fn serialize(&self, doc: &ContentDocument) -> Result<String, SerializeError> {
        match &doc.frontmatter {
            Some(frontmatter) => {
                let mut text = self.serialize_block(frontmatter)?;
                text.push_str(&doc.body);
                Ok(text)
            }
            None => Ok(doc.body.clone()),
        }
    }

    /// The metadata block alone, fences included, ending in a newline.
    ///
    /// Fails with [`SerializeError::FenceInBlock`] when a line of the encoded
    /// block, such as one inside a TOML multi-line string, equals the fence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitedoc::{Format, FrontmatterDocument, FrontmatterEngine};
    ///
    /// let mut fm = FrontmatterDocument::new(Format::Toml);
    /// fm.title = Some("Hello".to_string());
    ///
    /// let block = FrontmatterEngine::new().serialize_block(&fm).unwrap();
    /// assert_eq!(block, "+++\ntitle = \"Hello\"\n+++\n");
    /// ```
    pub fn serialize_block(&self, frontmatter: &FrontmatterDocument) -> Result<String, SerializeError> {
        let format = frontmatter.format;
        let map = unproject_frontmatter(frontmatter);
        let encoded = if map.is_empty() {
            String::new()
        } else {
            codec_for(format, &self.options).encode(&Value::Map(map))?
        };
        let encoded = encoded.trim_end_matches('\n');

        if let Some(delimiter) = format.delimiter() {
            if let Some(index) = encoded.lines().position(|line| line.trim_end() == delimiter) {
                return Err(SerializeError::FenceInBlock {
                    format,
                    delimiter,
                    line: index + 1,
                });
            }
        }

        Ok(match format.delimiter() {
            Some(delimiter) if encoded.is_empty() => format!("{delimiter}\n{delimiter}\n"),
            Some(delimiter) => format!("{delimiter}\n{encoded}\n{delimiter}\n"),
            None if encoded.is_empty() => "{}\n".to_string(),
            None => format!("{encoded}\n"),
        })
    }
}

/// Reads and writes whole site configuration files.
///
/// Unlike frontmatter, configuration has no lenient mode: a file that cannot
/// be decoded is an error the caller has to handle.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{ConfigEngine, Format};
///
/// let engine = ConfigEngine::new();
/// let mut config = engine.parse("title: My Site\n", Format::Yaml).unwrap();
/// config.base_url = Some("https://example.org/".to_string());
///
/// let text = engine.serialize(&config).unwrap();
/// assert_eq!(text, "baseURL: https://example.org/\ntitle: My Site\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigEngine {
    options: EncodeOptions,
}

impl ConfigEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: EncodeOptions) -> Self {
        ConfigEngine { options }
    }

    #[must_use]
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Parses configuration text written in `format`.
    ///
    /// Empty or whitespace-only text gives an empty document, so a new file
    /// can be edited like any other.
    pub fn parse(&self, text: &str, format: Format) -> Result<ConfigDocument, ParseError> {
        if text.trim().is_empty() {
            return Ok(ConfigDocument::new(format));
        }
        let value = codec_for(format, &self.options).decode(text)?;
        let map = root_map(value, format)?;
        debug!(format = %format, keys = map.len(), "parsed site configuration");
        Ok(project_config(map, format))
    }

    /// Serializes `doc` in its own [`format`](ConfigDocument::format).
    pub fn serialize(&self, doc: &ConfigDocument) -> Result<String, SerializeError> {
        let map = unproject_config(doc);
        let text = codec_for(doc.format, &self.options).encode(&Value::Map(map))?;
        Ok(text)
    }
}

/// A document root must be a mapping; an empty document counts as one.
fn root_map(value: Value, format: Format) -> Result<Map, ParseError> {
    match value {
        Value::Map(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ParseError::NotAMap {
            format,
            found: other.type_name(),
        }),
    }
}
