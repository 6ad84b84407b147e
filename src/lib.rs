//! # sitedoc
//!
//! A lossless codec for static-site documents: content frontmatter and site
//! configuration written in YAML, TOML or JSON.
//!
//! ## What it does
//!
//! Text is decoded into a format-neutral [`Value`] tree, and well-known keys
//! are promoted into typed documents ([`FrontmatterDocument`],
//! [`ConfigDocument`]). Every key the model does not know about is carried in
//! an open `custom_fields` map, so writing a document back out never drops
//! data, whichever of the three syntaxes it came from.
//!
//! ## Key Features
//!
//! - **Three syntaxes, one model**: `---` YAML, `+++` TOML and bare-object
//!   JSON frontmatter, plus whole-file configuration in any of the three
//! - **Numeric discipline**: `70` stays an integer and `70.0` stays a float
//!   through every codec
//! - **Ordered maps**: keys keep their source order, so diffs stay small
//! - **Lenient or strict**: malformed frontmatter can degrade to "no
//!   frontmatter" or surface as an error, caller's choice
//!
//! ## Quick Start
//!
//! ```rust
//! use sitedoc::{parse_frontmatter, serialize_frontmatter};
//!
//! let text = "---\ntitle: Hello\ntags: [rust]\nextra:\n  color: blue\n---\nBody\n";
//! let mut doc = parse_frontmatter(text);
//!
//! let fm = doc.frontmatter.as_mut().unwrap();
//! assert_eq!(fm.title.as_deref(), Some("Hello"));
//! assert!(fm.custom_fields.contains_key("extra"));
//! fm.weight = Some(10);
//!
//! let out = serialize_frontmatter(&doc).unwrap();
//! assert_eq!(
//!     out,
//!     "---\ntitle: Hello\ntags:\n  - rust\nweight: 10\nextra:\n  color: blue\n---\nBody\n"
//! );
//! ```
//!
//! ### Site configuration
//!
//! ```rust
//! use sitedoc::{parse_config, serialize_config, Format};
//!
//! let text = r#"
//! baseURL = "https://example.org/"
//! theme = ["base", "extras"]
//!
//! [[menus.main]]
//! name = "Home"
//! pageRef = "/"
//! weight = 1
//! "#;
//! let config = parse_config(text, Format::Toml).unwrap();
//! assert_eq!(config.theme.as_deref(), Some("base, extras"));
//! assert_eq!(config.menus["main"][0].page_ref.as_deref(), Some("/"));
//!
//! let again = parse_config(&serialize_config(&config).unwrap(), Format::Toml).unwrap();
//! assert_eq!(again, config);
//! ```
//!
//! ### Building values by hand
//!
//! ```rust
//! use sitedoc::{codec_for, value, EncodeOptions, Format};
//!
//! let tree = value!({ "extra": { "a": [1, "x", true] } });
//! let toml = codec_for(Format::Toml, &EncodeOptions::default()).encode(&tree).unwrap();
//! assert_eq!(toml, "[extra]\na = [1, \"x\", true]\n");
//! ```
//!
//! ## Diagnostics
//!
//! The crate logs through [`tracing`]: decoded documents at `debug`, and
//! discarded frontmatter blocks or dropped sub-keys at `warn`. Install any
//! subscriber to see them.

pub mod codec;
pub mod date;
pub mod engine;
pub mod error;
pub mod macros;
pub mod map;
pub mod model;
pub mod options;
pub mod project;
pub mod split;
pub mod value;

pub use codec::{codec_for, Format, FormatCodec, JsonCodec, TomlCodec, YamlCodec};
pub use date::Timestamp;
pub use engine::{ConfigEngine, ContentDocument, FrontmatterEngine};
pub use error::{DecodeError, EncodeError, ParseError, SerializeError};
pub use map::Map;
pub use model::{
    BuildList, BuildOptions, BuildRender, CascadeEntry, CascadeTarget, ChangeFreq,
    ConfigDocument, FrontmatterDocument, MenuEntry, MenuItem, ResourceConfig, SitemapConfig,
};
pub use options::EncodeOptions;
pub use project::{project_config, project_frontmatter, unproject_config, unproject_frontmatter};
pub use split::{split, SplitDocument};
pub use value::Value;

/// Parses a content file, treating a malformed metadata block as absent.
///
/// Shortcut for [`FrontmatterEngine::parse`] with default options.
///
/// # Examples
///
/// ```rust
/// use sitedoc::parse_frontmatter;
///
/// let doc = parse_frontmatter("No metadata here.");
/// assert!(doc.frontmatter.is_none());
/// assert_eq!(doc.body, "No metadata here.");
/// ```
#[must_use]
pub fn parse_frontmatter(text: &str) -> ContentDocument {
    FrontmatterEngine::new().parse(text)
}

/// Parses a content file, reporting a malformed metadata block as an error.
///
/// # Errors
///
/// Returns [`ParseError`] when a block is present but cannot be decoded or its
/// root is not a mapping.
pub fn parse_frontmatter_strict(text: &str) -> Result<ContentDocument, ParseError> {
    FrontmatterEngine::new().parse_strict(text)
}

/// Writes a content file back out, frontmatter first.
///
/// # Errors
///
/// Returns [`SerializeError`] when the frontmatter holds a value its format
/// cannot represent, such as a null in TOML, or when a multi-line string
/// would put a bare fence line inside the block.
pub fn serialize_frontmatter(doc: &ContentDocument) -> Result<String, SerializeError> {
    FrontmatterEngine::new().serialize(doc)
}

/// Parses a site configuration file written in `format`.
///
/// # Errors
///
/// Returns [`ParseError`] when the text cannot be decoded or its root is not a
/// mapping.
pub fn parse_config(text: &str, format: Format) -> Result<ConfigDocument, ParseError> {
    ConfigEngine::new().parse(text, format)
}

/// Serializes a site configuration in its own format.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{serialize_config, ConfigDocument, Format};
///
/// let mut config = ConfigDocument::new(Format::Json);
/// config.title = Some("Site".to_string());
/// assert_eq!(serialize_config(&config).unwrap(), "{\n  \"title\": \"Site\"\n}\n");
/// ```
///
/// # Errors
///
/// Returns [`SerializeError`] when the document holds a value its format
/// cannot represent.
pub fn serialize_config(doc: &ConfigDocument) -> Result<String, SerializeError> {
    ConfigEngine::new().serialize(doc)
}
