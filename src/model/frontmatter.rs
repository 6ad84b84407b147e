use super::{BuildOptions, CascadeEntry, MenuEntry, ResourceConfig, SitemapConfig};
use crate::{Format, Map, Timestamp};

/// The metadata block of one content file.
///
/// Well-known keys are promoted to typed fields; everything else lives in
/// [`custom_fields`](Self::custom_fields) exactly as it was written, so a
/// parse/serialize cycle loses no data.
///
/// `format` records the syntax the block was written in and selects the
/// encoder on serialization. Changing it converts the document.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{parse_frontmatter, Format};
///
/// let doc = parse_frontmatter("+++\ntitle = \"Hello\"\nweight = 3\n+++\nBody\n");
/// let fm = doc.frontmatter.unwrap();
/// assert_eq!(fm.format, Format::Toml);
/// assert_eq!(fm.title.as_deref(), Some("Hello"));
/// assert_eq!(fm.weight, Some(3));
/// assert_eq!(doc.body, "Body\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontmatterDocument {
    pub format: Format,

    pub title: Option<String>,
    pub date: Option<Timestamp>,
    pub publish_date: Option<Timestamp>,
    pub expiry_date: Option<Timestamp>,
    pub lastmod: Option<Timestamp>,
    pub draft: Option<bool>,

    pub description: Option<String>,
    pub summary: Option<String>,
    pub link_title: Option<String>,

    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub aliases: Option<Vec<String>>,

    pub weight: Option<i64>,
    pub slug: Option<String>,
    pub url: Option<String>,
    /// The `type` key.
    pub content_type: Option<String>,
    pub layout: Option<String>,
    pub markup: Option<String>,
    pub translation_key: Option<String>,
    pub headless: Option<bool>,
    pub is_cjk_language: Option<bool>,
    pub outputs: Option<Vec<String>>,

    pub menus: Vec<MenuEntry>,
    pub build: BuildOptions,
    pub sitemap: SitemapConfig,
    pub resources: Vec<ResourceConfig>,
    pub cascade: Vec<CascadeEntry>,

    /// The `params` table, free-form.
    pub params: Map,
    /// Top-level keys with no typed field, and values of known keys that
    /// did not fit their field.
    pub custom_fields: Map,
}

impl FrontmatterDocument {
    /// An empty document that will be written as `format`.
    #[must_use]
    pub fn new(format: Format) -> Self {
        FrontmatterDocument {
            format,
            ..Default::default()
        }
    }
}
