//! Per-page settings nested inside frontmatter: build options, sitemap
//! overrides, page resources and cascades.

use crate::Map;
use std::fmt;

/// Whether a page appears in page collections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BuildList {
    #[default]
    Always,
    /// Listed only in local collections, not site-wide ones.
    Local,
    Never,
}

impl BuildList {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuildList::Always => "always",
            BuildList::Local => "local",
            BuildList::Never => "never",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "always" => Some(BuildList::Always),
            "local" => Some(BuildList::Local),
            "never" => Some(BuildList::Never),
            _ => None,
        }
    }
}

/// Whether a page is rendered to its own file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BuildRender {
    #[default]
    Always,
    /// Not rendered, but its permalink can be referenced.
    Link,
    Never,
}

impl BuildRender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuildRender::Always => "always",
            BuildRender::Link => "link",
            BuildRender::Never => "never",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "always" => Some(BuildRender::Always),
            "link" => Some(BuildRender::Link),
            "never" => Some(BuildRender::Never),
            _ => None,
        }
    }
}

/// The `build` block of a page.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{BuildList, BuildOptions};
///
/// let mut build = BuildOptions::default();
/// assert!(build.is_default());
///
/// build.list = BuildList::Never;
/// assert!(!build.is_default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    pub list: BuildList,
    pub render: BuildRender,
    pub publish_resources: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            list: BuildList::Always,
            render: BuildRender::Always,
            publish_resources: true,
        }
    }
}

impl BuildOptions {
    /// True when every option has its default value and the block can be
    /// left out of the document.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == BuildOptions::default()
    }
}

/// How often a page is expected to change, for `sitemap.xml`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const ALL: [ChangeFreq; 7] = [
        ChangeFreq::Always,
        ChangeFreq::Hourly,
        ChangeFreq::Daily,
        ChangeFreq::Weekly,
        ChangeFreq::Monthly,
        ChangeFreq::Yearly,
        ChangeFreq::Never,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|freq| freq.as_str() == name)
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-page sitemap overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SitemapConfig {
    pub changefreq: Option<ChangeFreq>,
    /// Conventionally within 0.0..=1.0; not enforced.
    pub priority: Option<f64>,
    pub disable: bool,
}

impl SitemapConfig {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changefreq.is_none() && self.priority.is_none() && !self.disable
    }
}

/// Metadata attached to page resources matching `src`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceConfig {
    /// Glob matched against resource paths, e.g. `images/*.jpg`.
    pub src: String,
    pub name: Option<String>,
    pub title: Option<String>,
    pub params: Map,
    pub custom_fields: Map,
}

impl ResourceConfig {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        ResourceConfig {
            src: src.into(),
            ..Default::default()
        }
    }
}

/// Values passed down to descendant pages, optionally filtered by target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadeEntry {
    /// Frontmatter values to apply, kept as written.
    pub values: Map,
    pub target: Option<CascadeTarget>,
}

/// Selects which descendants a [`CascadeEntry`] applies to (`_target`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeTarget {
    pub path: Option<String>,
    pub kind: Option<String>,
    pub lang: Option<String>,
    pub environment: Option<String>,
}

impl CascadeTarget {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.kind.is_none() && self.lang.is_none() && self.environment.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_freq_names() {
        for freq in ChangeFreq::ALL {
            assert_eq!(ChangeFreq::from_name(freq.as_str()), Some(freq));
        }
        assert_eq!(ChangeFreq::from_name("fortnightly"), None);
    }

    #[test]
    fn test_build_defaults() {
        let build = BuildOptions::default();
        assert_eq!(build.list, BuildList::Always);
        assert_eq!(build.render, BuildRender::Always);
        assert!(build.publish_resources);

        let hidden = BuildOptions {
            publish_resources: false,
            ..BuildOptions::default()
        };
        assert!(!hidden.is_default());
    }

    #[test]
    fn test_sitemap_is_empty() {
        assert!(SitemapConfig::default().is_empty());
        let disabled = SitemapConfig {
            disable: true,
            ..SitemapConfig::default()
        };
        assert!(!disabled.is_empty());
    }
}
