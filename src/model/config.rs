use super::MenuItem;
use crate::{Format, Map};
use indexmap::IndexMap;

/// A whole site configuration file.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{parse_config, Format};
///
/// let doc = parse_config("theme = [\"base\", \"extras\"]\n", Format::Toml).unwrap();
/// assert_eq!(doc.theme.as_deref(), Some("base, extras"));
/// assert!(doc.is_theme_list);
/// assert_eq!(doc.themes(), vec!["base", "extras"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigDocument {
    pub format: Format,

    /// `baseURL`.
    pub base_url: Option<String>,
    pub title: Option<String>,
    pub language_code: Option<String>,
    /// Theme name, or several names joined with `", "` when
    /// [`is_theme_list`](Self::is_theme_list) is set.
    pub theme: Option<String>,
    pub is_theme_list: bool,
    pub copyright: Option<String>,

    pub build_drafts: Option<bool>,
    pub build_future: Option<bool>,
    pub build_expired: Option<bool>,
    /// `enableRobotsTXT`.
    pub enable_robots_txt: Option<bool>,

    pub summary_length: Option<i64>,
    pub default_content_language: Option<String>,
    pub time_zone: Option<String>,

    /// Singular to plural taxonomy names, e.g. `tag → tags`.
    pub taxonomies: IndexMap<String, String>,
    /// Menu name to its items, in declaration order.
    pub menus: IndexMap<String, Vec<MenuItem>>,

    pub params: Map,
    /// Unrecognized top-level keys, whole subtrees included.
    pub custom_fields: Map,
}

impl ConfigDocument {
    /// An empty configuration that will be written as `format`.
    #[must_use]
    pub fn new(format: Format) -> Self {
        ConfigDocument {
            format,
            ..Default::default()
        }
    }

    /// The individual theme names.
    ///
    /// A list is held as its `", "`-joined display string, so a theme name
    /// that itself contains a comma comes back split in two:
    ///
    /// ```rust
    /// use sitedoc::{ConfigDocument, Format};
    ///
    /// let mut config = ConfigDocument::new(Format::Toml);
    /// config.set_themes(["a,b", "c"]);
    /// assert_eq!(config.themes(), vec!["a", "b", "c"]);
    /// ```
    #[must_use]
    pub fn themes(&self) -> Vec<&str> {
        match &self.theme {
            Some(theme) if self.is_theme_list => theme
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect(),
            Some(theme) => vec![theme.as_str()],
            None => Vec::new(),
        }
    }

    /// Sets the theme from a list of names, keeping the list form on output.
    pub fn set_themes<I, S>(&mut self, themes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = themes.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.theme = Some(names.join(", "));
        self.is_theme_list = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_theme() {
        let doc = ConfigDocument {
            theme: Some("ananke".to_string()),
            ..ConfigDocument::default()
        };
        assert_eq!(doc.themes(), vec!["ananke"]);
    }

    #[test]
    fn test_set_themes() {
        let mut doc = ConfigDocument::new(Format::Toml);
        doc.set_themes(["a", "b"]);
        assert_eq!(doc.theme.as_deref(), Some("a, b"));
        assert!(doc.is_theme_list);
        assert_eq!(doc.themes(), vec!["a", "b"]);
    }
}
