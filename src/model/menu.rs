//! Menu entries, as declared by a page and as defined in site configuration.

use crate::Map;

/// A page's membership in one site menu.
///
/// Frontmatter may spell menus as a bare name, a list of names or a map of
/// menu name to properties; every form projects to a list of `MenuEntry`.
///
/// # Examples
///
/// ```rust
/// use sitedoc::MenuEntry;
///
/// let entry = MenuEntry::new("main");
/// assert!(entry.is_bare());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuEntry {
    /// Menu this entry belongs to, e.g. `main`.
    pub menu: String,
    /// Display name; the page title is used when absent.
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub parent: Option<String>,
    pub weight: Option<i64>,
    pub pre: Option<String>,
    pub post: Option<String>,
    pub title: Option<String>,
    pub params: Map,
    /// Unrecognized entry keys, kept verbatim.
    pub custom_fields: Map,
}

impl MenuEntry {
    #[must_use]
    pub fn new(menu: impl Into<String>) -> Self {
        MenuEntry {
            menu: menu.into(),
            ..Default::default()
        }
    }

    /// True when the entry names its menu and nothing else.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.name.is_none()
            && self.identifier.is_none()
            && self.parent.is_none()
            && self.weight.is_none()
            && self.pre.is_none()
            && self.post.is_none()
            && self.title.is_none()
            && self.params.is_empty()
            && self.custom_fields.is_empty()
    }
}

/// One item of a menu defined in site configuration (`[[menus.main]]`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuItem {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub parent: Option<String>,
    pub url: Option<String>,
    /// Path of the content page the item links to (`pageRef`).
    pub page_ref: Option<String>,
    pub weight: Option<i64>,
    pub pre: Option<String>,
    pub post: Option<String>,
    pub title: Option<String>,
    pub params: Map,
    pub custom_fields: Map,
}

impl MenuItem {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        MenuItem {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}
