//! Typed documents and the entities nested inside them.
//!
//! These are plain data: build them, edit them in place, and hand them back
//! to an engine to get text. Nothing here tracks whether a document changed.

mod config;
mod frontmatter;
mod menu;
mod page;

pub use self::config::ConfigDocument;
pub use self::frontmatter::FrontmatterDocument;
pub use self::menu::{MenuEntry, MenuItem};
pub use self::page::{
    BuildList, BuildOptions, BuildRender, CascadeEntry, CascadeTarget, ChangeFreq,
    ResourceConfig, SitemapConfig,
};
