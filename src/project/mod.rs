//! Projection between decoded [`Map`](crate::Map)s and typed documents.
//!
//! `project_*` promotes known keys into typed fields and keeps every other
//! key in the document's `custom_fields`; `unproject_*` writes a document
//! back out in a fixed key order. Together they are lossless: an untouched
//! document survives serialize → parse with every typed field and every
//! custom entry intact.

mod config;
mod fields;
mod frontmatter;

pub use self::config::{project_config, unproject_config};
pub use self::frontmatter::{project_frontmatter, unproject_frontmatter};
