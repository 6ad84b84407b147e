//! Frontmatter projection.

use super::fields::{self, FieldReader, FieldWriter};
use crate::model::{
    BuildList, BuildOptions, BuildRender, CascadeEntry, CascadeTarget, ChangeFreq,
    FrontmatterDocument, MenuEntry, ResourceConfig, SitemapConfig,
};
use crate::{Format, Map, Value};

const CASCADE_TARGET_KEY: &str = "_target";

/// Promotes the well-known keys of a decoded frontmatter map into a
/// [`FrontmatterDocument`]. Unknown keys, and known keys whose value does not
/// fit, end up in `custom_fields` unchanged.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{project_frontmatter, value, Format, Value};
///
/// let Value::Map(map) = value!({ "title": "Hi", "weight": "heavy", "extra": [1] }) else {
///     unreachable!()
/// };
/// let doc = project_frontmatter(map, Format::Yaml);
/// assert_eq!(doc.title.as_deref(), Some("Hi"));
/// assert_eq!(doc.weight, None);
/// assert_eq!(doc.custom_fields.get("weight"), Some(&Value::from("heavy")));
/// assert!(doc.custom_fields.contains_key("extra"));
/// ```
#[must_use]
pub fn project_frontmatter(map: Map, format: Format) -> FrontmatterDocument {
    let mut fields = FieldReader::new("frontmatter", map);
    let menus = if fields.contains("menus") {
        fields.read("menus", menu_entries)
    } else {
        fields.read("menu", menu_entries)
    };

    let mut doc = FrontmatterDocument {
        format,
        title: fields.string("title"),
        date: fields.timestamp("date"),
        publish_date: fields.timestamp("publishDate"),
        expiry_date: fields.timestamp("expiryDate"),
        lastmod: fields.timestamp("lastmod"),
        draft: fields.bool("draft"),
        description: fields.string("description"),
        summary: fields.string("summary"),
        link_title: fields.string("linkTitle"),
        tags: fields.strings("tags"),
        categories: fields.strings("categories"),
        keywords: fields.strings("keywords"),
        aliases: fields.strings("aliases"),
        weight: fields.integer("weight"),
        slug: fields.string("slug"),
        url: fields.string("url"),
        content_type: fields.string("type"),
        layout: fields.string("layout"),
        markup: fields.string("markup"),
        translation_key: fields.string("translationKey"),
        headless: fields.bool("headless"),
        is_cjk_language: fields.bool("isCJKLanguage"),
        outputs: fields.strings("outputs"),
        menus: menus.unwrap_or_default(),
        build: fields.read("build", build_options).unwrap_or_default(),
        sitemap: fields.read("sitemap", sitemap_config).unwrap_or_default(),
        resources: fields.read("resources", resources).unwrap_or_default(),
        cascade: fields.read("cascade", cascade).unwrap_or_default(),
        params: fields.map("params").unwrap_or_default(),
        custom_fields: Map::new(),
    };
    doc.custom_fields = fields.into_rest();
    doc
}

/// Writes a [`FrontmatterDocument`] back to a map with its keys in a fixed
/// order: typed fields by group, then `params`, then custom fields sorted by
/// key. Unset fields, default build options and an empty sitemap block are
/// left out.
#[must_use]
pub fn unproject_frontmatter(doc: &FrontmatterDocument) -> Map {
    let mut out = FieldWriter::new();
    out.string("title", doc.title.as_deref());
    out.timestamp("date", doc.date.as_ref());
    out.timestamp("publishDate", doc.publish_date.as_ref());
    out.timestamp("expiryDate", doc.expiry_date.as_ref());
    out.timestamp("lastmod", doc.lastmod.as_ref());
    out.bool("draft", doc.draft);

    out.string("description", doc.description.as_deref());
    out.string("summary", doc.summary.as_deref());
    out.string("linkTitle", doc.link_title.as_deref());

    out.strings("tags", doc.tags.as_deref());
    out.strings("categories", doc.categories.as_deref());
    out.strings("keywords", doc.keywords.as_deref());
    out.strings("aliases", doc.aliases.as_deref());

    out.integer("weight", doc.weight);
    out.string("slug", doc.slug.as_deref());
    out.string("url", doc.url.as_deref());
    out.string("type", doc.content_type.as_deref());
    out.string("layout", doc.layout.as_deref());
    out.string("markup", doc.markup.as_deref());
    out.string("translationKey", doc.translation_key.as_deref());
    out.bool("headless", doc.headless);
    out.bool("isCJKLanguage", doc.is_cjk_language);
    out.strings("outputs", doc.outputs.as_deref());

    if !doc.menus.is_empty() {
        out.value("menus", menus_value(&doc.menus));
    }
    if !doc.build.is_default() {
        out.value("build", build_value(&doc.build));
    }
    if !doc.sitemap.is_empty() {
        out.value("sitemap", sitemap_value(&doc.sitemap));
    }
    if !doc.resources.is_empty() {
        let items = doc.resources.iter().map(resource_value).collect();
        out.value("resources", Value::List(items));
    }
    if !doc.cascade.is_empty() {
        let items = doc.cascade.iter().map(cascade_value).collect();
        out.value("cascade", Value::List(items));
    }

    out.map("params", &doc.params);
    out.finish(&doc.custom_fields)
}

/// `menus: main`, `menus: [main, footer]` or `menus: { main: { weight: 1 } }`.
fn menu_entries(value: Value) -> Result<Vec<MenuEntry>, Value> {
    match value {
        Value::String(menu) => Ok(vec![MenuEntry::new(menu)]),
        Value::List(items) => {
            if items.iter().all(Value::is_string) {
                Ok(items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(MenuEntry::new)
                    .collect())
            } else {
                Err(Value::List(items))
            }
        }
        Value::Map(menus) => {
            if !menus.values().all(|v| v.is_null() || v.is_map()) {
                return Err(Value::Map(menus));
            }
            Ok(menus
                .into_iter()
                .map(|(menu, props)| match props {
                    Value::Map(props) => menu_entry(menu, props),
                    _ => MenuEntry::new(menu),
                })
                .collect())
        }
        other => Err(other),
    }
}

fn menu_entry(menu: String, props: Map) -> MenuEntry {
    let mut fields = FieldReader::new("menu entry", props);
    let mut entry = MenuEntry {
        menu,
        name: fields.string("name"),
        identifier: fields.string("identifier"),
        parent: fields.string("parent"),
        weight: fields.integer("weight"),
        pre: fields.string("pre"),
        post: fields.string("post"),
        title: fields.string("title"),
        params: fields.map("params").unwrap_or_default(),
        custom_fields: Map::new(),
    };
    entry.custom_fields = fields.into_rest();
    entry
}

fn menus_value(entries: &[MenuEntry]) -> Value {
    if entries.iter().all(MenuEntry::is_bare) {
        return Value::List(entries.iter().map(|e| Value::from(e.menu.as_str())).collect());
    }
    let mut menus = Map::new();
    for entry in entries {
        let mut props = FieldWriter::new();
        props.string("name", entry.name.as_deref());
        props.string("identifier", entry.identifier.as_deref());
        props.string("parent", entry.parent.as_deref());
        props.integer("weight", entry.weight);
        props.string("pre", entry.pre.as_deref());
        props.string("post", entry.post.as_deref());
        props.string("title", entry.title.as_deref());
        props.map("params", &entry.params);
        menus.insert(entry.menu.clone(), Value::Map(props.finish(&entry.custom_fields)));
    }
    Value::Map(menus)
}

fn build_options(value: Value) -> Result<BuildOptions, Value> {
    let map = fields::to_map(value)?;
    let mut fields = FieldReader::new("build", map);
    let defaults = BuildOptions::default();
    let build = BuildOptions {
        list: fields.read("list", build_list).unwrap_or(defaults.list),
        render: fields.read("render", build_render).unwrap_or(defaults.render),
        publish_resources: fields
            .bool("publishResources")
            .unwrap_or(defaults.publish_resources),
    };
    fields.discard_rest();
    Ok(build)
}

/// `true`/`false` are older spellings of `always`/`never`.
fn build_list(value: Value) -> Result<BuildList, Value> {
    let parsed = match &value {
        Value::Bool(true) => Some(BuildList::Always),
        Value::Bool(false) => Some(BuildList::Never),
        Value::String(s) => BuildList::from_name(s),
        _ => None,
    };
    parsed.ok_or(value)
}

fn build_render(value: Value) -> Result<BuildRender, Value> {
    let parsed = match &value {
        Value::Bool(true) => Some(BuildRender::Always),
        Value::Bool(false) => Some(BuildRender::Never),
        Value::String(s) => BuildRender::from_name(s),
        _ => None,
    };
    parsed.ok_or(value)
}

fn build_value(build: &BuildOptions) -> Value {
    let mut out = FieldWriter::new();
    out.string("list", Some(build.list.as_str()));
    out.string("render", Some(build.render.as_str()));
    out.bool("publishResources", Some(build.publish_resources));
    Value::Map(out.finish(&Map::new()))
}

fn sitemap_config(value: Value) -> Result<SitemapConfig, Value> {
    let map = fields::to_map(value)?;
    let mut fields = FieldReader::new("sitemap", map);
    let sitemap = SitemapConfig {
        changefreq: fields.read("changefreq", |v| {
            v.as_str().and_then(ChangeFreq::from_name).ok_or(v)
        }),
        priority: fields.float("priority"),
        disable: fields.bool("disable").unwrap_or(false),
    };
    fields.discard_rest();
    Ok(sitemap)
}

fn sitemap_value(sitemap: &SitemapConfig) -> Value {
    let mut out = FieldWriter::new();
    out.string("changefreq", sitemap.changefreq.map(ChangeFreq::as_str));
    out.float("priority", sitemap.priority);
    if sitemap.disable {
        out.bool("disable", Some(true));
    }
    Value::Map(out.finish(&Map::new()))
}

fn resources(value: Value) -> Result<Vec<ResourceConfig>, Value> {
    let items = match value {
        Value::List(items) if items.iter().all(Value::is_map) => items,
        other => return Err(other),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| fields::to_map(item).ok())
        .map(resource)
        .collect())
}

fn resource(map: Map) -> ResourceConfig {
    let mut fields = FieldReader::new("resource", map);
    let mut resource = ResourceConfig {
        src: fields.string("src").unwrap_or_default(),
        name: fields.string("name"),
        title: fields.string("title"),
        params: fields.map("params").unwrap_or_default(),
        custom_fields: Map::new(),
    };
    resource.custom_fields = fields.into_rest();
    resource
}

fn resource_value(resource: &ResourceConfig) -> Value {
    let mut out = FieldWriter::new();
    if !resource.src.is_empty() {
        out.string("src", Some(resource.src.as_str()));
    }
    out.string("name", resource.name.as_deref());
    out.string("title", resource.title.as_deref());
    out.map("params", &resource.params);
    Value::Map(out.finish(&resource.custom_fields))
}

/// A single cascade map or a list of them.
fn cascade(value: Value) -> Result<Vec<CascadeEntry>, Value> {
    match value {
        Value::Map(map) => Ok(vec![cascade_entry(map)]),
        Value::List(items) if items.iter().all(Value::is_map) => Ok(items
            .into_iter()
            .filter_map(|item| fields::to_map(item).ok())
            .map(cascade_entry)
            .collect()),
        other => Err(other),
    }
}

fn cascade_entry(mut values: Map) -> CascadeEntry {
    let target = match values.remove_full(CASCADE_TARGET_KEY) {
        Some((_, _, Value::Map(target))) => Some(cascade_target(target)),
        Some((index, key, other)) => {
            values.insert_at(index, key, other);
            None
        }
        None => None,
    };
    CascadeEntry { values, target }
}

fn cascade_target(map: Map) -> CascadeTarget {
    let mut fields = FieldReader::new("cascade target", map);
    let target = CascadeTarget {
        path: fields.string("path"),
        kind: fields.string("kind"),
        lang: fields.string("lang"),
        environment: fields.string("environment"),
    };
    fields.discard_rest();
    target
}

fn cascade_value(entry: &CascadeEntry) -> Value {
    let mut map = entry.values.clone();
    if let Some(target) = &entry.target {
        let mut out = FieldWriter::new();
        out.string("path", target.path.as_deref());
        out.string("kind", target.kind.as_deref());
        out.string("lang", target.lang.as_deref());
        out.string("environment", target.environment.as_deref());
        map.insert(CASCADE_TARGET_KEY.to_string(), Value::Map(out.finish(&Map::new())));
    }
    Value::Map(map)
}
