//! Site configuration projection.

use super::fields::{FieldReader, FieldWriter};
use crate::model::{ConfigDocument, MenuItem};
use crate::{Format, Map, Value};
use indexmap::IndexMap;

/// Promotes the well-known settings of a decoded configuration map into a
/// [`ConfigDocument`]. Unrecognized keys are kept whole in `custom_fields`.
///
/// `theme` may be a single name or a list of names; a list is joined with
/// `", "` and [`ConfigDocument::is_theme_list`] is set. Non-string list
/// elements are skipped.
#[must_use]
pub fn project_config(map: Map, format: Format) -> ConfigDocument {
    let mut fields = FieldReader::new("config", map);
    let (theme, is_theme_list) = match fields.read("theme", theme) {
        Some((theme, is_list)) => (Some(theme), is_list),
        None => (None, false),
    };
    let menus = if fields.contains("menus") {
        fields.read("menus", menus)
    } else {
        fields.read("menu", menus)
    };

    let mut doc = ConfigDocument {
        format,
        base_url: fields.string("baseURL"),
        title: fields.string("title"),
        language_code: fields.string("languageCode"),
        theme,
        is_theme_list,
        copyright: fields.string("copyright"),
        build_drafts: fields.bool("buildDrafts"),
        build_future: fields.bool("buildFuture"),
        build_expired: fields.bool("buildExpired"),
        enable_robots_txt: fields.bool("enableRobotsTXT"),
        summary_length: fields.integer("summaryLength"),
        default_content_language: fields.string("defaultContentLanguage"),
        time_zone: fields.string("timeZone"),
        taxonomies: fields.read("taxonomies", taxonomies).unwrap_or_default(),
        menus: menus.unwrap_or_default(),
        params: fields.map("params").unwrap_or_default(),
        custom_fields: Map::new(),
    };
    doc.custom_fields = fields.into_rest();
    doc
}

/// Writes a [`ConfigDocument`] back to a map: typed settings in a fixed
/// order, then `params`, then custom fields sorted by key.
#[must_use]
pub fn unproject_config(doc: &ConfigDocument) -> Map {
    let mut out = FieldWriter::new();
    out.string("baseURL", doc.base_url.as_deref());
    out.string("title", doc.title.as_deref());
    out.string("languageCode", doc.language_code.as_deref());
    if doc.theme.is_some() {
        let themes = doc.themes();
        if doc.is_theme_list {
            let names = themes.into_iter().map(Value::from).collect();
            out.value("theme", Value::List(names));
        } else {
            out.string("theme", themes.first().copied());
        }
    }
    out.string("copyright", doc.copyright.as_deref());

    out.bool("buildDrafts", doc.build_drafts);
    out.bool("buildFuture", doc.build_future);
    out.bool("buildExpired", doc.build_expired);
    out.bool("enableRobotsTXT", doc.enable_robots_txt);

    out.integer("summaryLength", doc.summary_length);
    out.string("defaultContentLanguage", doc.default_content_language.as_deref());
    out.string("timeZone", doc.time_zone.as_deref());

    if !doc.taxonomies.is_empty() {
        let taxonomies = doc
            .taxonomies
            .iter()
            .map(|(singular, plural)| (singular.clone(), Value::from(plural.as_str())))
            .collect();
        out.value("taxonomies", Value::Map(taxonomies));
    }
    if !doc.menus.is_empty() {
        let menus = doc
            .menus
            .iter()
            .map(|(name, items)| {
                (name.clone(), Value::List(items.iter().map(menu_item_value).collect()))
            })
            .collect();
        out.value("menus", Value::Map(menus));
    }

    out.map("params", &doc.params);
    out.finish(&doc.custom_fields)
}

fn theme(value: Value) -> Result<(String, bool), Value> {
    match value {
        Value::String(name) => Ok((name, false)),
        Value::List(items) => {
            let names: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            Ok((names.join(", "), true))
        }
        other => Err(other),
    }
}

/// Taxonomy names must all be scalars; anything else is left untyped.
fn taxonomies(value: Value) -> Result<IndexMap<String, String>, Value> {
    let map = match value {
        Value::Map(map) => map,
        other => return Err(other),
    };
    if !map.values().all(|v| !v.is_null() && v.is_scalar()) {
        return Err(Value::Map(map));
    }
    Ok(map
        .iter()
        .filter_map(|(singular, plural)| Some((singular.clone(), plural.scalar_text()?)))
        .collect())
}

/// Menu name to a list of items, or to a single item table.
fn menus(value: Value) -> Result<IndexMap<String, Vec<MenuItem>>, Value> {
    let map = match value {
        Value::Map(map) => map,
        other => return Err(other),
    };
    let well_formed = map.values().all(|items| match items {
        Value::Map(_) => true,
        Value::List(items) => items.iter().all(Value::is_map),
        _ => false,
    });
    if !well_formed {
        return Err(Value::Map(map));
    }

    Ok(map
        .into_iter()
        .map(|(name, items)| {
            let items = match items {
                Value::Map(item) => vec![menu_item(item)],
                Value::List(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Map(item) => Some(menu_item(item)),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            (name, items)
        })
        .collect())
}

fn menu_item(map: Map) -> MenuItem {
    let mut fields = FieldReader::new("menu item", map);
    let mut item = MenuItem {
        name: fields.string("name"),
        identifier: fields.string("identifier"),
        parent: fields.string("parent"),
        url: fields.string("url"),
        page_ref: fields.string("pageRef"),
        weight: fields.integer("weight"),
        pre: fields.string("pre"),
        post: fields.string("post"),
        title: fields.string("title"),
        params: fields.map("params").unwrap_or_default(),
        custom_fields: Map::new(),
    };
    item.custom_fields = fields.into_rest();
    item
}

fn menu_item_value(item: &MenuItem) -> Value {
    let mut out = FieldWriter::new();
    out.string("name", item.name.as_deref());
    out.string("identifier", item.identifier.as_deref());
    out.string("parent", item.parent.as_deref());
    out.string("url", item.url.as_deref());
    out.string("pageRef", item.page_ref.as_deref());
    out.integer("weight", item.weight);
    out.string("pre", item.pre.as_deref());
    out.string("post", item.post.as_deref());
    out.string("title", item.title.as_deref());
    out.map("params", &item.params);
    Value::Map(out.finish(&item.custom_fields))
}
