//! TOML codec.
//!
//! Tables, inline tables and arrays of tables all decode to nested
//! [`Value::Map`]/[`Value::List`] trees: `[[menu.main]]` blocks become
//! `menu → main → [ {..}, {..} ]`. Date and datetime literals have no
//! [`Value`] variant of their own and decode to their canonical text.
//!
//! Encoding checks the tree before handing it to `toml`: there is no TOML
//! null, an array may not mix tables with other values, and the document
//! root must be a table. Within every table, plain values are placed ahead of
//! sub-tables and arrays of tables, since TOML cannot return to a table's
//! keys once a header for a nested table has been written.

use super::{child_path, index_path, line_of, Format, FormatCodec};
use crate::{DecodeError, EncodeError, Map, Value};
use ::toml::value::Datetime;

/// Codec for TOML documents.
#[derive(Clone, Debug, Default)]
pub struct TomlCodec;

impl TomlCodec {
    #[must_use]
    pub fn new() -> Self {
        TomlCodec
    }
}

impl FormatCodec for TomlCodec {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        let table = ::toml::from_str::<::toml::Table>(text).map_err(|err| {
            let line = err.span().map(|span| line_of(text, span.start));
            DecodeError::new(Format::Toml, line, err.message().trim())
        })?;
        Ok(Value::Map(table_to_map(table)))
    }

    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        let Value::Map(map) = value else {
            return Err(EncodeError::unrepresentable(
                Format::Toml,
                "",
                format!("a document must be a table, found {}", value.type_name()),
            ));
        };
        let table = map_to_table(map, "")?;
        ::toml::to_string(&table).map_err(|err| EncodeError::Backend {
            format: Format::Toml,
            reason: err.to_string(),
        })
    }
}

fn table_to_map(table: ::toml::Table) -> Map {
    table
        .into_iter()
        .map(|(key, value)| (key, from_toml(value)))
        .collect()
}

fn from_toml(value: ::toml::Value) -> Value {
    match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::Integer(i),
        ::toml::Value::Float(f) => Value::Float(f),
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        ::toml::Value::Array(items) => Value::List(items.into_iter().map(from_toml).collect()),
        ::toml::Value::Table(table) => Value::Map(table_to_map(table)),
    }
}

/// Values that become `[header]` or `[[header]]` sections.
fn is_section(value: &Value) -> bool {
    match value {
        Value::Map(_) => true,
        Value::List(items) => !items.is_empty() && items.iter().all(Value::is_map),
        _ => false,
    }
}

fn map_to_table(map: &Map, path: &str) -> Result<::toml::Table, EncodeError> {
    let mut table = ::toml::Table::new();
    let mut sections = Vec::new();
    for (key, value) in map {
        let converted = to_toml(value, &child_path(path, key))?;
        if is_section(value) {
            sections.push((key.clone(), converted));
        } else {
            table.insert(key.clone(), converted);
        }
    }
    table.extend(sections);
    Ok(table)
}

fn to_toml(value: &Value, path: &str) -> Result<::toml::Value, EncodeError> {
    Ok(match value {
        Value::Null => {
            return Err(EncodeError::unrepresentable(
                Format::Toml,
                path,
                "TOML has no null value",
            ))
        }
        Value::Bool(b) => ::toml::Value::Boolean(*b),
        Value::Integer(i) => ::toml::Value::Integer(*i),
        Value::Float(f) => ::toml::Value::Float(*f),
        Value::String(s) => match as_datetime(s) {
            Some(dt) => ::toml::Value::Datetime(dt),
            None => ::toml::Value::String(s.clone()),
        },
        Value::List(items) => {
            let tables = items.iter().filter(|item| item.is_map()).count();
            if tables != 0 && tables != items.len() {
                return Err(EncodeError::unrepresentable(
                    Format::Toml,
                    path,
                    "an array cannot mix tables with other values",
                ));
            }
            let converted = items
                .iter()
                .enumerate()
                .map(|(i, item)| to_toml(item, &index_path(path, i)))
                .collect::<Result<Vec<_>, _>>()?;
            ::toml::Value::Array(converted)
        }
        Value::Map(map) => ::toml::Value::Table(map_to_table(map, path)?),
    })
}

/// A string that is exactly the canonical spelling of a TOML datetime, so
/// writing it as a bare literal decodes back to the same text.
fn as_datetime(s: &str) -> Option<Datetime> {
    let dt = s.parse::<Datetime>().ok()?;
    (dt.to_string() == s).then_some(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn decode(text: &str) -> Value {
        TomlCodec.decode(text).unwrap()
    }

    #[test]
    fn test_decode_array_of_tables() {
        let text = r#"
title = "Site"

[[menu.main]]
name = "Home"
url = "/"
weight = 1

[[menu.main]]
name = "Posts"
url = "/posts/"
weight = 2
"#;
        let value = decode(text);
        let main = value
            .as_map()
            .and_then(|m| m.get("menu"))
            .and_then(Value::as_map)
            .and_then(|m| m.get("main"))
            .and_then(Value::as_list)
            .unwrap();
        assert_eq!(main.len(), 2);
        assert_eq!(main[0].as_map().unwrap().get("name"), Some(&Value::from("Home")));
        assert_eq!(main[1].as_map().unwrap().get("name"), Some(&Value::from("Posts")));
        let keys: Vec<_> = main[1].as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "url", "weight"]);
    }

    #[test]
    fn test_decode_numbers_and_dates() {
        let value = decode("a = 70\nb = 70.0\nc = 7e1\nd = 2024-01-15\ne = 1979-05-27T07:32:00Z\n");
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::Integer(70)));
        assert_eq!(map.get("b"), Some(&Value::Float(70.0)));
        assert_eq!(map.get("c"), Some(&Value::Float(70.0)));
        assert_eq!(map.get("d"), Some(&Value::from("2024-01-15")));
        assert_eq!(map.get("e"), Some(&Value::from("1979-05-27T07:32:00Z")));
    }

    #[test]
    fn test_decode_inline_table() {
        let value = decode("extra = { a = [1, \"x\", true] }\n");
        assert_eq!(value, value!({ "extra": { "a": [1, "x", true] } }));
    }

    #[test]
    fn test_decode_errors() {
        let err = TomlCodec.decode("a = 1\na = 2\n").unwrap_err();
        assert_eq!(err.format(), Format::Toml);
        assert!(err.line().is_some());

        assert!(TomlCodec.decode("[section\n").is_err());
        assert!(TomlCodec.decode("s = \"open\n").is_err());
    }

    #[test]
    fn test_encode_puts_values_before_tables() {
        let value = value!({
            "params": { "color": "blue" },
            "title": "Site",
            "menu": { "main": [{ "name": "Home" }, { "name": "Posts" }] },
            "baseURL": "https://example.org/"
        });
        let text = TomlCodec.encode(&value).unwrap();

        let title = text.find("title").unwrap();
        let base = text.find("baseURL").unwrap();
        let params = text.find("[params]").unwrap();
        let menu = text.find("[[menu.main]]").unwrap();
        assert!(title < params && base < params && params < menu);

        let back = decode(&text);
        assert_eq!(back, value);
        let keys: Vec<_> = back.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "baseURL", "params", "menu"]);
    }

    #[test]
    fn test_encode_array_of_tables_keeps_entry_and_key_order() {
        let value = value!({
            "menu": { "main": [
                { "weight": 1, "name": "Home", "url": "/" },
                { "url": "/posts/", "name": "Posts" },
                { "name": "About" }
            ] }
        });
        let text = TomlCodec.encode(&value).unwrap();
        assert_eq!(text.matches("[[menu.main]]").count(), 3);

        let back = decode(&text);
        let main = back
            .as_map()
            .and_then(|m| m.get("menu"))
            .and_then(Value::as_map)
            .and_then(|m| m.get("main"))
            .and_then(Value::as_list)
            .unwrap();
        let names: Vec<_> = main
            .iter()
            .map(|entry| entry.as_map().unwrap().get("name").unwrap().clone())
            .collect();
        assert_eq!(names, vec![value!("Home"), value!("Posts"), value!("About")]);
        let first_keys: Vec<_> = main[0].as_map().unwrap().keys().cloned().collect();
        assert_eq!(first_keys, vec!["weight", "name", "url"]);
    }

    #[test]
    fn test_encode_rejects_null() {
        let err = TomlCodec
            .encode(&value!({ "extra": { "gone": null } }))
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Unrepresentable { ref path, .. } if path == "extra.gone"
        ));
    }

    #[test]
    fn test_encode_rejects_mixed_table_array() {
        let err = TomlCodec
            .encode(&value!({ "items": [1, { "a": 2 }] }))
            .unwrap_err();
        assert_eq!(err.format(), Format::Toml);
        assert!(err.to_string().contains("`items`"));
    }

    #[test]
    fn test_encode_rejects_non_table_root() {
        assert!(TomlCodec.encode(&value!([1, 2])).is_err());
    }

    #[test]
    fn test_encode_dates_as_literals_only_when_canonical() {
        let value = value!({ "date": "2024-01-15", "loose": "2024-01-15 10:00:00Z" });
        let text = TomlCodec.encode(&value).unwrap();
        assert!(text.contains("date = 2024-01-15\n"));
        assert!(text.contains("loose = \"2024-01-15 10:00:00Z\""));
        assert_eq!(decode(&text), value);
    }

    #[test]
    fn test_float_stays_float() {
        let text = TomlCodec.encode(&value!({ "ratio": 70.0, "count": 70 })).unwrap();
        let back = decode(&text);
        assert_eq!(back.as_map().unwrap().get("ratio"), Some(&Value::Float(70.0)));
        assert_eq!(back.as_map().unwrap().get("count"), Some(&Value::Integer(70)));
    }
}
