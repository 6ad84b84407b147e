//! Key-by-key extraction from a decoded map and the writer for the reverse
//! direction.
//!
//! [`FieldReader`] removes known keys as they are converted. A value that
//! does not fit its field is put back where it was, so whatever remains at
//! the end is exactly the data the typed model could not hold.

use crate::date::{self, Timestamp};
use crate::{Map, Value};
use tracing::{debug, warn};

pub(crate) struct FieldReader {
    entity: &'static str,
    fields: Map,
}

impl FieldReader {
    pub(crate) fn new(entity: &'static str, fields: Map) -> Self {
        FieldReader { entity, fields }
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes `key` and converts it. On failure the raw value is restored
    /// in place and `None` is returned.
    pub(crate) fn read<T>(
        &mut self,
        key: &str,
        convert: impl FnOnce(Value) -> Result<T, Value>,
    ) -> Option<T> {
        let (index, key, value) = self.fields.remove_full(key)?;
        match convert(value) {
            Ok(converted) => Some(converted),
            Err(raw) => {
                debug!(
                    entity = self.entity,
                    key = %key,
                    found = raw.type_name(),
                    "value does not fit its typed field"
                );
                self.fields.insert_at(index, key, raw);
                None
            }
        }
    }

    pub(crate) fn string(&mut self, key: &str) -> Option<String> {
        self.read(key, to_string)
    }

    pub(crate) fn bool(&mut self, key: &str) -> Option<bool> {
        self.read(key, to_bool)
    }

    pub(crate) fn integer(&mut self, key: &str) -> Option<i64> {
        self.read(key, to_integer)
    }

    pub(crate) fn float(&mut self, key: &str) -> Option<f64> {
        self.read(key, to_float)
    }

    pub(crate) fn strings(&mut self, key: &str) -> Option<Vec<String>> {
        self.read(key, to_strings)
    }

    pub(crate) fn timestamp(&mut self, key: &str) -> Option<Timestamp> {
        self.read(key, to_timestamp)
    }

    pub(crate) fn map(&mut self, key: &str) -> Option<Map> {
        self.read(key, to_map)
    }

    /// Everything not consumed, in source order.
    pub(crate) fn into_rest(self) -> Map {
        self.fields
    }

    /// Ends the read for an entity that has nowhere to keep leftovers.
    pub(crate) fn discard_rest(self) {
        for (key, value) in self.fields {
            warn!(
                entity = self.entity,
                key = %key,
                found = value.type_name(),
                "dropping unrecognized or malformed key"
            );
        }
    }
}

pub(crate) fn to_string(value: Value) -> Result<String, Value> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) => {
            value.scalar_text().ok_or(value)
        }
        other => Err(other),
    }
}

pub(crate) fn to_bool(value: Value) -> Result<bool, Value> {
    let parsed = match &value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    };
    parsed.ok_or(value)
}

pub(crate) fn to_integer(value: Value) -> Result<i64, Value> {
    let parsed = match &value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some(*f as i64),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or(value)
}

pub(crate) fn to_float(value: Value) -> Result<f64, Value> {
    let parsed = match &value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    };
    parsed.ok_or(value)
}

/// A list of scalars, or a single scalar standing for a one-element list.
pub(crate) fn to_strings(value: Value) -> Result<Vec<String>, Value> {
    match value {
        Value::List(items) => {
            if items.iter().all(|item| !item.is_null() && item.is_scalar()) {
                Ok(items.iter().filter_map(Value::scalar_text).collect())
            } else {
                Err(Value::List(items))
            }
        }
        Value::Null => Err(Value::Null),
        scalar => scalar.scalar_text().map(|text| vec![text]).ok_or(scalar),
    }
}

pub(crate) fn to_timestamp(value: Value) -> Result<Timestamp, Value> {
    match value.as_str().and_then(date::parse) {
        Some(ts) => Ok(ts),
        None => Err(value),
    }
}

pub(crate) fn to_map(value: Value) -> Result<Map, Value> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(other),
    }
}

/// Builds a map of known keys in a fixed order, skipping unset fields.
#[derive(Default)]
pub(crate) struct FieldWriter {
    map: Map,
}

impl FieldWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn value(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }

    pub(crate) fn string(&mut self, key: &str, value: Option<&str>) {
        if let Some(s) = value {
            self.value(key, Value::from(s));
        }
    }

    pub(crate) fn bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(b) = value {
            self.value(key, Value::Bool(b));
        }
    }

    pub(crate) fn integer(&mut self, key: &str, value: Option<i64>) {
        if let Some(i) = value {
            self.value(key, Value::Integer(i));
        }
    }

    pub(crate) fn float(&mut self, key: &str, value: Option<f64>) {
        if let Some(f) = value {
            self.value(key, Value::Float(f));
        }
    }

    pub(crate) fn strings(&mut self, key: &str, value: Option<&[String]>) {
        if let Some(items) = value {
            self.value(key, Value::from(items.to_vec()));
        }
    }

    pub(crate) fn timestamp(&mut self, key: &str, value: Option<&Timestamp>) {
        if let Some(ts) = value {
            self.value(key, Value::String(date::format(ts)));
        }
    }

    pub(crate) fn map(&mut self, key: &str, value: &Map) {
        if !value.is_empty() {
            self.value(key, Value::Map(value.clone()));
        }
    }

    /// Appends `custom` sorted by key. Keys already written by a typed field
    /// are skipped.
    pub(crate) fn finish(mut self, custom: &Map) -> Map {
        let mut extra: Vec<_> = custom
            .iter()
            .filter(|(key, _)| !self.map.contains_key(key.as_str()))
            .collect();
        extra.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (key, value) in extra {
            self.map.insert(key.clone(), value.clone());
        }
        self.map
    }
}
