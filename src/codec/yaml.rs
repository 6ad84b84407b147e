//! YAML codec.
//!
//! Decoding goes through `serde_yaml` into [`Value`]. Encoding uses the
//! [`Emitter`] below rather than `serde_yaml`'s own writer so the output has
//! a stable, hand-edit friendly shape:
//!
//! - `key: value` block mappings, nested by the configured indent (2 by default)
//! - block sequences indented under their key
//! - literal block scalars (`|`, `|-`) for multi-line strings
//! - strings left unquoted unless reading them back would yield something else
//!
//! Integers are plain decimal on the way in too: `serde_yaml` resolves
//! `0x10` or `0o17` to numbers, and those scalars are read again as their
//! source text so the author's spelling survives as a string.
//!
//! ```rust
//! use sitedoc::{value, FormatCodec, YamlCodec};
//!
//! let codec = YamlCodec::default();
//! let text = codec.encode(&value!({ "title": "Hello", "tags": ["a", "b"] })).unwrap();
//! assert_eq!(text, "title: Hello\ntags:\n  - a\n  - b\n");
//! ```

use super::{Format, FormatCodec};
use crate::{DecodeError, EncodeError, EncodeOptions, Map, Value};
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Codec for the YAML subset used by site configuration and frontmatter.
#[derive(Clone, Debug, Default)]
pub struct YamlCodec {
    options: EncodeOptions,
}

impl YamlCodec {
    #[must_use]
    pub fn new(options: EncodeOptions) -> Self {
        YamlCodec { options }
    }
}

impl FormatCodec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        if is_blank_document(text) {
            return Ok(Value::Null);
        }
        let value = serde_yaml::from_str::<Value>(text).map_err(decode_error)?;
        if !has_integer(&value) {
            return Ok(value);
        }
        Respell(&value)
            .deserialize(serde_yaml::Deserializer::from_str(text))
            .map_err(decode_error)
    }

    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        let mut emitter = Emitter::new(self.options.indent);
        emitter.write_root(value);
        Ok(emitter.into_inner())
    }
}

fn decode_error(err: serde_yaml::Error) -> DecodeError {
    let line = err.location().map(|location| location.line());
    DecodeError::new(Format::Yaml, line, err.to_string())
}

fn has_integer(value: &Value) -> bool {
    match value {
        Value::Integer(_) => true,
        Value::List(items) => items.iter().any(has_integer),
        Value::Map(map) => map.values().any(has_integer),
        _ => false,
    }
}

/// Optional sign followed by decimal digits.
fn is_decimal_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Second pass over the document, guided by the tree from the first. Each
/// integer is read again as text, and kept as a string unless its spelling
/// is plain decimal.
struct Respell<'a>(&'a Value);

impl<'de> DeserializeSeed<'de> for Respell<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.0 {
            Value::Integer(i) => {
                let raw = String::deserialize(deserializer)?;
                if is_decimal_integer(raw.trim()) {
                    Ok(Value::Integer(*i))
                } else {
                    Ok(Value::String(raw))
                }
            }
            Value::List(items) => deserializer.deserialize_seq(RespellList(items)),
            Value::Map(map) => deserializer.deserialize_map(RespellMap(map)),
            other => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(other.clone())
            }
        }
    }
}

struct RespellList<'a>(&'a [Value]);

impl<'de> Visitor<'de> for RespellList<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(self.0.len());
        for (index, item) in self.0.iter().enumerate() {
            let item = seq
                .next_element_seed(Respell(item))?
                .ok_or_else(|| de::Error::invalid_length(index, &self))?;
            items.push(item);
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Value::List(items))
    }
}

struct RespellMap<'a>(&'a Map);

impl<'de> Visitor<'de> for RespellMap<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::with_capacity(self.0.len());
        while let Some(key) = access.next_key::<String>()? {
            match self.0.get(&key) {
                Some(first) => {
                    let value = access.next_value_seed(Respell(first))?;
                    map.insert(key, value);
                }
                None => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Value::Map(map))
    }
}

/// A document holding nothing but blank lines and comments.
fn is_blank_document(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Block-style YAML writer.
struct Emitter {
    output: String,
    step: usize,
}

impl Emitter {
    fn new(indent: usize) -> Self {
        Emitter {
            output: String::with_capacity(256),
            // A sequence entry needs at least "- " before its content.
            step: indent.max(2),
        }
    }

    fn into_inner(self) -> String {
        self.output
    }

    fn pad(&mut self, indent: usize) {
        self.output.extend(std::iter::repeat(' ').take(indent));
    }

    fn write_root(&mut self, value: &Value) {
        match value {
            Value::Map(map) if !map.is_empty() => self.write_map(map, 0),
            Value::List(items) if !items.is_empty() => self.write_list(items, 0),
            Value::String(s) if fits_literal_block(s) => self.write_literal(s, self.step),
            other => {
                self.write_inline(other);
                self.output.push('\n');
            }
        }
    }

    fn write_map(&mut self, map: &Map, indent: usize) {
        for (key, value) in map {
            self.pad(indent);
            self.write_entry(key, value, indent);
        }
    }

    fn write_entry(&mut self, key: &str, value: &Value, indent: usize) {
        self.write_string(key);
        self.output.push(':');
        self.write_after_indicator(value, indent);
    }

    fn write_list(&mut self, items: &[Value], indent: usize) {
        let inner = indent + self.step;
        for item in items {
            self.pad(indent);
            self.output.push('-');
            match item {
                Value::Map(map) if !map.is_empty() => {
                    // The first entry shares the dash line; the rest align under it.
                    self.pad(self.step - 1);
                    let mut entries = map.iter();
                    if let Some((key, value)) = entries.next() {
                        self.write_entry(key, value, inner);
                    }
                    for (key, value) in entries {
                        self.pad(inner);
                        self.write_entry(key, value, inner);
                    }
                }
                other => self.write_after_indicator(other, indent),
            }
        }
    }

    /// Writes a value that follows a `key:` or `-` indicator at `indent`.
    fn write_after_indicator(&mut self, value: &Value, indent: usize) {
        let inner = indent + self.step;
        match value {
            Value::Map(map) if !map.is_empty() => {
                self.output.push('\n');
                self.write_map(map, inner);
            }
            Value::List(items) if !items.is_empty() => {
                self.output.push('\n');
                self.write_list(items, inner);
            }
            Value::String(s) if fits_literal_block(s) => {
                self.output.push(' ');
                self.write_literal(s, inner);
            }
            other => {
                self.output.push(' ');
                self.write_inline(other);
                self.output.push('\n');
            }
        }
    }

    fn write_literal(&mut self, s: &str, indent: usize) {
        let (header, content) = match s.strip_suffix('\n') {
            Some(content) => ("|", content),
            None => ("|-", s),
        };
        self.output.push_str(header);
        self.output.push('\n');
        for line in content.split('\n') {
            if !line.is_empty() {
                self.pad(indent);
                self.output.push_str(line);
            }
            self.output.push('\n');
        }
    }

    fn write_inline(&mut self, value: &Value) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => self.output.push_str(&format_float(*f)),
            Value::String(s) => self.write_string(s),
            // Only empty collections are written inline.
            Value::List(_) => self.output.push_str("[]"),
            Value::Map(_) => self.output.push_str("{}"),
        }
    }

    fn write_string(&mut self, s: &str) {
        if !needs_quotes(s) {
            self.output.push_str(s);
            return;
        }
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\0' => self.output.push_str("\\0"),
                c if needs_escape(c) => {
                    let code = u32::from(c);
                    if code <= 0xFF {
                        self.output.push_str(&format!("\\x{code:02X}"));
                    } else {
                        self.output.push_str(&format!("\\u{code:04X}"));
                    }
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}

/// Floats always carry a `.` or an exponent so they read back as floats.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        format!("{f:?}")
    }
}

/// Characters that YAML treats as breaks or that are not printable.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

/// Multi-line strings that a literal block scalar reproduces exactly.
///
/// Leading indentation on any line would be swallowed by the block's
/// indentation detection, and more than one trailing newline would need
/// keep-chomping, so both fall back to a double-quoted scalar.
fn fits_literal_block(s: &str) -> bool {
    s.contains('\n')
        && !s.starts_with('\n')
        && !s.ends_with("\n\n")
        && s.chars().all(|c| c == '\n' || c == '\t' || !needs_escape(c))
        && s.split('\n')
            .all(|line| !line.starts_with(' ') && !line.starts_with('\t'))
}

/// Spellings that some YAML readers resolve to booleans or null.
const AMBIGUOUS_WORDS: &[&str] = &[
    "y", "n", "yes", "no", "on", "off", "true", "false", "null", "~",
];

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.chars().any(needs_escape)
        || AMBIGUOUS_WORDS.contains(&s.to_ascii_lowercase().as_str())
        || looks_numeric(s)
        || !reads_back_as_itself(s)
}

fn looks_numeric(s: &str) -> bool {
    let unsigned = s.trim_start_matches(['+', '-']);
    s.parse::<f64>().is_ok()
        || (!unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit() || c == '_'))
        || ["0x", "0o", "0b"].iter().any(|prefix| unsigned.starts_with(prefix))
}

/// Whether `s` written as a plain scalar decodes back to the same string.
fn reads_back_as_itself(s: &str) -> bool {
    matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(read)) if read == s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn encode(value: &Value) -> String {
        YamlCodec::default().encode(value).unwrap()
    }

    fn decode(text: &str) -> Value {
        YamlCodec::default().decode(text).unwrap()
    }

    #[test]
    fn test_decode_classifies_scalars() {
        let value = decode("a: 70\nb: 70.0\nc: 1e3\nd: true\ne: False\nf: hello\ng: 2024-01-15\n");
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::Integer(70)));
        assert_eq!(map.get("b"), Some(&Value::Float(70.0)));
        assert_eq!(map.get("c"), Some(&Value::Float(1000.0)));
        assert_eq!(map.get("d"), Some(&Value::Bool(true)));
        assert_eq!(map.get("e"), Some(&Value::Bool(false)));
        assert_eq!(map.get("f"), Some(&Value::from("hello")));
        assert_eq!(map.get("g"), Some(&Value::from("2024-01-15")));
    }

    #[test]
    fn test_decode_keeps_non_decimal_integer_spelling() {
        let value = decode("a: 0x10\nb: 0o17\nc: 42\nd: -7\nlist: [0xFF, 3]\nnested:\n  e: 0b101\n");
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::from("0x10")));
        assert_eq!(map.get("b"), Some(&Value::from("0o17")));
        assert_eq!(map.get("c"), Some(&Value::Integer(42)));
        assert_eq!(map.get("d"), Some(&Value::Integer(-7)));
        assert_eq!(map.get("list"), Some(&value!(["0xFF", 3])));
        assert_eq!(map.get("nested"), Some(&value!({ "e": "0b101" })));

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d", "list", "nested"]);

        let text = encode(&value);
        assert!(text.starts_with("a: \"0x10\"\nb: \"0o17\"\nc: 42\n"));
        assert_eq!(decode(&text), value);
    }

    #[test]
    fn test_decode_flow_collections_and_literal_block() {
        let value = decode("tags: [a, b]\nextra: {x: 1}\nbody: |\n  line one\n  line two\n");
        let map = value.as_map().unwrap();
        assert_eq!(map.get("tags"), Some(&value!(["a", "b"])));
        assert_eq!(map.get("extra"), Some(&value!({ "x": 1 })));
        assert_eq!(map.get("body"), Some(&Value::from("line one\nline two\n")));
    }

    #[test]
    fn test_decode_blank_document_is_null() {
        assert_eq!(decode(""), Value::Null);
        assert_eq!(decode("  \n# only a comment\n"), Value::Null);
    }

    #[test]
    fn test_decode_error_reports_line() {
        let err = YamlCodec::default()
            .decode("title: ok\ntags: [a, b\n")
            .unwrap_err();
        assert_eq!(err.format(), Format::Yaml);
        assert!(err.line().is_some());
    }

    #[test]
    fn test_decode_rejects_duplicate_keys() {
        assert!(YamlCodec::default().decode("a: 1\na: 2\n").is_err());
    }

    #[test]
    fn test_encode_nested_block_style() {
        let text = encode(&value!({
            "menu": { "main": [{ "name": "Home", "weight": 1 }, { "name": "About" }] },
            "empty": [],
            "none": {}
        }));
        assert_eq!(
            text,
            "menu:\n  main:\n    - name: Home\n      weight: 1\n    - name: About\nempty: []\nnone: {}\n"
        );
    }

    #[test]
    fn test_encode_wider_indent_keeps_list_maps_aligned() {
        let codec = YamlCodec::new(EncodeOptions::new().with_indent(4));
        let value = value!({ "items": [{ "a": 1, "b": 2 }] });
        let text = codec.encode(&value).unwrap();
        assert_eq!(text, "items:\n    -   a: 1\n        b: 2\n");
        assert_eq!(codec.decode(&text).unwrap(), value);
    }

    #[test]
    fn test_encode_float_keeps_decimal_point() {
        assert_eq!(encode(&value!({ "ratio": 70.0 })), "ratio: 70.0\n");
        assert_eq!(decode("ratio: 70.0\n"), value!({ "ratio": 70.0 }));
    }

    #[test]
    fn test_encode_literal_blocks() {
        let value = value!({ "clip": "one\ntwo\n", "strip": "one\n\ntwo" });
        let text = encode(&value);
        assert_eq!(text, "clip: |\n  one\n  two\nstrip: |-\n  one\n\n  two\n");
        assert_eq!(decode(&text), value);
    }

    #[test]
    fn test_encode_quotes_ambiguous_strings() {
        let value = value!({
            "a": "true",
            "b": "42",
            "c": "3.5",
            "d": "key: value",
            "e": "- item",
            "f": "",
            "g": " padded",
            "h": "# not a comment",
            "i": "yes",
            "j": "null",
            "k": "  indented\nlines"
        });
        let text = encode(&value);
        assert!(text.contains("a: \"true\""));
        assert!(text.contains("b: \"42\""));
        assert!(text.contains("f: \"\""));
        assert!(text.contains("k: \"  indented\\nlines\""));
        assert_eq!(decode(&text), value);
    }

    #[test]
    fn test_encode_leaves_plain_strings_bare() {
        let text = encode(&value!({ "date": "2024-01-15", "title": "Hello, world" }));
        assert_eq!(text, "date: 2024-01-15\ntitle: Hello, world\n");
    }

    #[test]
    fn test_encode_escapes_control_characters() {
        let value = value!({ "bell": "a\u{7}b", "sep": "x\u{2028}y" });
        let text = encode(&value);
        assert!(text.contains("\\x07"));
        assert!(text.contains("\\u2028"));
        assert_eq!(decode(&text), value);
    }

    #[test]
    fn test_encode_nested_lists() {
        let value = value!({ "grid": [[1, 2], [], ["x"]] });
        let text = encode(&value);
        assert_eq!(text, "grid:\n  -\n    - 1\n    - 2\n  - []\n  -\n    - x\n");
        assert_eq!(decode(&text), value);
    }

    #[test]
    fn test_encode_empty_root() {
        assert_eq!(encode(&Value::Map(Map::new())), "{}\n");
    }
}
