//! Property-based tests for the codec guarantees.
//!
//! Generated `Value` trees must survive encode → decode unchanged in every
//! format, and typed documents must survive serialize → parse.

use proptest::prelude::*;
use sitedoc::{
    codec_for, parse_config, parse_frontmatter, serialize_config, serialize_frontmatter,
    ConfigDocument, ContentDocument, EncodeOptions, Format, FrontmatterDocument, Map,
    SerializeError, Value,
};

fn roundtrip(format: Format, value: &Value) -> bool {
    let codec = codec_for(format, &EncodeOptions::default());
    match codec.encode(value) {
        Ok(encoded) => match codec.decode(&encoded) {
            Ok(decoded) => {
                if decoded != *value {
                    eprintln!("Decoded {decoded:?}\nfrom {encoded}");
                }
                decoded == *value
            }
            Err(e) => {
                eprintln!("Decode failed: {e}");
                eprintln!("Encoded was: {encoded}");
                false
            }
        },
        Err(e) => {
            eprintln!("Encode failed: {e}");
            false
        }
    }
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z0-9 _:#\\-+\"'.,\n]{0,24}",
        1 => ("[a-z ]{0,8}", prop_oneof![Just("---"), Just("+++")], "[a-z ]{0,8}")
            .prop_map(|(before, fence, after)| format!("{before}\n{fence}\n{after}")),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn scalar(with_null: bool) -> BoxedStrategy<Value> {
    let scalars = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        text().prop_map(Value::String),
    ];
    if with_null {
        prop_oneof![Just(Value::Null), scalars].boxed()
    } else {
        scalars.boxed()
    }
}

fn map_of(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Map> {
    prop::collection::vec((key(), inner), 0..5).prop_map(|entries| entries.into_iter().collect())
}

/// Any tree YAML and JSON can hold.
fn any_tree() -> impl Strategy<Value = Value> {
    scalar(true).prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::List),
            map_of(inner).prop_map(Value::Map),
        ]
    })
}

/// Trees TOML can hold: no nulls, and no arrays mixing tables with other
/// values.
fn toml_tree() -> impl Strategy<Value = Value> {
    scalar(false).prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(|items| {
                if items.iter().any(Value::is_map) {
                    Value::List(items.into_iter().filter(Value::is_map).collect())
                } else {
                    Value::List(items)
                }
            }),
            map_of(inner).prop_map(Value::Map),
        ]
    })
}

fn frontmatter_doc(format: Format) -> impl Strategy<Value = FrontmatterDocument> {
    (
        proptest::option::of(text()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(prop::collection::vec(text(), 0..4)),
        map_of(scalar(false)),
    )
        .prop_map(move |(title, weight, draft, tags, extra)| {
            let mut doc = FrontmatterDocument::new(format);
            doc.title = title;
            doc.weight = weight;
            doc.draft = draft;
            doc.tags = tags;
            doc.params = extra;
            doc
        })
}

proptest! {
    #[test]
    fn prop_yaml_roundtrip(map in map_of(any_tree())) {
        prop_assert!(roundtrip(Format::Yaml, &Value::Map(map)));
    }

    #[test]
    fn prop_json_roundtrip(map in map_of(any_tree())) {
        prop_assert!(roundtrip(Format::Json, &Value::Map(map)));
    }

    #[test]
    fn prop_toml_roundtrip(map in map_of(toml_tree())) {
        prop_assert!(roundtrip(Format::Toml, &Value::Map(map)));
    }

    #[test]
    fn prop_yaml_scalar_strings(s in text()) {
        let mut map = Map::new();
        map.insert("s".to_string(), Value::String(s));
        prop_assert!(roundtrip(Format::Yaml, &Value::Map(map)));
    }

    #[test]
    fn prop_numeric_variant_is_kept(i in any::<i64>(), f in -1.0e9..1.0e9f64) {
        for format in [Format::Yaml, Format::Toml, Format::Json] {
            let mut map = Map::new();
            map.insert("i".to_string(), Value::Integer(i));
            map.insert("f".to_string(), Value::Float(f.trunc()));
            let codec = codec_for(format, &EncodeOptions::default());
            let decoded = codec.decode(&codec.encode(&Value::Map(map)).unwrap()).unwrap();
            let decoded = decoded.as_map().unwrap();
            prop_assert!(decoded.get("i").map_or(false, Value::is_integer));
            prop_assert!(decoded.get("f").map_or(false, Value::is_float));
        }
    }

    #[test]
    fn prop_frontmatter_roundtrip(
        fm in prop_oneof![Just(Format::Yaml), Just(Format::Toml), Just(Format::Json)]
            .prop_flat_map(frontmatter_doc),
        body in "[a-zA-Z #\n]{0,40}",
    ) {
        let doc = ContentDocument::new(Some(fm), body);
        match serialize_frontmatter(&doc) {
            Ok(written) => {
                prop_assert_eq!(parse_frontmatter(&written), doc);
            }
            // Only a TOML multi-line string can leave a bare fence line.
            Err(SerializeError::FenceInBlock { format, .. }) => {
                prop_assert_eq!(format, Format::Toml);
            }
            Err(err) => {
                prop_assert!(false, "unexpected error: {}", err);
            }
        }
    }

    #[test]
    fn prop_config_custom_fields_roundtrip(
        custom in map_of(toml_tree()),
        format in prop_oneof![Just(Format::Yaml), Just(Format::Toml), Just(Format::Json)],
    ) {
        let mut doc = ConfigDocument::new(format);
        // Reserved names would be promoted to typed fields on the way back.
        doc.custom_fields = custom
            .into_iter()
            .map(|(k, v)| (format!("x_{k}"), v))
            .collect();
        let written = serialize_config(&doc).unwrap();
        prop_assert_eq!(parse_config(&written, format).unwrap(), doc);
    }
}
