use rstest::{fixture, rstest};
use sitedoc::{
    parse_config, serialize_config, value, ConfigDocument, ConfigEngine, DecodeError, Format,
    MenuItem, ParseError, Value,
};

const TOML_CONFIG: &str = r#"
baseURL = "https://example.org/"
title = "My Site"
languageCode = "en-us"
theme = ["base", "extras"]
summaryLength = 70
enableRobotsTXT = true

[taxonomies]
tag = "tags"
series = "series"

[[menus.main]]
name = "Home"
pageRef = "/"
weight = 1

[[menus.main]]
name = "Posts"
url = "/posts/"
weight = 2

[params]
ratio = 70.0
description = "A site"

[markup.goldmark.renderer]
unsafe = true
"#;

const YAML_CONFIG: &str = r#"
baseURL: https://example.org/
title: My Site
languageCode: en-us
theme:
  - base
  - extras
summaryLength: 70
enableRobotsTXT: true
taxonomies:
  tag: tags
  series: series
menus:
  main:
    - name: Home
      pageRef: /
      weight: 1
    - name: Posts
      url: /posts/
      weight: 2
params:
  ratio: 70.0
  description: A site
markup:
  goldmark:
    renderer:
      unsafe: true
"#;

const JSON_CONFIG: &str = r#"{
  "baseURL": "https://example.org/",
  "title": "My Site",
  "languageCode": "en-us",
  "theme": ["base", "extras"],
  "summaryLength": 70,
  "enableRobotsTXT": true,
  "taxonomies": { "tag": "tags", "series": "series" },
  "menus": {
    "main": [
      { "name": "Home", "pageRef": "/", "weight": 1 },
      { "name": "Posts", "url": "/posts/", "weight": 2 }
    ]
  },
  "params": { "ratio": 70.0, "description": "A site" },
  "markup": { "goldmark": { "renderer": { "unsafe": true } } }
}"#;

#[fixture]
fn engine() -> ConfigEngine {
    ConfigEngine::new()
}

fn source(format: Format) -> &'static str {
    match format {
        Format::Yaml => YAML_CONFIG,
        Format::Toml => TOML_CONFIG,
        Format::Json => JSON_CONFIG,
    }
}

#[rstest]
fn test_parse_site_config(
    engine: ConfigEngine,
    #[values(Format::Yaml, Format::Toml, Format::Json)] format: Format,
) {
    let doc = engine.parse(source(format), format).unwrap();

    assert_eq!(doc.format, format);
    assert_eq!(doc.base_url.as_deref(), Some("https://example.org/"));
    assert_eq!(doc.title.as_deref(), Some("My Site"));
    assert_eq!(doc.language_code.as_deref(), Some("en-us"));
    assert_eq!(doc.theme.as_deref(), Some("base, extras"));
    assert!(doc.is_theme_list);
    assert_eq!(doc.summary_length, Some(70));
    assert_eq!(doc.enable_robots_txt, Some(true));
    assert_eq!(doc.build_drafts, None);
    assert_eq!(doc.taxonomies.get("series").map(String::as_str), Some("series"));

    let main = &doc.menus["main"];
    assert_eq!(main.len(), 2);
    assert_eq!(main[0].name.as_deref(), Some("Home"));
    assert_eq!(main[0].page_ref.as_deref(), Some("/"));
    assert_eq!(main[1].url.as_deref(), Some("/posts/"));
    assert_eq!(main[1].weight, Some(2));

    assert_eq!(doc.params.get("ratio"), Some(&Value::Float(70.0)));
    assert_eq!(
        doc.custom_fields.get("markup"),
        Some(&value!({ "goldmark": { "renderer": { "unsafe": true } } }))
    );
}

#[rstest]
fn test_round_trip(
    engine: ConfigEngine,
    #[values(Format::Yaml, Format::Toml, Format::Json)] format: Format,
) {
    let doc = engine.parse(source(format), format).unwrap();
    let written = engine.serialize(&doc).unwrap();
    let again = engine.parse(&written, format).unwrap();
    assert_eq!(again, doc);
}

#[rstest]
fn test_convert_between_formats(
    #[values(Format::Yaml, Format::Toml, Format::Json)] from: Format,
    #[values(Format::Yaml, Format::Toml, Format::Json)] to: Format,
) {
    let mut doc = parse_config(source(from), from).unwrap();
    doc.format = to;
    let written = serialize_config(&doc).unwrap();
    let again = parse_config(&written, to).unwrap();
    assert_eq!(again, doc);
}

#[rstest]
#[case::yaml(Format::Yaml)]
#[case::toml(Format::Toml)]
#[case::json(Format::Json)]
fn test_theme_list_round_trip(#[case] format: Format) {
    let mut doc = ConfigDocument::new(format);
    doc.set_themes(["a", "b"]);
    let again = parse_config(&serialize_config(&doc).unwrap(), format).unwrap();
    assert_eq!(again.theme.as_deref(), Some("a, b"));
    assert!(again.is_theme_list);
}

#[test]
fn test_toml_menu_order_is_kept() {
    let doc = parse_config(TOML_CONFIG, Format::Toml).unwrap();
    let written = serialize_config(&doc).unwrap();
    assert_eq!(written.matches("[[menus.main]]").count(), 2);

    let home = written.find("name = \"Home\"").unwrap();
    let posts = written.find("name = \"Posts\"").unwrap();
    assert!(home < posts);

    let first = written.find("[[menus.main]]").unwrap();
    let entry = &written[first..];
    let name = entry.find("name =").unwrap();
    let page_ref = entry.find("pageRef =").unwrap();
    let weight = entry.find("weight =").unwrap();
    assert!(name < page_ref && page_ref < weight);
}

#[test]
fn test_serialized_key_order() {
    let doc = parse_config(YAML_CONFIG, Format::Yaml).unwrap();
    let written = serialize_config(&doc).unwrap();
    let top_level: Vec<&str> = written
        .lines()
        .filter(|line| !line.starts_with(' ') && !line.is_empty())
        .filter_map(|line| line.split(':').next())
        .collect();
    assert_eq!(
        top_level,
        vec![
            "baseURL",
            "title",
            "languageCode",
            "theme",
            "enableRobotsTXT",
            "summaryLength",
            "taxonomies",
            "menus",
            "params",
            "markup"
        ]
    );
}

#[test]
fn test_new_file() {
    let mut doc = parse_config("", Format::Toml).unwrap();
    assert_eq!(doc, ConfigDocument::new(Format::Toml));

    doc.title = Some("Fresh".to_string());
    doc.menus
        .entry("main".to_string())
        .or_default()
        .push(MenuItem::new("Home"));
    let written = serialize_config(&doc).unwrap();
    assert!(written.starts_with("title = \"Fresh\"\n"));
    assert!(written.contains("[[menus.main]]\nname = \"Home\"\n"));
    assert_eq!(parse_config(&written, Format::Toml).unwrap(), doc);
}

#[test]
fn test_decode_error_is_surfaced() {
    let err = parse_config("title: [unclosed\n", Format::Yaml).unwrap_err();
    match err {
        ParseError::Decode(DecodeError::Syntax { format, line, .. }) => {
            assert_eq!(format, Format::Yaml);
            assert!(line >= 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_scalar_root_is_rejected() {
    let err = parse_config("\"just a string\"", Format::Json).unwrap_err();
    assert_eq!(
        err,
        ParseError::NotAMap {
            format: Format::Json,
            found: "string"
        }
    );
}

#[test]
fn test_json_rejects_non_finite_param() {
    let mut doc = ConfigDocument::new(Format::Json);
    doc.params.insert("bad".to_string(), Value::Float(f64::INFINITY));
    let err = serialize_config(&doc).unwrap_err();
    assert!(err.to_string().contains("params.bad"));
}
