//! JSON codec.
//!
//! Decoding goes through `serde_json` straight into [`Value`], so a number's
//! spelling decides its variant and duplicate keys are rejected. An integer
//! token too wide for 64 bits is an error rather than a float. Encoding is
//! pretty-printed with the configured indent and always ends in a newline.

use super::{child_path, index_path, line_of, Format, FormatCodec};
use crate::{DecodeError, EncodeError, EncodeOptions, Value};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Codec for JSON documents.
#[derive(Clone, Debug, Default)]
pub struct JsonCodec {
    options: EncodeOptions,
}

impl JsonCodec {
    #[must_use]
    pub fn new(options: EncodeOptions) -> Self {
        JsonCodec { options }
    }
}

impl FormatCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        let value = serde_json::from_str::<Value>(text).map_err(|err| {
            let line = (err.line() > 0).then_some(err.line());
            DecodeError::new(Format::Json, line, strip_position(&err))
        })?;
        check_integer_width(text)?;
        Ok(value)
    }

    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        check_finite(value, "")?;

        let indent = vec![b' '; self.options.indent];
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
        value.serialize(&mut serializer).map_err(backend)?;

        let mut text = String::from_utf8(out).map_err(|err| EncodeError::Backend {
            format: Format::Json,
            reason: err.to_string(),
        })?;
        text.push('\n');
        Ok(text)
    }
}

fn backend(err: serde_json::Error) -> EncodeError {
    EncodeError::Backend {
        format: Format::Json,
        reason: err.to_string(),
    }
}

/// `serde_json` appends " at line L column C" to its messages; the line is
/// reported separately.
fn strip_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(at) => message[..at].to_string(),
        None => message,
    }
}

/// `serde_json` quietly reads integer tokens beyond `i64` as floats. Runs on
/// text that already parsed, so every digit outside a string is a number.
fn check_integer_width(text: &str) -> Result<(), DecodeError> {
    let bytes = text.as_bytes();
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => {
                in_string = true;
                i += 1;
            }
            b'-' | b'0'..=b'9' => {
                let start = i;
                while i < bytes.len()
                    && matches!(bytes[i], b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9')
                {
                    i += 1;
                }
                let token = &text[start..i];
                if !token.contains(['.', 'e', 'E']) && token.parse::<i64>().is_err() {
                    return Err(DecodeError::new(
                        Format::Json,
                        Some(line_of(text, start)),
                        format!("integer `{token}` does not fit in 64 bits"),
                    ));
                }
            }
            _ => i += 1,
        }
    }
    Ok(())
}

fn check_finite(value: &Value, path: &str) -> Result<(), EncodeError> {
    match value {
        Value::Float(f) if !f.is_finite() => Err(EncodeError::non_finite(Format::Json, path)),
        Value::List(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_finite(item, &index_path(path, i))),
        Value::Map(map) => map
            .iter()
            .try_for_each(|(key, item)| check_finite(item, &child_path(path, key))),
        _ => Ok(()),
    }
}
