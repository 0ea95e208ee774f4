/// TOON (Token-Oriented Object Notation) encoder with `[#N]` length markers.
///
/// Objects are `key: value` lines indented by two spaces per level. Arrays
/// carry their length in the header and take one of three forms: inline for
/// primitives (`tags[#2]: a,b`), tabular for uniform objects of primitives
/// (`rows[#2]{id,name}:` followed by one line per row), and a `- ` list
/// otherwise. Strings are quoted only when they would read back as something
/// else.
use serde_json::{Map, Number, Value};

const INDENT: &str = "  ";
const DELIMITER: char = ',';

/// Encode a JSON value as TOON. No trailing newline.
#[must_use]
pub fn encode(value: &Value) -> String {
    let mut lines = Vec::new();
    match value {
        Value::Object(map) => object_fields(&mut lines, 0, map),
        Value::Array(items) => array(&mut lines, 0, 1, "", "", items),
        primitive => lines.push(scalar(primitive)),
    }
    lines.join("\n")
}

fn object_fields(lines: &mut Vec<String>, depth: usize, map: &Map<String, Value>) {
    for (key, value) in map {
        field(lines, depth, depth + 1, "", key, value);
    }
}

/// One `key: ...` entry. `child` is the depth of any nested lines.
fn field(
    lines: &mut Vec<String>,
    depth: usize,
    child: usize,
    prefix: &str,
    key: &str,
    value: &Value,
) {
    let pad = INDENT.repeat(depth);
    let key = encode_key(key);
    match value {
        Value::Object(map) => {
            lines.push(format!("{pad}{prefix}{key}:"));
            object_fields(lines, child, map);
        }
        Value::Array(items) => array(lines, depth, child, prefix, &key, items),
        primitive => lines.push(format!("{pad}{prefix}{key}: {}", scalar(primitive))),
    }
}

fn array(
    lines: &mut Vec<String>,
    depth: usize,
    child: usize,
    prefix: &str,
    key: &str,
    items: &[Value],
) {
    let pad = INDENT.repeat(depth);
    let header = format!("{pad}{prefix}{key}[#{}]", items.len());

    if items.is_empty() {
        lines.push(format!("{header}:"));
        return;
    }

    if items.iter().all(is_primitive) {
        let row = join_row(items.iter());
        lines.push(format!("{header}: {row}"));
        return;
    }

    if let Some(columns) = tabular_columns(items) {
        let fields: Vec<String> = columns.iter().map(|c| encode_key(c)).collect();
        lines.push(format!("{header}{{{}}}:", fields.join(",")));
        let row_pad = INDENT.repeat(child);
        for item in items.iter().filter_map(Value::as_object) {
            let row = join_row(columns.iter().map(|c| &item[c.as_str()]));
            lines.push(format!("{row_pad}{row}"));
        }
        return;
    }

    lines.push(format!("{header}:"));
    for item in items {
        list_item(lines, child, item);
    }
}

fn list_item(lines: &mut Vec<String>, depth: usize, item: &Value) {
    let pad = INDENT.repeat(depth);
    match item {
        Value::Object(map) if map.is_empty() => lines.push(format!("{pad}-")),
        Value::Object(map) => {
            let mut entries = map.iter();
            if let Some((key, value)) = entries.next() {
                // Nested lines of the first field sit under the sibling fields.
                field(lines, depth, depth + 2, "- ", key, value);
            }
            for (key, value) in entries {
                field(lines, depth + 1, depth + 2, "", key, value);
            }
        }
        Value::Array(items) => array(lines, depth, depth + 1, "- ", "", items),
        primitive => lines.push(format!("{pad}- {}", scalar(primitive))),
    }
}

/// Shared key order when every item is an object of primitives with the same keys.
fn tabular_columns(items: &[Value]) -> Option<Vec<String>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let columns: Vec<String> = first.keys().cloned().collect();
    let uniform = items.iter().all(|item| {
        item.as_object().is_some_and(|obj| {
            obj.len() == columns.len()
                && columns
                    .iter()
                    .all(|c| obj.get(c).is_some_and(is_primitive))
        })
    });
    uniform.then_some(columns)
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn join_row<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(scalar)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number(n),
        Value::String(s) => encode_string(s),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Plain decimal, never exponent notation; `-0` becomes `0`.
fn number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_owned(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn encode_string(s: &str) -> String {
    if needs_quotes(s) {
        quote(s)
    } else {
        s.to_owned()
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.trim() != s
        || matches!(s, "true" | "false" | "null")
        || s.starts_with('-')
        || s.parse::<f64>().is_ok()
        || s.chars().any(|c| {
            c == DELIMITER
                || matches!(c, ':' | '"' | '\\' | '[' | ']' | '{' | '}')
                || c.is_control()
        })
}

fn encode_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if bare { key.to_owned() } else { quote(key) }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
