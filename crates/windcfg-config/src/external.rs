//! Rendering documents in the build tool's formats.

use serde_json::{Map, Value};

use crate::loader::ConfigError;
use crate::source::SourceFormat;
use crate::types::{ConfigurationDocument, PluginRef};

/// Type annotation placed above generated JavaScript configs.
pub const JS_TYPE_HEADER: &str = "/** @type {import('tailwindcss').Config} */";

const INDENT: &str = "  ";

/// Render a document in the given syntax.
pub fn render(doc: &ConfigurationDocument, format: SourceFormat) -> Result<String, ConfigError> {
    match format {
        SourceFormat::Json => serde_json::to_string_pretty(&doc.to_external_format())
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ConfigError::SerializeError {
                message: e.to_string(),
            }),
        SourceFormat::Yaml => {
            serde_yaml::to_string(&doc.to_external_format()).map_err(|e| {
                ConfigError::SerializeError {
                    message: e.to_string(),
                }
            })
        }
        SourceFormat::JavaScript => Ok(render_js(doc)),
    }
}

/// Render as a CommonJS module, the way the build tool scaffolds it.
pub fn render_js(doc: &ConfigurationDocument) -> String {
    let mut out = String::new();
    out.push_str(JS_TYPE_HEADER);
    out.push_str("\nmodule.exports = {\n");

    write_entry(&mut out, "darkMode", 1, |out| {
        write_js_string(out, doc.dark_mode().as_str())
    });

    write_entry(&mut out, "content", 1, |out| {
        let patterns: Vec<Value> = doc
            .content()
            .iter()
            .map(|p| Value::String(p.as_str().to_string()))
            .collect();
        write_js_array(out, &patterns, 1);
    });

    let mut theme = doc.theme().overrides.clone();
    if let Some(extend) = &doc.theme().extend {
        theme.insert("extend".to_string(), Value::Object(extend.clone()));
    }
    write_entry(&mut out, "theme", 1, |out| write_js_object(out, &theme, 1));

    write_entry(&mut out, "plugins", 1, |out| {
        if doc.plugins().is_empty() {
            out.push_str("[]");
            return;
        }
        out.push_str("[\n");
        for plugin in doc.plugins() {
            push_indent(out, 2);
            match plugin {
                PluginRef::Module(name) => {
                    out.push_str("require(");
                    write_js_string(out, name);
                    out.push(')');
                }
                PluginRef::Inline(value) => write_js_value(out, value, 2),
            }
            out.push_str(",\n");
        }
        push_indent(out, 1);
        out.push(']');
    });

    for (key, value) in doc.extra() {
        write_entry(&mut out, key, 1, |out| write_js_value(out, value, 1));
    }

    out.push_str("}\n");
    out
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_entry(out: &mut String, key: &str, depth: usize, value: impl FnOnce(&mut String)) {
    push_indent(out, depth);
    write_js_key(out, key);
    out.push_str(": ");
    value(out);
    out.push_str(",\n");
}

fn write_js_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_js_string(out, s),
        Value::Array(items) => write_js_array(out, items, depth),
        Value::Object(map) => write_js_object(out, map, depth),
    }
}

fn write_js_array(out: &mut String, items: &[Value], depth: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    for item in items {
        push_indent(out, depth + 1);
        write_js_value(out, item, depth + 1);
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push(']');
}

fn write_js_object(out: &mut String, map: &Map<String, Value>, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (key, value) in map {
        write_entry(out, key, depth + 1, |out| write_js_value(out, value, depth + 1));
    }
    push_indent(out, depth);
    out.push('}');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_js_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_js_string(out, key);
    }
}

fn write_js_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
}
