#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::Write;

use jsonview::Value;

pub const MANIFEST: &str = r#"
{
    "name": "jsonview",
    "version": 1,
    "ratio": 0.5,
    "stable": false,
    "license": null,
    "tags": ["lazy", "json"],
    "deps": {
        "serde_json": {
            "optional": false
        }
    }
}
"#;

/// Render every node reachable from `value`, one line per node, in
/// document order. Object members extend the path with `/key`, array
/// elements with `[ordinal]`.
pub fn render(value: &Value, path: &str, out: &mut String) {
    match value {
        Value::Object(o) => {
            writeln!(out, "{path}: object({})", o.len().unwrap()).unwrap();
            for entry in o.iter().unwrap() {
                let (key, child) = entry.unwrap();
                render(&child, &format!("{path}/{key}"), out);
            }
        }
        Value::Array(a) => {
            writeln!(out, "{path}: array({})", a.len().unwrap()).unwrap();
            for (i, child) in a.iter().unwrap().enumerate() {
                render(&child.unwrap(), &format!("{path}[{}]", i + 1), out);
            }
        }
        Value::Null => writeln!(out, "{path}: null").unwrap(),
        Value::Bool(b) => writeln!(out, "{path}: boolean {b}").unwrap(),
        Value::Int(i) => writeln!(out, "{path}: integer {i}").unwrap(),
        Value::Float(f) => writeln!(out, "{path}: float {f}").unwrap(),
        Value::String(s) => writeln!(out, "{path}: string {s:?}").unwrap(),
    }
}

pub fn render_root(value: &Value) -> String {
    let mut out = String::new();
    render(value, "$", &mut out);
    out
}
