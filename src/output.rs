//! Purpose: Render CLI JSON payloads, pretty or compact, with optional ANSI color.
//! Exports: `render_json`.
//! Role: Pure formatter shared by stdout and stderr emission paths.
//! Invariants: Without color, pretty output equals `serde_json::to_string_pretty`.
//! Invariants: ANSI escapes appear only when color is enabled.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_LITERAL: &str = "35";

const ENCODE_FAILED: &str = "{\"error\":\"json encode failed\"}";

pub(crate) fn render_json(value: &Value, pretty: bool, use_color: bool) -> String {
    if use_color {
        let mut painter = Painter::default();
        painter.value(value, 0);
        return painter.out;
    }
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.unwrap_or_else(|_| ENCODE_FAILED.to_string())
}

#[derive(Default)]
struct Painter {
    out: String,
}

impl Painter {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.paint("null", COLOR_LITERAL),
            Value::Bool(flag) => self.paint(if *flag { "true" } else { "false" }, COLOR_LITERAL),
            Value::Number(num) => self.paint(&num.to_string(), COLOR_NUMBER),
            Value::String(text) => self.paint(&quote(text), COLOR_STRING),
            Value::Array(items) => self.array(items, depth),
            Value::Object(map) => self.object(map, depth),
        }
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push_str("[\n");
        for (idx, item) in items.iter().enumerate() {
            self.indent(depth + 1);
            self.value(item, depth + 1);
            self.separator(idx + 1 < items.len());
        }
        self.indent(depth);
        self.out.push(']');
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        for (idx, (key, value)) in map.iter().enumerate() {
            self.indent(depth + 1);
            self.paint(&quote(key), COLOR_KEY);
            self.out.push_str(": ");
            self.value(value, depth + 1);
            self.separator(idx + 1 < map.len());
        }
        self.indent(depth);
        self.out.push('}');
    }

    fn separator(&mut self, more: bool) {
        if more {
            self.out.push(',');
        }
        self.out.push('\n');
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn paint(&mut self, text: &str, color: &str) {
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use serde_json::json;

    #[test]
    fn plain_pretty_matches_serde() {
        let value = json!({"op": "square", "input": [1, -2], "result": [1, 4]});
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(render_json(&value, true, false), pretty);
    }

    #[test]
    fn compact_is_single_line() {
        let value = json!({"op": "cube", "input": 2, "result": 8});
        let rendered = render_json(&value, false, false);
        assert!(!rendered.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(parsed, value);
    }

    #[test]
    fn color_wraps_tokens_in_ansi() {
        let value = json!({"k": "v", "n": 1, "b": true, "z": null});
        let colored = render_json(&value, false, true);
        assert!(colored.contains("\u{1b}[36m\"k\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"v\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33m1\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mtrue\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mnull\u{1b}[0m"));
    }
}
