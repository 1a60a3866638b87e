//! Provider error text scrubbing
//!
//! Error strings coming back from providers can embed credentials or very
//! large response bodies. Everything stored in an attempt record passes
//! through [`scrub_error_text`] first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const MAX_ERROR_CHARS: usize = 512;
const REDACTED: &str = "[redacted]";

static BEARER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}").expect("valid bearer regex")
});

static SECRET_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(api[_-]?key|access[_-]?token|token|secret|password|authorization)\b\s*[:=]\s*["']?[^"',\s}]+"#,
    )
    .expect("valid secret pair regex")
});

/// Scrub an error string before it is stored or logged
///
/// Redacts bearer tokens and key/value-style secrets (JSON-aware where the
/// text parses as JSON) and caps the result length.
pub fn scrub_error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error>".to_string();
    }

    if let Ok(mut json) = serde_json::from_str::<Value>(trimmed) {
        scrub_json(&mut json);
        let serialized =
            serde_json::to_string(&json).unwrap_or_else(|_| "<unserializable error>".to_string());
        return cap_len(serialized);
    }

    cap_len(scrub_inline(trimmed))
}

fn scrub_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if sensitive_key(key) {
                    *val = Value::String(REDACTED.to_string());
                } else {
                    scrub_json(val);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                scrub_json(item);
            }
        }
        Value::String(s) => {
            *s = scrub_inline(s);
        }
        _ => {}
    }
}

fn sensitive_key(key: &str) -> bool {
    let normalized = key.to_ascii_lowercase().replace('-', "_");
    normalized.contains("api_key")
        || normalized.contains("token")
        || normalized.contains("secret")
        || normalized.contains("password")
        || normalized.contains("authorization")
        || normalized.contains("cookie")
}

fn scrub_inline(input: &str) -> String {
    let without_bearer = BEARER_RE.replace_all(input, "Bearer [redacted]");
    SECRET_PAIR_RE
        .replace_all(&without_bearer, "$1=[redacted]")
        .into_owned()
}

fn cap_len(input: String) -> String {
    let char_count = input.chars().count();
    if char_count <= MAX_ERROR_CHARS {
        return input;
    }

    let capped: String = input.chars().take(MAX_ERROR_CHARS).collect();
    format!("{}... [{} chars dropped]", capped, char_count - MAX_ERROR_CHARS)
}
