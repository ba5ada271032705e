//! Structured-mode normalization.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*").expect("valid fence regex"));

/// Why a structured response produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The text was blank or had no JSON brackets.
    NoPayload,
    /// A payload was found but did not parse into the expected shape.
    Malformed(String),
    /// The payload parsed but held no items.
    NoItems,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPayload => write!(f, "no JSON payload found"),
            Self::Malformed(msg) => write!(f, "malformed payload: {msg}"),
            Self::NoItems => write!(f, "payload contained no items"),
        }
    }
}

/// Outcome of structured normalization.
///
/// `Empty` means "nothing generated": callers let the user retry rather
/// than treating it as a hard error.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// A usable result.
    Parsed(T),
    /// Nothing usable, with the reason.
    Empty(EmptyReason),
}

impl<T> Normalized<T> {
    /// Returns true for `Empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Returns the parsed value, if any.
    #[must_use]
    pub fn parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Empty(_) => None,
        }
    }

    /// Returns the empty reason, if any.
    #[must_use]
    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            Self::Parsed(_) => None,
            Self::Empty(reason) => Some(reason),
        }
    }

    /// Maps the parsed value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Normalized<U> {
        match self {
            Self::Parsed(value) => Normalized::Parsed(f(value)),
            Self::Empty(reason) => Normalized::Empty(reason),
        }
    }
}

impl<T> Normalized<Vec<T>> {
    /// Flattens to a list, empty when nothing was generated.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.parsed().unwrap_or_default()
    }
}

/// Removes every fenced-code marker (with any language tag).
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").into_owned()
}

/// Slices from the earliest `[`/`{` to the latest `]`/`}`.
#[must_use]
pub fn extract_payload(text: &str) -> Option<&str> {
    let start = text.find(&['[', '{'][..])?;
    let end = text.rfind(&[']', '}'][..])?;
    (end > start).then(|| &text[start..=end])
}

fn parse_value(raw: &str) -> Result<Value, EmptyReason> {
    let cleaned = strip_code_fences(raw);
    let payload = extract_payload(&cleaned).ok_or(EmptyReason::NoPayload)?;
    serde_json::from_str(payload).map_err(|e| EmptyReason::Malformed(e.to_string()))
}

/// Parses a structured response into `T`.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Normalized<T> {
    let result = parse_value(raw).and_then(|value| {
        serde_json::from_value(value).map_err(|e| EmptyReason::Malformed(e.to_string()))
    });

    match result {
        Ok(parsed) => Normalized::Parsed(parsed),
        Err(reason) => {
            warn!(reason = %reason, raw_len = raw.len(), "Structured response degraded to empty");
            Normalized::Empty(reason)
        }
    }
}

/// Gives every object without a usable `id` the id `"{prefix}-{index}"`.
///
/// Numeric ids are converted to strings so they deserialize as text.
pub fn assign_fallback_ids(items: &mut [Value], prefix: &str) {
    for (index, item) in items.iter_mut().enumerate() {
        let Some(object) = item.as_object_mut() else {
            continue;
        };
        let replacement = match object.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => None,
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => Some(format!("{prefix}-{index}")),
        };
        if let Some(id) = replacement {
            object.insert("id".to_string(), Value::String(id));
        }
    }
}

/// Parses a structured list response.
///
/// A single object is accepted as a one-element list. When `id_prefix` is
/// set, items missing an `id` get a positional fallback before typed
/// deserialization.
pub fn parse_structured_list<T: DeserializeOwned>(
    raw: &str,
    id_prefix: Option<&str>,
) -> Normalized<Vec<T>> {
    let result = parse_value(raw).and_then(|value| {
        let mut items = match value {
            Value::Array(items) => items,
            object @ Value::Object(_) => vec![object],
            other => {
                return Err(EmptyReason::Malformed(format!(
                    "expected a JSON array, found {}",
                    json_kind(&other)
                )))
            }
        };
        if items.is_empty() {
            return Err(EmptyReason::NoItems);
        }
        if let Some(prefix) = id_prefix {
            assign_fallback_ids(&mut items, prefix);
        }
        serde_json::from_value::<Vec<T>>(Value::Array(items))
            .map_err(|e| EmptyReason::Malformed(e.to_string()))
    });

    match result {
        Ok(items) => Normalized::Parsed(items),
        Err(reason) => {
            warn!(reason = %reason, raw_len = raw.len(), "Structured list degraded to empty");
            Normalized::Empty(reason)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
