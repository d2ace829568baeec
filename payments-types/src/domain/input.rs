//! Untyped inbound payload.
//!
//! The validator works on this instead of `serde_json::Value` because the
//! amount rules must see NaN and infinities, which JSON cannot carry.
//! Object fields keep the order they were received in.

/// A dynamically typed input value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<RawValue>),
    Object(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Builds an object from `(key, value)` pairs, preserving their order.
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        RawValue::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Parses a request body.
    ///
    /// Returns `None` when the body is empty or is not valid JSON.
    pub fn from_json_slice(body: &[u8]) -> Option<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .map(RawValue::from)
    }

    /// Looks up a field of an object. Always `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            RawValue::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Field names of an object in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let fields: &[(String, RawValue)] = match self {
            RawValue::Object(fields) => fields,
            _ => &[],
        };
        fields.iter().map(|(k, _)| k.as_str())
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            // Parsed from the literal text so out-of-range values become infinities.
            Value::Number(n) => n
                .as_str()
                .parse::<f64>()
                .map_or(RawValue::Null, RawValue::Number),
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => {
                RawValue::Object(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}
