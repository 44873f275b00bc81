//! Optional-field accessors over loosely typed content-graph documents.
//!
//! Every accessor returns `None` instead of failing when the key is absent,
//! the receiver is not an object, or the value has the wrong type. Callers
//! pick the default.

use serde_json::Value;

/// A key that was missing (or not an object) while walking a document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMiss {
    /// The key that could not be resolved.
    pub key: String,
    /// Dotted path of the keys resolved before the miss.
    pub at: String,
}

impl std::fmt::Display for PathMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.at.is_empty() {
            write!(f, "missing key '{}' at document root", self.key)
        } else {
            write!(f, "missing key '{}' under '{}'", self.key, self.at)
        }
    }
}

pub trait DocumentExt {
    /// Look up a key on an object.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Walk nested object keys, reporting the first one that is missing.
    fn path(&self, keys: &[&str]) -> Result<&Value, PathMiss>;

    fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// String field that is present and not blank.
    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.str_field(key).filter(|s| !s.trim().is_empty())
    }

    fn array_field(&self, key: &str) -> Option<&Vec<Value>> {
        self.field(key).and_then(Value::as_array)
    }

    /// Non-negative integer field. Fractional values are rounded.
    fn count_field(&self, key: &str) -> Option<u64> {
        let value = self.field(key)?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        })
    }
}

impl DocumentExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn path(&self, keys: &[&str]) -> Result<&Value, PathMiss> {
        let mut current = self;
        for (depth, key) in keys.iter().enumerate() {
            current = current
                .as_object()
                .and_then(|map| map.get(*key))
                .filter(|value| !value.is_null())
                .ok_or_else(|| PathMiss {
                    key: (*key).to_string(),
                    at: keys[..depth].join("."),
                })?;
        }
        Ok(current)
    }
}
