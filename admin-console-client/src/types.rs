use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Record ============

/// A single resource record: an untyped JSON object.
///
/// The shape varies per resource. Callers interpret fields through a schema;
/// the client only moves objects over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Whether the field is present (even if null).
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Field names in storage order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String form of a scalar field.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Absent, null, array and object values yield `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// String form of a key field. Only string and number keys qualify.
    pub fn key_string(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record into its JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============ Update Method ============

/// HTTP verb used for keyed updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateMethod {
    /// Full replacement.
    #[default]
    Put,
    /// Partial update.
    Patch,
}

impl UpdateMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_formats_scalars() {
        let record: Record = serde_json::from_value(json!({
            "code": "A1",
            "target": 42,
            "ratio": 0.5,
            "active": true,
            "note": null,
            "tags": ["x"],
        }))
        .unwrap();

        assert_eq!(record.text("code").as_deref(), Some("A1"));
        assert_eq!(record.text("target").as_deref(), Some("42"));
        assert_eq!(record.text("ratio").as_deref(), Some("0.5"));
        assert_eq!(record.text("active").as_deref(), Some("true"));
        assert_eq!(record.text("note"), None);
        assert_eq!(record.text("tags"), None);
        assert_eq!(record.text("missing"), None);
    }

    #[test]
    fn key_string_accepts_strings_and_numbers_only() {
        let record: Record = [("id", json!(7)), ("slug", json!("ops")), ("empty", json!(""))]
            .into_iter()
            .collect();

        assert_eq!(record.key_string("id").as_deref(), Some("7"));
        assert_eq!(record.key_string("slug").as_deref(), Some("ops"));
        assert_eq!(record.key_string("empty"), None);
        assert_eq!(record.key_string("missing"), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut record = Record::new();
        record.set("name", "Admin");
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"name": "Admin"}));
    }

    #[test]
    fn update_method_default_is_put() {
        assert_eq!(UpdateMethod::default(), UpdateMethod::Put);
        assert_eq!(UpdateMethod::Patch.as_reqwest(), reqwest::Method::PATCH);
    }
}
