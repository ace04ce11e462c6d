//! 资源结构定义

use serde::{Deserialize, Serialize};

/// Value type of a form/display field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text.
    #[default]
    Text,
    /// Integer or decimal number.
    Number,
    /// Calendar date as `YYYY-MM-DD`.
    Date,
}

/// One field of a resource as the controller sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// JSON member name.
    pub name: String,
    /// Human label used in validation messages.
    pub label: String,
    pub kind: FieldKind,
    /// Must be non-empty after trim.
    pub required: bool,
    /// Participates in search-term filtering.
    pub searchable: bool,
    /// Can be used as the sort key.
    pub sortable: bool,
    /// Maximum length in characters (after trim).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl FieldSpec {
    /// Optional text field, neither searchable nor sortable.
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text,
            required: false,
            searchable: false,
            sortable: false,
            max_length: None,
        }
    }

    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(name, label)
        }
    }

    #[must_use]
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Date,
            ..Self::text(name, label)
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Schema of one resource: where it lives and how its fields behave.
///
/// A single generic controller is driven by this description instead of
/// per-resource controller code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchema {
    /// Resource path segment (`roles`, `success-indicators`).
    pub resource: String,
    /// Singular display name used in notices ("Role").
    pub display_name: String,
    /// Primary key member. Server-assigned, never part of the form.
    pub key_field: String,
    /// Form/display fields in display order.
    pub fields: Vec<FieldSpec>,
}

impl ResourceSchema {
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        display_name: impl Into<String>,
        key_field: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            display_name: display_name.into(),
            key_field: key_field.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Look up a field by name.
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.searchable)
    }

    pub fn sortable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.sortable)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Whether `name` is a sortable field.
    pub fn is_sortable(&self, name: &str) -> bool {
        self.sortable_fields().any(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ResourceSchema {
        ResourceSchema::new("things", "Thing", "id")
            .field(FieldSpec::text("code", "Code").required().searchable().sortable().max_length(5))
            .field(FieldSpec::text("note", "Note").searchable())
            .field(FieldSpec::number("weight", "Weight").sortable())
    }

    #[test]
    fn builders_set_flags() {
        let s = schema();
        let code = s.field_spec("code").unwrap();
        assert!(code.required && code.searchable && code.sortable);
        assert_eq!(code.max_length, Some(5));
        assert_eq!(s.field_spec("weight").unwrap().kind, FieldKind::Number);
        assert!(s.field_spec("id").is_none());
    }

    #[test]
    fn field_filters() {
        let s = schema();
        let names = |it: Vec<&FieldSpec>| it.iter().map(|f| f.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(s.searchable_fields().collect()), ["code", "note"]);
        assert_eq!(names(s.sortable_fields().collect()), ["code", "weight"]);
        assert_eq!(names(s.required_fields().collect()), ["code"]);
        assert!(s.is_sortable("weight"));
        assert!(!s.is_sortable("note"));
        assert!(!s.is_sortable("missing"));
    }
}
