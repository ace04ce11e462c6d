//! 内置资源定义

use crate::types::{FieldSpec, ResourceSchema};

/// Roles: `/api/roles`
#[must_use]
pub fn role_schema() -> ResourceSchema {
    ResourceSchema::new("roles", "Role", "id")
        .field(
            FieldSpec::text("name", "Name")
                .required()
                .max_length(50)
                .searchable()
                .sortable(),
        )
        .field(
            FieldSpec::text("description", "Description")
                .searchable()
                .sortable(),
        )
}

/// Success indicators: `/api/success-indicators`
#[must_use]
pub fn success_indicator_schema() -> ResourceSchema {
    ResourceSchema::new("success-indicators", "Success indicator", "id")
        .field(
            FieldSpec::text("code", "Code")
                .required()
                .max_length(10)
                .searchable()
                .sortable(),
        )
        .field(
            FieldSpec::text("description", "Description")
                .required()
                .searchable()
                .sortable(),
        )
        .field(FieldSpec::number("target", "Target").sortable())
        .field(FieldSpec::date("effective_date", "Effective date").sortable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_fields() {
        let schema = role_schema();
        assert_eq!(schema.resource, "roles");
        assert_eq!(schema.key_field, "id");
        let name = schema.field_spec("name").unwrap();
        assert!(name.required);
        assert_eq!(name.max_length, Some(50));
        assert!(!schema.field_spec("description").unwrap().required);
    }

    #[test]
    fn indicator_searches_code_and_description_only() {
        let schema = success_indicator_schema();
        let searchable: Vec<&str> = schema.searchable_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(searchable, ["code", "description"]);
        assert!(schema.is_sortable("target"));
        assert!(!schema.is_sortable("id"));
    }
}
