//! Schema introspection: meta-types and the JSON view of a registry.
//!
//! The `__schema` and `__type` fields resolve against a JSON description
//! of the registry, produced here by [`describe`]. The meta-types
//! (`__Schema`, `__Type`, ...) are ordinary object types whose fields
//! all read properties off that description, so the regular resolution
//! machinery serves introspection unchanged.

use serde_json::json;

use super::{MetaField, MetaType, ObjectType, Registry};

/// Register the introspection meta-types. Runs once, when a schema is
/// finished.
pub(crate) fn create_introspection_types(registry: &mut Registry) {
    let schema_type = ObjectType::new("__Schema")
        .with_description("A description of the capabilities of the schema.")
        .with_field(MetaField::new("types", "[__Type!]!"))
        .with_field(MetaField::new("queryType", "__Type!"))
        .with_field(MetaField::new("mutationType", "__Type"));

    let type_type = ObjectType::new("__Type")
        .with_description("A named type in the schema.")
        .with_field(MetaField::new("kind", "String!"))
        .with_field(MetaField::new("name", "String!"))
        .with_field(MetaField::new("description", "String"))
        .with_field(MetaField::new("fields", "[__Field!]"))
        .with_field(MetaField::new("inputFields", "[__InputValue!]"))
        .with_field(MetaField::new("possibleTypes", "[String!]"));

    let field_type = ObjectType::new("__Field")
        .with_description("A field on an object or interface type.")
        .with_field(MetaField::new("name", "String!"))
        .with_field(MetaField::new("description", "String"))
        .with_field(MetaField::new("type", "String!"))
        .with_field(MetaField::new("args", "[__InputValue!]!"));

    let input_value_type = ObjectType::new("__InputValue")
        .with_description("An argument or input-object field.")
        .with_field(MetaField::new("name", "String!"))
        .with_field(MetaField::new("description", "String"))
        .with_field(MetaField::new("type", "String!"))
        .with_field(MetaField::new("defaultValue", "String"));

    for ty in [schema_type, type_type, field_type, input_value_type] {
        registry.types.insert(ty.name.clone(), MetaType::Object(ty));
    }
}

/// The JSON description of a whole registry, shaped for `__Schema`.
pub(crate) fn describe(registry: &Registry) -> serde_json::Value {
    json!({
        "types": registry
            .types
            .values()
            .map(describe_type)
            .collect::<Vec<_>>(),
        "queryType": registry.types.get(&registry.query_type).map(describe_type),
        "mutationType": registry
            .mutation_type
            .as_deref()
            .and_then(|name| registry.types.get(name))
            .map(describe_type),
    })
}

/// The JSON description of one type, shaped for `__Type`.
pub(crate) fn describe_type(ty: &MetaType) -> serde_json::Value {
    json!({
        "kind": ty.kind().as_str(),
        "name": ty.name(),
        "description": ty.description(),
        "fields": ty.fields().map(|fields| {
            fields.values().map(describe_field).collect::<Vec<_>>()
        }),
        "inputFields": ty.input_fields().map(|input_fields| {
            input_fields
                .values()
                .map(describe_input_value)
                .collect::<Vec<_>>()
        }),
        "possibleTypes": match ty {
            MetaType::Interface(interface) => Some(&interface.possible_types),
            _ => None,
        },
    })
}

fn describe_field(field: &MetaField) -> serde_json::Value {
    json!({
        "name": field.name,
        "description": field.description,
        "type": field.ty.as_str(),
        "args": field
            .args
            .values()
            .map(describe_input_value)
            .collect::<Vec<_>>(),
    })
}

fn describe_input_value(input_value: &super::MetaInputValue) -> serde_json::Value {
    json!({
        "name": input_value.name,
        "description": input_value.description,
        "type": input_value.ty.as_str(),
        "defaultValue": input_value
            .default_value
            .as_ref()
            .map(|default| default.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetaInputValue;

    #[test]
    fn describe_reports_roots_and_fields() {
        let mut registry = Registry::default();
        registry
            .register(
                ObjectType::new("Query").with_field(
                    MetaField::new("withArray", "Int")
                        .with_argument(MetaInputValue::new("ids", "[Int!]")),
                ),
            )
            .unwrap();
        registry.add_builtin_scalars();

        let description = describe(&registry);
        assert_eq!(description["queryType"]["name"], "Query");
        assert!(description["mutationType"].is_null());

        let query = description["types"]
            .as_array()
            .unwrap()
            .iter()
            .find(|ty| ty["name"] == "Query")
            .unwrap();
        assert_eq!(query["kind"], "OBJECT");
        assert_eq!(query["fields"][0]["name"], "withArray");
        assert_eq!(query["fields"][0]["args"][0]["type"], "[Int!]");
    }

    #[test]
    fn scalars_have_no_field_lists() {
        let mut registry = Registry::default();
        registry.add_builtin_scalars();

        let int = describe_type(registry.lookup_type("Int").unwrap());
        assert_eq!(int["kind"], "SCALAR");
        assert!(int["fields"].is_null());
        assert!(int["inputFields"].is_null());
    }
}
