//! End-to-end execution tests against a small host schema.

use std::sync::{Arc, Mutex};

use serde_json::json;

use quill_engine::{
    registry::{
        resolvers::Resolver, InputObjectType, InterfaceType, MetaField, MetaInputValue,
        ObjectType, Registry,
    },
    CancellationHandle, ConstValue, ExecutableDocument, Field, Name, Request, Schema,
    SelectionSet,
};

fn object(pairs: Vec<(&str, ConstValue)>) -> ConstValue {
    ConstValue::Object(
        pairs
            .into_iter()
            .map(|(key, value)| (Name::new(key), value))
            .collect(),
    )
}

fn fixture_registry() -> Registry {
    let mut registry = Registry::default();

    registry
        .register(
            ObjectType::new("NestedQueryType")
                .with_field(MetaField::new("id", "Int"))
                .with_field(MetaField::new("stringField", "String"))
                .with_field(
                    MetaField::new("nested", "NestedNonGenericQueryType")
                        .with_argument(MetaInputValue::new("id", "Int!"))
                        .with_resolver(Resolver::function(|_, _| Ok(json!({})))),
                ),
        )
        .unwrap();

    registry
        .register(
            ObjectType::new("NestedNonGenericQueryType").with_field(
                MetaField::new("text", "String!")
                    .with_argument(MetaInputValue::new("id", "Int!"))
                    .with_argument(MetaInputValue::new("str", "String!"))
                    .with_resolver(Resolver::function(|_, args| {
                        let id = args.get("id").and_then(serde_json::Value::as_i64).unwrap_or_default();
                        let text = args
                            .get("str")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or_default();
                        Ok(json!(format!("I received {id} with {text}")))
                    })),
            ),
        )
        .unwrap();

    registry
        .register(
            ObjectType::new("TestObjectType")
                .with_field(MetaField::new("stringField", "String")),
        )
        .unwrap();

    registry
        .register(
            InputObjectType::new("InputTestObjectType")
                .with_input_field(MetaInputValue::new("stringField", "String!")),
        )
        .unwrap();

    registry
        .register(
            InterfaceType::new("Labeled")
                .with_field(MetaField::new("stringField", "String"))
                .with_possible_type("TestObjectType"),
        )
        .unwrap();

    registry
        .register(
            ObjectType::new("Holder")
                .with_field(MetaField::new("mandatory", "String!"))
                .with_field(MetaField::new("optional", "String")),
        )
        .unwrap();

    registry
        .register(
            ObjectType::new("Query")
                .with_field(
                    MetaField::new("nested", "NestedQueryType")
                        .with_argument(MetaInputValue::new("id", "Int!"))
                        .with_resolver(Resolver::function(|_, args| {
                            let id = args
                                .get("id")
                                .and_then(serde_json::Value::as_i64)
                                .unwrap_or_default();
                            Ok(json!({
                                "id": id,
                                "stringField": format!("Test with id {id}"),
                            }))
                        })),
                )
                .with_field(
                    MetaField::new("withArray", "Int")
                        .with_argument(MetaInputValue::new("ids", "[Int!]"))
                        .with_resolver(Resolver::function(|_, args| {
                            let count = args
                                .get("ids")
                                .and_then(serde_json::Value::as_array)
                                .map_or(0, Vec::len);
                            Ok(json!(count))
                        })),
                )
                .with_field(
                    MetaField::new("isNull", "Boolean")
                        .with_argument(MetaInputValue::new("nonMandatory", "Int"))
                        .with_resolver(Resolver::function(|_, args| {
                            let absent = args
                                .get("nonMandatory")
                                .map_or(true, serde_json::Value::is_null);
                            Ok(json!(absent))
                        })),
                )
                .with_field(
                    MetaField::new("withFloat", "Float")
                        .with_argument(MetaInputValue::new("value", "Float!"))
                        .with_resolver(Resolver::function(|_, args| {
                            Ok(args.get("value").cloned().unwrap_or(serde_json::Value::Null))
                        })),
                )
                .with_field(
                    MetaField::new("withList", "[Int!]")
                        .with_argument(MetaInputValue::new("ids", "[Int!]"))
                        .with_resolver(Resolver::function(|_, args| {
                            Ok(args.get("ids").cloned().unwrap_or(serde_json::Value::Null))
                        })),
                )
                .with_field(
                    MetaField::new("withObjectArg", "TestObjectType")
                        .with_argument(MetaInputValue::new("obj", "InputTestObjectType!"))
                        .with_resolver(Resolver::function(|_, args| {
                            Ok(args.get("obj").cloned().unwrap_or(serde_json::Value::Null))
                        })),
                )
                .with_field(
                    MetaField::new("withObjectListArg", "[TestObjectType!]")
                        .with_argument(MetaInputValue::new("objs", "[InputTestObjectType!]!"))
                        .with_resolver(Resolver::function(|_, args| {
                            Ok(args.get("objs").cloned().unwrap_or(serde_json::Value::Null))
                        })),
                )
                .with_field(
                    MetaField::new("labeled", "Labeled").with_resolver(Resolver::function(
                        |_, _| Ok(json!({"stringField": "tagged"})),
                    )),
                )
                .with_field(
                    MetaField::new("holder", "Holder")
                        .with_resolver(Resolver::function(|_, _| Ok(json!({"optional": "ok"})))),
                )
                .with_field(
                    MetaField::new("rootEcho", "String").with_resolver(Resolver::property("greeting")),
                ),
        )
        .unwrap();

    registry
}

fn fixture_schema() -> Schema {
    Schema::new(fixture_registry())
}

fn data(response: &quill_engine::Response) -> serde_json::Value {
    serde_json::to_value(&response.data).unwrap()
}

#[tokio::test]
async fn nested_selections_resolve_depth_first() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("nested")
        .argument("id", 42)
        .with_selection_set(SelectionSet::new([
            Field::new("id"),
            Field::new("stringField"),
            Field::new("nested")
                .argument("id", 24)
                .with_selection_set(SelectionSet::new([Field::new("text")
                    .argument("id", 12)
                    .argument("str", "abc")])),
        ]))]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok(), "unexpected errors: {:?}", response.errors);
    assert_eq!(
        data(&response),
        json!({
            "nested": {
                "id": 42,
                "stringField": "Test with id 42",
                "nested": {"text": "I received 12 with abc"},
            }
        })
    );
}

#[tokio::test]
async fn aliases_name_response_slots() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("withArray")
            .aliased("total")
            .argument("ids", ConstValue::from(vec![1, 2, 3])),
        Field::new("withArray").argument("ids", ConstValue::from(vec![1])),
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok());
    assert_eq!(data(&response), json!({"total": 3, "withArray": 1}));
}

#[tokio::test]
async fn omitted_nullable_arguments_are_distinguishable_from_null() {
    let schema = fixture_schema();

    let document = ExecutableDocument::query(SelectionSet::new([Field::new("isNull")]));
    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"isNull": true}));

    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("isNull").argument("nonMandatory", 1)
    ]));
    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"isNull": false}));

    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("isNull").argument("nonMandatory", ConstValue::Null)
    ]));
    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"isNull": true}));
}

#[tokio::test]
async fn integer_literals_widen_for_float_arguments() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("withFloat").argument("value", 3)
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok());
    assert_eq!(data(&response), json!({"withFloat": 3.0}));
}

#[tokio::test]
async fn single_values_promote_to_lists() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("withList").argument("ids", 1)
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok());
    assert_eq!(data(&response), json!({"withList": [1]}));
}

#[tokio::test]
async fn coercion_failures_are_scoped_to_their_field() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("withArray").argument("ids", ConstValue::from(vec![ConstValue::from("x")])),
        Field::new("isNull"),
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"withArray": null, "isNull": true}));
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("\"ids\""));
}

#[tokio::test]
async fn missing_required_arguments_fail_the_field() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("withFloat")]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"withFloat": null}));
    assert!(response.errors[0].message.contains("\"value\""));
}

#[tokio::test]
async fn null_for_non_nullable_field_bubbles_to_nullable_parent() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("holder").with_selection_set(SelectionSet::new([
            Field::new("mandatory"),
            Field::new("optional"),
        ])),
        Field::new("isNull"),
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"holder": null, "isNull": true}));
    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        serde_json::to_value(&response.errors[0].path).unwrap(),
        json!(["holder", "mandatory"])
    );
}

#[tokio::test]
async fn composite_fields_require_a_sub_selection() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("holder"),
        Field::new("isNull"),
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"holder": null, "isNull": true}));
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0]
        .message
        .contains("must have a selection of subfields"));
}

#[tokio::test]
async fn interface_typed_fields_resolve_like_objects() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("labeled")
        .with_selection_set(SelectionSet::new([Field::new("stringField")]))]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok(), "unexpected errors: {:?}", response.errors);
    assert_eq!(data(&response), json!({"labeled": {"stringField": "tagged"}}));

    let document = ExecutableDocument::query(SelectionSet::new([Field::new("__type")
        .argument("name", "Labeled")
        .with_selection_set(SelectionSet::new([
            Field::new("kind"),
            Field::new("possibleTypes"),
        ]))]));
    let response = schema.execute(Request::new(document)).await;
    assert_eq!(
        data(&response),
        json!({"__type": {"kind": "INTERFACE", "possibleTypes": ["TestObjectType"]}})
    );
}

#[tokio::test]
async fn unknown_fields_fail_their_own_slot() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("nope"),
        Field::new("isNull"),
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"nope": null, "isNull": true}));
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("\"nope\""));
}

#[tokio::test]
async fn input_objects_coerce_and_drop_unknown_keys() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("withObjectArg")
        .argument(
            "obj",
            object(vec![
                ("stringField", ConstValue::from("abc")),
                ("extra", ConstValue::from(1)),
            ]),
        )
        .with_selection_set(SelectionSet::new([Field::new("stringField")]))]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok(), "unexpected errors: {:?}", response.errors);
    assert_eq!(data(&response), json!({"withObjectArg": {"stringField": "abc"}}));
}

#[tokio::test]
async fn lists_of_input_objects_resolve_per_item() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("withObjectListArg")
        .argument(
            "objs",
            ConstValue::List(vec![
                object(vec![("stringField", ConstValue::from("a"))]),
                object(vec![("stringField", ConstValue::from("b"))]),
            ]),
        )
        .with_selection_set(SelectionSet::new([Field::new("stringField")]))]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok(), "unexpected errors: {:?}", response.errors);
    assert_eq!(
        data(&response),
        json!({"withObjectListArg": [{"stringField": "a"}, {"stringField": "b"}]})
    );
}

#[tokio::test]
async fn root_value_feeds_property_resolvers() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("rootEcho")]));

    let response = schema
        .execute(Request::new(document).with_root_value(json!({"greeting": "hi"})))
        .await;
    assert_eq!(data(&response), json!({"rootEcho": "hi"}));
}

#[tokio::test]
async fn typename_reports_the_enclosing_type() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("__typename"),
        Field::new("nested")
            .argument("id", 1)
            .with_selection_set(SelectionSet::new([Field::new("__typename")])),
    ]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(
        data(&response),
        json!({"__typename": "Query", "nested": {"__typename": "NestedQueryType"}})
    );
}

#[tokio::test]
async fn introspection_exposes_roots_and_types() {
    let schema = fixture_schema();

    let document = ExecutableDocument::query(SelectionSet::new([Field::new("__schema")
        .with_selection_set(SelectionSet::new([Field::new("queryType")
            .with_selection_set(SelectionSet::new([Field::new("name")]))]))]));
    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok(), "unexpected errors: {:?}", response.errors);
    assert_eq!(
        data(&response),
        json!({"__schema": {"queryType": {"name": "Query"}}})
    );

    let document = ExecutableDocument::query(SelectionSet::new([Field::new("__type")
        .argument("name", "TestObjectType")
        .with_selection_set(SelectionSet::new([
            Field::new("name"),
            Field::new("kind"),
        ]))]));
    let response = schema.execute(Request::new(document)).await;
    assert_eq!(
        data(&response),
        json!({"__type": {"name": "TestObjectType", "kind": "OBJECT"}})
    );

    let document = ExecutableDocument::query(SelectionSet::new([Field::new("__type")
        .argument("name", "Ghost")
        .with_selection_set(SelectionSet::new([Field::new("name")]))]));
    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"__type": null}));
}

#[tokio::test]
async fn introspection_is_served_only_at_the_query_root() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("nested")
        .argument("id", 1)
        .with_selection_set(SelectionSet::new([Field::new("__schema")
            .with_selection_set(SelectionSet::new([Field::new("queryType")
                .with_selection_set(SelectionSet::new([Field::new("name")]))]))]))]));

    let response = schema.execute(Request::new(document)).await;
    assert_eq!(data(&response), json!({"nested": {"__schema": null}}));
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("Unknown field \"__schema\""));
}

#[tokio::test]
async fn introspection_can_be_disabled() {
    let schema = Schema::build(fixture_registry())
        .disable_introspection()
        .finish();
    let document = ExecutableDocument::query(SelectionSet::new([Field::new("__schema")
        .with_selection_set(SelectionSet::new([Field::new("queryType")
            .with_selection_set(SelectionSet::new([Field::new("name")]))]))]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.data.is_null());
    assert!(response.errors[0].message.contains("introspection"));
}

#[tokio::test]
async fn mutations_run_serially_in_request_order() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut registry = fixture_registry();
    let mut mutation = ObjectType::new("Mutation");
    for name in ["first", "second", "third"] {
        let log = Arc::clone(&log);
        mutation = mutation.with_field(
            MetaField::new(name, "String!").with_resolver(Resolver::function(move |_, _| {
                log.lock().unwrap().push(name);
                Ok(json!(name))
            })),
        );
    }
    registry.register(mutation).unwrap();
    registry.mutation_type = Some("Mutation".to_string());
    let schema = Schema::new(registry);

    let document = ExecutableDocument::mutation(SelectionSet::new([
        Field::new("third"),
        Field::new("first"),
        Field::new("second"),
    ]));
    let response = schema.execute(Request::new(document)).await;
    assert!(response.is_ok());
    assert_eq!(
        data(&response),
        json!({"third": "third", "first": "first", "second": "second"})
    );
    assert_eq!(*log.lock().unwrap(), vec!["third", "first", "second"]);
}

#[tokio::test]
async fn mutations_require_a_mutation_root() {
    let schema = fixture_schema();
    let document = ExecutableDocument::mutation(SelectionSet::new([Field::new("first")]));

    let response = schema.execute(Request::new(document)).await;
    assert!(response.data.is_null());
    assert!(response.errors[0].message.contains("mutations"));
}

#[tokio::test]
async fn cancellation_fails_remaining_fields() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("isNull"),
        Field::new("withArray").argument("ids", ConstValue::from(vec![1])),
    ]));

    let handle = CancellationHandle::new();
    handle.cancel();
    let response = schema
        .execute(Request::new(document).with_cancellation(handle))
        .await;

    assert_eq!(data(&response), json!({"isNull": null, "withArray": null}));
    assert_eq!(response.errors.len(), 2);
    assert!(response.errors[0].message.contains("cancelled"));
}

#[tokio::test]
async fn execution_is_idempotent() {
    let schema = fixture_schema();
    let document = ExecutableDocument::query(SelectionSet::new([
        Field::new("nested")
            .argument("id", 7)
            .with_selection_set(SelectionSet::new([Field::new("stringField")])),
        Field::new("withList").argument("ids", ConstValue::from(vec![1, 2])),
    ]));

    let first = schema.execute(Request::new(document.clone())).await;
    let second = schema.execute(Request::new(document)).await;

    assert_eq!(data(&first), data(&second));
    assert_eq!(first.errors, second.errors);
}
