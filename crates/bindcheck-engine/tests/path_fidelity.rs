//! # Path Fidelity and Aggregation
//!
//! End-to-end checks that one deserialization call reports every
//! violation in the document, each at its path from the document root.

mod common;

use bindcheck_engine::BindError;
use common::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// 1. Completeness
// ---------------------------------------------------------------------------

#[test]
fn independent_invalid_fields_are_all_reported() {
    let err = engine()
        .deserialize::<CustomProperties>(&json!({"foo": "", "bar": "  "}))
        .unwrap_err();
    assert_eq!(
        violation_lines(&err),
        vec!["foo: must not be blank", "bar: must not be blank"]
    );
}

#[test]
fn missing_field_and_nested_violation_in_one_failure() {
    let err = engine()
        .deserialize::<NestedFoo>(&json!({"nested": {"otherNotBlank": ""}}))
        .unwrap_err();
    assert_eq!(
        violation_lines(&err),
        vec![
            "notNullString: must not be null",
            "nested.otherNotBlank: must not be blank"
        ]
    );
}

// ---------------------------------------------------------------------------
// 2. Nested objects
// ---------------------------------------------------------------------------

#[test]
fn nested_paths_are_flattened_from_the_root() {
    let doc = json!({
        "notNullString": "a",
        "nested": {
            "otherNotBlank": "b",
            "someNullable": "",
            "child": {
                "otherNotBlank": "c",
                "child": {"someNullable": ""}
            }
        }
    });
    let err = engine().deserialize::<NestedFoo>(&doc).unwrap_err();
    assert_eq!(
        violation_lines(&err),
        vec![
            "nested.someNullable: must match \"[^ ]+\"",
            "nested.child.child.otherNotBlank: must not be blank",
            "nested.child.child.someNullable: must match \"[^ ]+\"",
        ]
    );
}

#[test]
fn valid_nested_document_constructs_value() {
    let doc = json!({
        "notNullString": "a",
        "nested": {"otherNotBlank": "b", "child": {"otherNotBlank": "c", "someNullable": "d"}}
    });
    let foo: NestedFoo = engine().deserialize(&doc).unwrap();
    let nested = foo.nested.unwrap();
    assert_eq!(nested.other_not_blank, "b");
    assert_eq!(nested.some_nullable, None);
    let child = nested.child.unwrap();
    assert_eq!(child.some_nullable.as_deref(), Some("d"));
    assert!(child.child.is_none());
}

#[test]
fn violations_carry_owner_and_value() {
    let err = engine()
        .deserialize::<NestedFoo>(&json!({"notNullString": "a", "nested": {"otherNotBlank": " "}}))
        .unwrap_err();
    let violations = err.violations().unwrap();
    let v = violations.get(0).unwrap();
    assert_eq!(v.path().to_string(), "nested.otherNotBlank");
    assert_eq!(v.root_type(), std::any::type_name::<Node>());
    assert_eq!(v.invalid_value(), Some(&json!(" ")));
}

// ---------------------------------------------------------------------------
// 3. Renames, defaults and settable properties
// ---------------------------------------------------------------------------

#[test]
fn renamed_fields_report_wire_names() {
    let ok: CustomProperties = engine()
        .deserialize(&json!({"foo": "x", "bar": "y", "custom_foo": ""}))
        .unwrap();
    assert_eq!(ok.custom_foo, "x");
    assert_eq!(ok.custom_bar, "y");
}

#[test]
fn absent_optional_parameter_takes_type_default() {
    let engine = engine();
    let absent: DefaultArgs = engine.deserialize(&json!({"bar": 5})).unwrap();
    let explicit_null: DefaultArgs = engine.deserialize(&json!({"foo": null, "bar": 5})).unwrap();
    let expected = DefaultArgs {
        foo: DEFAULT_FOO.to_owned(),
        bar: 5,
    };
    assert_eq!(absent, expected);
    assert_eq!(explicit_null, expected);

    let supplied: DefaultArgs = engine.deserialize(&json!({"foo": "x", "bar": 5})).unwrap();
    assert_eq!(supplied.foo, "x");
}

#[test]
fn settable_property_constraints_apply() {
    let err = engine()
        .deserialize::<OuterHolder>(&json!({"holder": {}}))
        .unwrap_err();
    assert_eq!(violation_lines(&err), vec!["holder.node: must not be null"]);

    let err = engine()
        .deserialize::<OuterHolder>(&json!({"holder": {"node": {"otherNotBlank": ""}}}))
        .unwrap_err();
    assert_eq!(
        violation_lines(&err),
        vec!["holder.node.otherNotBlank: must not be blank"]
    );
}

#[test]
fn settable_properties_are_applied_after_construction() {
    let outer: OuterHolder = engine()
        .deserialize(&json!({"holder": {"node": {"otherNotBlank": "n"}}}))
        .unwrap();
    assert_eq!(outer.holder.node.unwrap().other_not_blank, "n");
    assert_eq!(outer.holder.label, "unlabelled");

    let outer: OuterHolder = engine()
        .deserialize(&json!({"holder": {"node": {"otherNotBlank": "n"}, "label": "L"}}))
        .unwrap();
    assert_eq!(outer.holder.label, "L");
}

// ---------------------------------------------------------------------------
// 4. Single-value wrappers
// ---------------------------------------------------------------------------

#[test]
fn wrapper_constraint_reported_at_wrapper_path() {
    let err = engine()
        .deserialize::<SomeValueHolder>(&json!({"v": {"s": ""}}))
        .unwrap_err();
    assert_eq!(violation_lines(&err), vec!["v: must not be blank"]);
}

#[test]
fn null_wrapper_member_is_null_wrapper() {
    for doc in [json!({"v": {"s": null}}), json!({"v": null}), json!({})] {
        let err = engine().deserialize::<SomeValueHolder>(&doc).unwrap_err();
        assert_eq!(violation_lines(&err), vec!["v: must not be null"], "doc {doc}");
    }
}

#[test]
fn wrapper_unwraps_first_child() {
    let engine = engine();
    let holder: SomeValueHolder = engine.deserialize(&json!({"v": {"s": "ok"}})).unwrap();
    assert_eq!(holder.v, SomeValue { s: "ok".into() });
    let holder: SomeValueHolder = engine.deserialize(&json!({"v": "direct"})).unwrap();
    assert_eq!(holder.v.s, "direct");
    let holder: SomeValueHolder = engine.deserialize(&json!({"v": ["first", "second"]})).unwrap();
    assert_eq!(holder.v.s, "first");
}

#[test]
fn top_level_wrapper_is_validated() {
    let err = engine().deserialize::<SomeValue>(&json!({"s": " "})).unwrap_err();
    assert_eq!(violation_lines(&err), vec!["(root): must not be blank"]);
    let value: SomeValue = engine().deserialize(&json!({"s": "x"})).unwrap();
    assert_eq!(value.s, "x");
}

#[test]
fn wrapper_members_are_checked_in_depth() {
    let doc = json!({
        "tags": {"values": ["a", null]},
        "label": {"inner": {"s": ""}}
    });
    let err = engine().deserialize::<Tagged>(&doc).unwrap_err();
    assert_eq!(
        violation_lines(&err),
        vec!["tags[1]: must not be null", "label: must not be blank"]
    );

    let tagged: Tagged = engine()
        .deserialize(&json!({"tags": {"values": ["a"]}, "label": {"inner": {"s": "x"}}}))
        .unwrap();
    assert_eq!(tagged.tags.values, vec!["a".to_owned()]);
    assert_eq!(tagged.label.unwrap().inner.s, "x");
}

#[test]
fn top_level_wrapper_of_list_scans_elements() {
    let err = engine()
        .deserialize::<Tags>(&json!({"values": [null, "b"]}))
        .unwrap_err();
    assert_eq!(violation_lines(&err), vec!["[0]: must not be null"]);
}

// ---------------------------------------------------------------------------
// 5. Primitives and plain types
// ---------------------------------------------------------------------------

#[test]
fn primitive_constraints_and_implicit_not_null() {
    let err = engine()
        .deserialize::<ClassWithInt>(&json!({"value": -1}))
        .unwrap_err();
    assert_eq!(
        violation_lines(&err),
        vec!["value: must be greater than or equal to 0"]
    );

    let err = engine().deserialize::<ClassWithInt>(&json!({})).unwrap_err();
    assert_eq!(violation_lines(&err), vec!["value: must not be null"]);

    let ok: ClassWithInt = engine()
        .deserialize(&json!({"value": 3, "ratio": 0.5}))
        .unwrap();
    assert_eq!(ok.value, 3);
    assert_eq!(ok.ratio, Some(0.5));
    assert!(!ok.enabled);
}

#[test]
fn plain_deserializer_failure_carries_path() {
    let err = engine()
        .deserialize::<ClassWithInt>(&json!({"value": "seven"}))
        .unwrap_err();
    match err {
        BindError::Deserialize { path, .. } => assert_eq!(path.to_string(), "value"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn plain_serde_types_participate() {
    let engine = engine();
    let invoice: Invoice = engine.deserialize(&json!({"amount": 12})).unwrap();
    assert_eq!(invoice.amount, Amount::Units(12));
    let invoice: Invoice = engine.deserialize(&json!({"amount": "twelve"})).unwrap();
    assert_eq!(invoice.amount, Amount::Text("twelve".into()));

    let err = engine
        .deserialize::<Invoice>(&json!({"amount": true}))
        .unwrap_err();
    assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("amount"));
}

// ---------------------------------------------------------------------------
// 6. Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_yield_identical_violations() {
    let engine = engine();
    let doc = json!({
        "notNullString": null,
        "nested": {"otherNotBlank": "", "child": {"someNullable": "a b"}}
    });
    let first = engine.deserialize::<NestedFoo>(&doc).unwrap_err();
    let cached = engine.cached_schemas();
    let second = engine.deserialize::<NestedFoo>(&doc).unwrap_err();

    assert_eq!(first.violations(), second.violations());
    assert_eq!(
        serde_json::to_string(first.violations().unwrap()).unwrap(),
        serde_json::to_string(second.violations().unwrap()).unwrap()
    );
    assert_eq!(engine.cached_schemas(), cached);
}
