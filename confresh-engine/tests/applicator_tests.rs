use confresh_engine::applicator::ValueApplicator;
use confresh_engine::registry::mock::MockRegistry;
use confresh_engine::{Binding, ConfigDocument, FieldHandle, FieldSpec, RegistryError};
use confresh_types::{ConfigKey, ValueKind};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

fn doc(value: Value) -> ConfigDocument {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// One instance with one field bound to `app.value`.
fn single_binding(kind: ValueKind, initial: Value) -> (Arc<MockRegistry>, ConfigKey, Binding) {
    let registry = Arc::new(MockRegistry::new());
    registry.register(
        "svc",
        vec![(FieldSpec::new("field", "app.value", kind), initial)],
    );
    let binding = Binding {
        handle: FieldHandle {
            instance: "svc".to_string(),
            field: "field".to_string(),
        },
        kind,
    };
    (registry, ConfigKey::from_literal("app.value"), binding)
}

// ── Text ────────────────────────────────────────────────────────

#[test]
fn equal_text_is_not_written() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("same"));
    let d = doc(json!({}));

    let applied = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("same"), &d)
        .unwrap();

    assert!(!applied);
    assert_eq!(registry.write_count(), 0);
}

#[test]
fn changed_text_is_written() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({}));

    let applied = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("new"), &d)
        .unwrap();

    assert!(applied);
    assert_eq!(registry.value("svc", "field"), Some(json!("new")));
}

#[test]
fn non_string_incoming_text_is_stringified() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({}));

    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!(8080), &d)
        .unwrap();

    assert_eq!(registry.value("svc", "field"), Some(json!("8080")));
}

// ── Interpolation ───────────────────────────────────────────────

#[test]
fn placeholder_resolves_against_same_document() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({"a": {"b": "x"}, "c": "prefix-${a.b}-suffix"}));

    ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &json!("prefix-${a.b}-suffix"),
            &d,
        )
        .unwrap();

    assert_eq!(registry.value("svc", "field"), Some(json!("prefix-x-suffix")));
}

#[test]
fn unresolvable_placeholder_substitutes_null() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({}));

    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("v=${no.such.key}"), &d)
        .unwrap();

    assert_eq!(registry.value("svc", "field"), Some(json!("v=null")));
}

#[test]
fn numeric_placeholder_is_stringified() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({"http": {"port": 8080}}));

    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("port=${http.port}"), &d)
        .unwrap();

    assert_eq!(registry.value("svc", "field"), Some(json!("port=8080")));
}

#[test]
fn multiple_placeholders_all_substitute() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({"a": "1", "b": "2"}));

    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("${a}-${b}"), &d)
        .unwrap();

    assert_eq!(registry.value("svc", "field"), Some(json!("1-2")));
}

#[test]
fn substituted_text_is_not_rescanned() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({"a": "${b}", "b": "deep"}));

    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("X-${a}"), &d)
        .unwrap();

    // Single pass: the ${b} brought in by substitution stays literal.
    assert_eq!(registry.value("svc", "field"), Some(json!("X-${b}")));
}

#[test]
fn default_syntax_inside_placeholder_does_not_resolve() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    let d = doc(json!({"a": {"b": "x"}}));

    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("${a.b:fallback}"), &d)
        .unwrap();

    // The inner expression is looked up verbatim; `b:fallback` is not a
    // configured segment.
    assert_eq!(registry.value("svc", "field"), Some(json!("null")));
}

// ── Scalars ─────────────────────────────────────────────────────

#[test]
fn equal_scalar_is_not_written() {
    let (registry, key, binding) = single_binding(ValueKind::Scalar, json!(42));
    let applied = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!(42), &doc(json!({})))
        .unwrap();
    assert!(!applied);
}

#[test]
fn scalar_comparison_ignores_numeric_representation() {
    let (registry, key, binding) = single_binding(ValueKind::Scalar, json!(1));
    let applied = ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &Value::from(1.0_f64),
            &doc(json!({})),
        )
        .unwrap();
    assert!(!applied);
    assert_eq!(registry.write_count(), 0);
}

#[test]
fn changed_scalar_is_written() {
    let (registry, key, binding) = single_binding(ValueKind::Scalar, json!(42));
    let applied = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!(43), &doc(json!({})))
        .unwrap();
    assert!(applied);
    assert_eq!(registry.value("svc", "field"), Some(json!(43)));
}

#[test]
fn changed_boolean_is_written() {
    let (registry, key, binding) = single_binding(ValueKind::Scalar, json!(false));
    let applied = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!(true), &doc(json!({})))
        .unwrap();
    assert!(applied);
    assert_eq!(registry.value("svc", "field"), Some(json!(true)));
}

// ── Lists ───────────────────────────────────────────────────────

#[test]
fn equal_list_is_not_written() {
    let (registry, key, binding) = single_binding(ValueKind::List, json!(["a", "b"]));
    let applied = ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &json!(["a", "b"]),
            &doc(json!({})),
        )
        .unwrap();
    assert!(!applied);
}

#[test]
fn reordered_list_counts_as_changed() {
    let (registry, key, binding) = single_binding(ValueKind::List, json!(["a", "b"]));
    let applied = ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &json!(["b", "a"]),
            &doc(json!({})),
        )
        .unwrap();
    assert!(applied);
}

#[test]
fn changed_list_is_replaced_wholesale() {
    let (registry, key, binding) = single_binding(ValueKind::List, json!(["a", "b", "c"]));
    ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!(["d"]), &doc(json!({})))
        .unwrap();
    assert_eq!(registry.value("svc", "field"), Some(json!(["d"])));
}

#[test]
fn list_numeric_elements_compare_semantically() {
    let (registry, key, binding) = single_binding(ValueKind::List, json!([1, 2]));
    let applied = ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &json!([1.0, 2.0]),
            &doc(json!({})),
        )
        .unwrap();
    assert!(!applied);
}

// ── Structured ──────────────────────────────────────────────────

#[test]
fn structurally_equal_object_is_not_written() {
    let (registry, key, binding) =
        single_binding(ValueKind::Structured, json!({"a": 1, "b": {"c": 2}}));
    let applied = ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &json!({"b": {"c": 2}, "a": 1}),
            &doc(json!({})),
        )
        .unwrap();
    assert!(!applied);
}

#[test]
fn changed_object_is_written() {
    let (registry, key, binding) = single_binding(ValueKind::Structured, json!({"a": 1}));
    let applied = ValueApplicator::new()
        .apply(
            registry.as_ref(),
            &key,
            &binding,
            &json!({"a": 2}),
            &doc(json!({})),
        )
        .unwrap();
    assert!(applied);
    assert_eq!(registry.value("svc", "field"), Some(json!({"a": 2})));
}

// ── Failures ────────────────────────────────────────────────────

#[test]
fn unknown_field_read_errors() {
    let (registry, key, _) = single_binding(ValueKind::Text, json!("x"));
    let stray = Binding {
        handle: FieldHandle {
            instance: "svc".to_string(),
            field: "missing".to_string(),
        },
        kind: ValueKind::Text,
    };

    let err = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &stray, &json!("y"), &doc(json!({})))
        .unwrap_err();
    assert!(matches!(err, RegistryError::FieldNotFound { .. }));
}

#[test]
fn rejected_write_errors() {
    let (registry, key, binding) = single_binding(ValueKind::Text, json!("old"));
    registry.reject_writes("svc", "field");

    let err = ValueApplicator::new()
        .apply(registry.as_ref(), &key, &binding, &json!("new"), &doc(json!({})))
        .unwrap_err();
    assert!(matches!(err, RegistryError::ValueRejected { .. }));
}
