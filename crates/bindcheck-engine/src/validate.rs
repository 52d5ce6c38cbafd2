//! # Field Validator
//!
//! Deserializes one bound field and collects its violations:
//!
//! 1. A non-null wrapper value is validated as the wrapper itself, so
//!    constraints on the wrapper's member apply at the field's own path.
//!    A member that is a wrapper or a container is checked in turn.
//! 2. Any other value is validated as property `name` of the owning type.
//! 3. Container values are scanned: a null element of a non-nullable
//!    element type yields a not-null violation at `[k]`, wrapper elements
//!    are validated as wrappers, and nested containers are scanned in turn.
//!
//! A field left null with no violations, not optional and not nullable
//! gets exactly one synthesized not-null violation at its own path.

use bindcheck_core::{
    BindError, PathSegment, PropertyPath, TypeDescriptor, TypeRef, Value, Violations,
};

use crate::aggregate::ValidatedField;
use crate::bind::BoundField;
use crate::deserialize::deserialize_node;
use crate::engine::Context;
use crate::introspect::FieldDescriptor;
use crate::reconstruct::reconstruct;

/// Deserializes and validates one bound field.
///
/// Violations of nested objects and container elements come back as a
/// rejected field; only collaborator failures are returned as errors.
pub(crate) fn validate_field<'s>(
    cx: &Context<'_>,
    field: BoundField<'s, '_>,
) -> Result<ValidatedField<'s>, BindError> {
    let descriptor = field.descriptor;
    let segment = PathSegment::property(descriptor.wire_name());
    tracing::trace!(
        owner = cx.owner.name(),
        field = descriptor.wire_name(),
        present = field.node.is_some(),
        "binding field"
    );

    let value = match field.node {
        None => Value::Null,
        Some(node) => {
            match reconstruct(segment.clone(), || {
                deserialize_node(cx, descriptor.type_descriptor(), node)
            }) {
                Ok(value) => value,
                Err(BindError::Invalid(violations)) => {
                    return Ok(ValidatedField::rejected(descriptor, violations));
                }
                Err(other) => return Err(other),
            }
        }
    };

    let path = PropertyPath::of(segment.clone());
    let mut violations = match &value {
        Value::Wrapper {
            wrapper,
            member,
            underlying,
        } => check_wrapper(cx, *wrapper, member, underlying, &path),
        _ => {
            let mut violations = cx
                .validator
                .validate_property(cx.owner, descriptor.name(), &value)
                .with_prefix(&segment);
            violations.extend(scan(cx, descriptor.type_descriptor(), &value, &path));
            violations
        }
    };

    if violations.is_empty() && value.is_null() && !accepts_null(descriptor) {
        violations.push(cx.validator.not_null(cx.owner, path));
    }
    Ok(ValidatedField::new(descriptor, value, violations))
}

fn accepts_null(descriptor: &FieldDescriptor) -> bool {
    descriptor.is_optional() || descriptor.type_descriptor().is_nullable()
}

/// Violations of a non-null wrapper value at `path`: the wrapper's own
/// constraints, then those of its member when the member is itself a
/// wrapper or a container.
pub(crate) fn check_wrapper(
    cx: &Context<'_>,
    wrapper: TypeRef,
    member: &str,
    underlying: &Value,
    path: &PropertyPath,
) -> Violations {
    let mut violations = cx
        .validator
        .validate_wrapper(wrapper, member, underlying)
        .with_parent(path);
    match underlying {
        Value::Wrapper {
            wrapper,
            member,
            underlying,
        } => violations.extend(check_wrapper(cx, *wrapper, member, underlying, path)),
        nested => {
            if let Some(info) = cx.schemas.cached_wrapper(wrapper) {
                violations.extend(scan(cx, info.underlying(), nested, path));
            }
        }
    }
    violations
}

/// Scans the elements of a container `value` of type `ty`.
pub(crate) fn scan(
    cx: &Context<'_>,
    ty: &TypeDescriptor,
    value: &Value,
    base: &PropertyPath,
) -> Violations {
    let Some(element) = ty.element_type() else {
        return Violations::new();
    };
    let mut violations = Violations::new();
    match value {
        Value::Sequence(items) | Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let path = base.child(PathSegment::Index(index));
                violations.extend(check_element(cx, element, item, &path));
            }
        }
        Value::Mapping(entries) => {
            for (key, item) in entries {
                let path = base.child(PathSegment::key(key.as_str()));
                violations.extend(check_element(cx, element, item, &path));
            }
        }
        _ => {}
    }
    violations
}

/// Violations of one container element of type `element` at `path`.
pub(crate) fn check_element(
    cx: &Context<'_>,
    element: &TypeDescriptor,
    item: &Value,
    path: &PropertyPath,
) -> Violations {
    let mut violations = Violations::new();
    match item {
        Value::Null => {
            if !element.is_nullable() {
                violations.push(cx.validator.not_null(cx.owner, path.clone()));
            }
        }
        Value::Wrapper {
            wrapper,
            member,
            underlying,
        } => violations.extend(check_wrapper(cx, *wrapper, member, underlying, path)),
        nested => violations.extend(scan(cx, element, nested, path)),
    }
    violations
}
