//! # Container Deserialization
//!
//! The generic-type collaborator: sequences, fixed-size arrays and
//! mappings. Every element is deserialized independently through
//! [`reconstruct`], so one element's violations never hide another's.
//!
//! Mapping keys are checked against the key type before any value is
//! deserialized.
//!
//! When at least one element is rejected the container as a whole fails
//! with the violations of every element in document order, together with
//! the not-null violations of its null elements. A container whose
//! elements all bind is returned as a value and checked by the field
//! validator instead.

use bindcheck_core::{BindError, PathSegment, PropertyPath, TypeDescriptor, TypeKind, Value, Violations};
use serde_json::Value as Json;

use crate::deserialize::deserialize_node;
use crate::engine::Context;
use crate::reconstruct::reconstruct;
use crate::validate::check_element;

/// Outcome of one element.
enum Slot {
    Bound(Value),
    Rejected(Violations),
}

fn mismatch(expected: &'static str, node: &Json) -> BindError {
    let found = match node {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    };
    BindError::Mismatch {
        path: PropertyPath::root(),
        expected,
        found,
    }
}

/// Runs a member name through the mapping's key deserializer. A bad key
/// fails at `[key]` like any other collaborator failure.
fn check_key(key_type: &TypeDescriptor, key: &str) -> Result<(), BindError> {
    let TypeKind::Plain(parse) = key_type.kind() else {
        return Ok(());
    };
    parse(&Json::String(key.to_owned()))
        .map(drop)
        .map_err(|source| BindError::Deserialize {
            path: PropertyPath::of(PathSegment::key(key)),
            type_name: key_type.name(),
            source,
        })
}

/// Deserializes a container node as `ty`.
pub(crate) fn deserialize_container(
    cx: &Context<'_>,
    ty: &TypeDescriptor,
    node: &Json,
) -> Result<Value, BindError> {
    let Some(element) = ty.element_type() else {
        return Err(mismatch("a container type", node));
    };

    let entries: Vec<(PathSegment, &Json)> = match ty.kind() {
        TypeKind::Mapping => {
            let members = node.as_object().ok_or_else(|| mismatch("object", node))?;
            let mut entries = Vec::with_capacity(members.len());
            for (key, item) in members {
                if let Some(key_type) = ty.key_type() {
                    check_key(key_type, key)?;
                }
                entries.push((PathSegment::key(key.as_str()), item));
            }
            entries
        }
        kind => {
            let items = node.as_array().ok_or_else(|| mismatch("array", node))?;
            if let TypeKind::Array(len) = *kind {
                if items.len() != len {
                    return Err(BindError::Length {
                        path: PropertyPath::root(),
                        expected: len,
                        found: items.len(),
                    });
                }
            }
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (PathSegment::Index(index), item))
                .collect()
        }
    };

    let mut slots = Vec::with_capacity(entries.len());
    let mut rejected = false;
    for (segment, item) in entries {
        let slot = match reconstruct(segment.clone(), || deserialize_node(cx, element, item)) {
            Ok(value) => Slot::Bound(value),
            Err(BindError::Invalid(violations)) => {
                tracing::trace!(element = %segment, violations = violations.len(), "element rejected");
                rejected = true;
                Slot::Rejected(violations)
            }
            Err(other) => return Err(other),
        };
        slots.push((segment, slot));
    }

    if rejected {
        let mut violations = Violations::new();
        for (segment, slot) in &slots {
            match slot {
                Slot::Rejected(nested) => violations.extend(nested.iter().cloned()),
                Slot::Bound(value) => violations.extend(check_element(
                    cx,
                    element,
                    value,
                    &PropertyPath::of(segment.clone()),
                )),
            }
        }
        return Err(BindError::Invalid(violations));
    }

    let bound = slots.into_iter().filter_map(|(segment, slot)| match slot {
        Slot::Bound(value) => Some((segment, value)),
        Slot::Rejected(_) => None,
    });
    Ok(match ty.kind() {
        TypeKind::Mapping => Value::Mapping(
            bound
                .map(|(segment, value)| match segment {
                    PathSegment::Key(key) | PathSegment::Property(key) => (key, value),
                    PathSegment::Index(index) => (index.to_string(), value),
                })
                .collect(),
        ),
        TypeKind::Array(_) => Value::Array(bound.map(|(_, value)| value).collect()),
        _ => Value::Sequence(bound.map(|(_, value)| value).collect()),
    })
}
