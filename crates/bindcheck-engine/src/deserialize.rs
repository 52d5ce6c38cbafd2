//! # Per-Field Deserializer
//!
//! Turns one document node into a bound [`Value`] according to a
//! [`TypeDescriptor`]. Dispatch order:
//!
//! 1. An explicit `null` node is [`Value::Null`] for every type.
//! 2. Containers (types with type arguments) go to the generic
//!    collaborator in [`crate::generic`]. This precedes the wrapper check;
//!    a wrapper never has type arguments.
//! 3. A single-value wrapper deserializes the node's first child against
//!    its underlying type and stays tagged as [`Value::Wrapper`].
//! 4. Scalars and opaque serde types go to their plain deserializer.
//! 5. Bindable objects recurse into the engine.

use bindcheck_core::{
    BindError, BindableType, PathSegment, PropertyPath, TypeDescriptor, TypeKind, Value,
};
use serde_json::Value as Json;

use crate::aggregate::{resolve, ValidatedField};
use crate::bind::{bind, first_unknown};
use crate::engine::Context;
use crate::generic::deserialize_container;
use crate::validate::validate_field;

/// Deserializes `node` as `ty`.
pub(crate) fn deserialize_node(
    cx: &Context<'_>,
    ty: &TypeDescriptor,
    node: &Json,
) -> Result<Value, BindError> {
    if node.is_null() {
        return Ok(Value::Null);
    }
    match ty.kind() {
        TypeKind::Sequence | TypeKind::Mapping | TypeKind::Array(_) => {
            deserialize_container(cx, ty, node)
        }
        TypeKind::Wrapper(wrapper) => deserialize_wrapper(cx, wrapper, node),
        TypeKind::Plain(plain) => {
            plain(node).map_err(|source| BindError::Deserialize {
                path: PropertyPath::root(),
                type_name: ty.name(),
                source,
            })
        }
        TypeKind::Object(object) => bind_object(cx, object, node),
    }
}

/// The value a wrapper unwraps: the first member of an object, the first
/// element of an array, or a scalar itself.
fn first_child(node: &Json) -> Option<&Json> {
    match node {
        Json::Object(members) => members.values().next(),
        Json::Array(items) => items.first(),
        scalar => Some(scalar),
    }
}

fn deserialize_wrapper(
    cx: &Context<'_>,
    wrapper: &BindableType,
    node: &Json,
) -> Result<Value, BindError> {
    let info = cx.schemas.wrapper(wrapper)?;
    let Some(child) = first_child(node) else {
        return Ok(Value::Null);
    };
    let underlying = deserialize_node(cx, info.underlying(), child)?;
    if underlying.is_null() {
        return Ok(Value::Null);
    }
    Ok(Value::Wrapper {
        wrapper: info.wrapper(),
        member: info.member(),
        underlying: Box::new(underlying),
    })
}

/// Binds, validates and constructs one engine-bound object.
pub(crate) fn bind_object(
    cx: &Context<'_>,
    object: &BindableType,
    node: &Json,
) -> Result<Value, BindError> {
    let depth = cx.depth + 1;
    if depth > cx.options.max_depth {
        return Err(BindError::DepthExceeded {
            path: PropertyPath::root(),
            limit: cx.options.max_depth,
        });
    }
    let schema = cx.schemas.schema(object)?;
    if cx.options.deny_unknown_properties {
        if let Some(unknown) = first_unknown(&schema, node) {
            return Err(BindError::UnknownProperty {
                path: PropertyPath::of(PathSegment::property(unknown)),
                type_name: object.name(),
            });
        }
    }

    let cx = cx.nested(object.type_ref(), depth);
    let fields = bind(&schema, node)
        .into_iter()
        .map(|field| validate_field(&cx, field))
        .collect::<Result<Vec<ValidatedField<'_>>, BindError>>()?;
    resolve(&schema, fields)
}
