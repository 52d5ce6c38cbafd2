//! # Field Binder
//!
//! Pairs each field of a schema with the sub-tree it addresses. An object
//! node is searched by wire name; any other node is bound whole to every
//! field, which lets single-value documents bind to object types.

use serde_json::Value as Json;

use crate::introspect::{FieldDescriptor, Schema};

/// A field and the document node it addresses, if any.
#[derive(Debug, Clone, Copy)]
pub struct BoundField<'s, 'd> {
    pub descriptor: &'s FieldDescriptor,
    pub node: Option<&'d Json>,
}

/// Binds one field against `document`.
pub fn bind_field<'s, 'd>(descriptor: &'s FieldDescriptor, document: &'d Json) -> BoundField<'s, 'd> {
    let node = match document {
        Json::Object(members) => members.get(descriptor.wire_name()),
        other => Some(other),
    };
    BoundField { descriptor, node }
}

/// Binds every field of `schema`, in schema order.
pub fn bind<'s, 'd>(schema: &'s Schema, document: &'d Json) -> Vec<BoundField<'s, 'd>> {
    schema
        .fields()
        .iter()
        .map(|descriptor| bind_field(descriptor, document))
        .collect()
}

/// The first member of `document` that matches no field, if any.
pub fn first_unknown<'d>(schema: &Schema, document: &'d Json) -> Option<&'d str> {
    let Json::Object(members) = document else {
        return None;
    };
    members
        .keys()
        .find(|key| schema.field(key).is_none())
        .map(String::as_str)
}
