//! # Validator Collaborator
//!
//! The engine does not define constraints. It asks a [`Validator`] for the
//! violations of each bound value and only synthesizes the implicit
//! not-null violation itself, through [`Validator::not_null`], so hosts can
//! localize or restyle that message.
//!
//! Returned violation paths are relative to the value being validated; the
//! engine prefixes them with the field's wire name and any enclosing
//! element segments.

use std::sync::Arc;

use crate::descriptor::TypeRef;
use crate::path::PropertyPath;
use crate::value::Value;
use crate::violation::{Violation, Violations};

/// Message of the synthesized not-null violation.
pub const NOT_NULL_MESSAGE: &str = "must not be null";

/// Validates bound values against declared constraints.
pub trait Validator: Send + Sync {
    /// Violations of `value` bound to `property` of `owner`.
    fn validate_property(&self, owner: TypeRef, property: &str, value: &Value) -> Violations;

    /// Violations of the single-value wrapper `wrapper` whose member
    /// `member` holds `value`.
    fn validate_wrapper(&self, wrapper: TypeRef, member: &str, value: &Value) -> Violations;

    /// The canonical not-null violation at `path`.
    fn not_null(&self, owner: TypeRef, path: PropertyPath) -> Violation {
        Violation::new(NOT_NULL_MESSAGE, owner.name())
            .at(path)
            .with_invalid_value(Some(serde_json::Value::Null))
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate_property(&self, owner: TypeRef, property: &str, value: &Value) -> Violations {
        (**self).validate_property(owner, property, value)
    }

    fn validate_wrapper(&self, wrapper: TypeRef, member: &str, value: &Value) -> Violations {
        (**self).validate_wrapper(wrapper, member, value)
    }

    fn not_null(&self, owner: TypeRef, path: PropertyPath) -> Violation {
        (**self).not_null(owner, path)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate_property(&self, owner: TypeRef, property: &str, value: &Value) -> Violations {
        (**self).validate_property(owner, property, value)
    }

    fn validate_wrapper(&self, wrapper: TypeRef, member: &str, value: &Value) -> Violations {
        (**self).validate_wrapper(wrapper, member, value)
    }

    fn not_null(&self, owner: TypeRef, path: PropertyPath) -> Violation {
        (**self).not_null(owner, path)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate_property(&self, owner: TypeRef, property: &str, value: &Value) -> Violations {
        (**self).validate_property(owner, property, value)
    }

    fn validate_wrapper(&self, wrapper: TypeRef, member: &str, value: &Value) -> Violations {
        (**self).validate_wrapper(wrapper, member, value)
    }

    fn not_null(&self, owner: TypeRef, path: PropertyPath) -> Violation {
        (**self).not_null(owner, path)
    }
}

/// A validator with no declared constraints. Only the implicit not-null
/// rule applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraints;

impl Validator for NoConstraints {
    fn validate_property(&self, _owner: TypeRef, _property: &str, _value: &Value) -> Violations {
        Violations::new()
    }

    fn validate_wrapper(&self, _wrapper: TypeRef, _member: &str, _value: &Value) -> Violations {
        Violations::new()
    }
}
