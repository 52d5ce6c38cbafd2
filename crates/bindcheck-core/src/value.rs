//! # Bound Values
//!
//! [`Value`] is the dynamically typed result of deserializing one field.
//! Scalars and containers stay inspectable so validators can check them;
//! engine-constructed objects and opaque serde types are carried as
//! type-erased [`Object`]s; single-value wrappers stay tagged as
//! [`Value::Wrapper`] until the owning type's constructor converts them.

use std::any::Any;
use std::fmt;

use crate::declare::{Arguments, Bindable};
use crate::descriptor::TypeRef;
use crate::error::ConstructError;

/// A deserialized field value.
pub enum Value {
    /// Absent input, explicit `null`, or a null wrapper member.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Elements of a growable sequence, in document order.
    Sequence(Vec<Value>),
    /// Entries of a mapping, in document order.
    Mapping(Vec<(String, Value)>),
    /// Elements of a fixed-size array.
    Array(Vec<Value>),
    /// A constructed Rust value.
    Object(Object),
    /// A single-value wrapper, still holding its unconverted member.
    Wrapper {
        wrapper: TypeRef,
        member: &'static str,
        underlying: Box<Value>,
    },
}

/// A type-erased, fully constructed value.
pub struct Object {
    ty: TypeRef,
    inner: Box<dyn Any>,
}

impl Object {
    /// Identity of the contained type.
    pub fn type_ref(&self) -> TypeRef {
        self.ty
    }

    /// Borrows the contained value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Takes the contained value if it is a `T`.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        let ty = self.ty;
        match self.inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { ty, inner }),
        }
    }
}

impl Value {
    /// Boxes a constructed value.
    pub fn object<T: 'static>(value: T) -> Self {
        Self::Object(Object {
            ty: TypeRef::of::<T>(),
            inner: Box::new(value),
        })
    }

    /// Wraps a value produced by an erased constructor.
    pub fn from_boxed(ty: TypeRef, inner: Box<dyn Any>) -> Self {
        Self::Object(Object { ty, inner })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, for mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Wrapper { .. } => "wrapper",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Wrapper { underlying, .. } => underlying.as_str(),
            _ => None,
        }
    }

    /// Numeric view of integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::UInt(u) => Some(*u as f64),
            Self::Float(f) => Some(*f),
            Self::Wrapper { underlying, .. } => underlying.as_f64(),
            _ => None,
        }
    }

    /// Number of characters of a string or entries of a container.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::Sequence(items) | Self::Array(items) => Some(items.len()),
            Self::Mapping(entries) => Some(entries.len()),
            Self::Wrapper { underlying, .. } => underlying.len(),
            _ => None,
        }
    }

    /// JSON rendering for diagnostics. Objects have none.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;
        Some(match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::from(*i),
            Self::UInt(u) => Json::from(*u),
            Self::Float(f) => Json::Number(serde_json::Number::from_f64(*f)?),
            Self::String(s) => Json::String(s.clone()),
            Self::Sequence(items) | Self::Array(items) => Json::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Mapping(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                    .collect::<Option<serde_json::Map<_, _>>>()?,
            ),
            Self::Object(object) => return object.downcast_ref::<Json>().cloned(),
            Self::Wrapper { underlying, .. } => return underlying.to_json(),
        })
    }

    /// Takes the constructed `T` out of an [`Value::Object`].
    pub fn into_object<T: 'static>(self) -> Result<T, ConstructError> {
        match self {
            Self::Object(object) => object.downcast::<T>().map_err(|_| ConstructError::Mismatch {
                expected: std::any::type_name::<T>(),
                found: "object of another type",
            }),
            Self::Null => Err(ConstructError::Missing {
                name: std::any::type_name::<T>().to_owned(),
            }),
            other => Err(ConstructError::Mismatch {
                expected: std::any::type_name::<T>(),
                found: other.kind_name(),
            }),
        }
    }

    /// Builds the wrapper `W` from a tagged wrapper value by invoking its
    /// constructor with the single member.
    pub fn into_wrapper<W: Bindable>(self) -> Result<W, ConstructError> {
        match self {
            Self::Wrapper {
                member, underlying, ..
            } => {
                let mut args = Arguments::new(std::any::type_name::<W>());
                args.insert(member, *underlying);
                W::construct(&mut args)
            }
            other => other.into_object::<W>(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::UInt(u) => f.debug_tuple("UInt").field(u).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Mapping(entries) => f.debug_tuple("Mapping").field(entries).finish(),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Self::Object(object) => f.debug_tuple("Object").field(&object.ty.name()).finish(),
            Self::Wrapper {
                wrapper,
                underlying,
                ..
            } => f
                .debug_struct("Wrapper")
                .field("wrapper", &wrapper.name())
                .field("underlying", underlying)
                .finish(),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&self.ty.name()).finish()
    }
}
