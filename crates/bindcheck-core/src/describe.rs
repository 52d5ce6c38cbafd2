//! # Describable Types
//!
//! [`Describe`] connects a Rust type to the engine: it yields the type's
//! [`TypeDescriptor`] and converts a bound [`Value`] back into the type.
//!
//! Implementations are provided for scalars, `String`, `char`,
//! `serde_json::Value`, `Option`, `Box`, and the standard sequences,
//! arrays and maps. User types use the [`describe!`](crate::describe)
//! macro, which picks the binding strategy:
//!
//! ```text
//! describe!(object Node, Holder);   // bound field by field
//! describe!(wrapper SomeValue);     // single-value wrapper
//! describe!(plain Amount);          // any serde DeserializeOwned type
//! ```
//!
//! Generic user types implement [`Describe`] by hand, forwarding to
//! [`TypeDescriptor::object`] and [`Value::into_object`]; each
//! instantiation gets its own schema.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;

use serde::de::Error as _;
use serde::Deserialize;

use crate::descriptor::TypeDescriptor;
use crate::error::ConstructError;
use crate::value::Value;

/// A type that can appear as a bound field.
pub trait Describe: Sized + 'static {
    /// The runtime descriptor of this type.
    fn descriptor() -> TypeDescriptor;

    /// Converts a bound value into this type.
    fn from_value(value: Value) -> Result<Self, ConstructError>;
}

/// Implements [`Describe`] for user types.
#[macro_export]
macro_rules! describe {
    (object $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Describe for $ty {
                fn descriptor() -> $crate::TypeDescriptor {
                    $crate::TypeDescriptor::object::<$ty>()
                }

                fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ConstructError> {
                    value.into_object::<$ty>()
                }
            }
        )+
    };
    (wrapper $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Describe for $ty {
                fn descriptor() -> $crate::TypeDescriptor {
                    $crate::TypeDescriptor::wrapper::<$ty>()
                }

                fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ConstructError> {
                    value.into_wrapper::<$ty>()
                }
            }
        )+
    };
    (plain $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Describe for $ty {
                fn descriptor() -> $crate::TypeDescriptor {
                    $crate::TypeDescriptor::plain::<$ty>()
                }

                fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ConstructError> {
                    value.into_object::<$ty>()
                }
            }
        )+
    };
}

fn mismatch<T>(value: &Value) -> ConstructError {
    ConstructError::Mismatch {
        expected: std::any::type_name::<T>(),
        found: value.kind_name(),
    }
}

fn missing<T>() -> ConstructError {
    ConstructError::Missing {
        name: std::any::type_name::<T>().to_owned(),
    }
}

impl Describe for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<bool>(|node| bool::deserialize(node).map(Value::Bool))
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Null => Err(missing::<bool>()),
            other => Err(mismatch::<bool>(&other)),
        }
    }
}

macro_rules! describe_integer {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar::<$ty>(|node| {
                        <$ty>::deserialize(node).map(|n| Value::$variant(n as $wide))
                    })
                }

                fn from_value(value: Value) -> Result<Self, ConstructError> {
                    let out_of_range = || ConstructError::OutOfRange {
                        type_name: stringify!($ty),
                    };
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|_| out_of_range()),
                        Value::UInt(u) => <$ty>::try_from(u).map_err(|_| out_of_range()),
                        Value::Null => Err(missing::<$ty>()),
                        other => Err(mismatch::<$ty>(&other)),
                    }
                }
            }
        )+
    };
}

describe_integer!(Int as i64: i8, i16, i32, i64, isize);
describe_integer!(UInt as u64: u8, u16, u32, u64, usize);

macro_rules! describe_float {
    ($($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar::<$ty>(|node| {
                        <$ty>::deserialize(node).map(|f| Value::Float(f64::from(f)))
                    })
                }

                fn from_value(value: Value) -> Result<Self, ConstructError> {
                    match value {
                        Value::Float(f) => Ok(f as $ty),
                        Value::Int(i) => Ok(i as $ty),
                        Value::UInt(u) => Ok(u as $ty),
                        Value::Null => Err(missing::<$ty>()),
                        other => Err(mismatch::<$ty>(&other)),
                    }
                }
            }
        )+
    };
}

describe_float!(f32, f64);

impl Describe for char {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<char>(|node| {
            char::deserialize(node).map(|c| Value::String(c.to_string()))
        })
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        match value {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConstructError::Length {
                        expected: 1,
                        found: s.chars().count(),
                    }),
                }
            }
            Value::Null => Err(missing::<char>()),
            other => Err(mismatch::<char>(&other)),
        }
    }
}

impl Describe for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<String>(|node| String::deserialize(node).map(Value::String))
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Null => Err(missing::<String>()),
            other => Err(mismatch::<String>(&other)),
        }
    }
}

/// Arbitrary JSON. `null` is a legal value.
impl Describe for serde_json::Value {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::plain::<serde_json::Value>().into_nullable()
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Object(_) => value.into_object::<serde_json::Value>(),
            other => other.to_json().ok_or_else(|| mismatch::<serde_json::Value>(&other)),
        }
    }
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().into_nullable()
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl<T: Describe> Describe for Box<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        T::from_value(value).map(Box::new)
    }
}

fn elements<C: 'static>(value: Value) -> Result<Vec<Value>, ConstructError> {
    match value {
        Value::Sequence(items) | Value::Array(items) => Ok(items),
        Value::Null => Err(missing::<C>()),
        other => Err(mismatch::<C>(&other)),
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(T::descriptor())
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        elements::<Self>(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(T::descriptor())
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        elements::<Self>(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array::<Self>(T::descriptor(), N)
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        let items = elements::<Self>(value)?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        <[T; N]>::try_from(items).map_err(|items| ConstructError::Length {
            expected: N,
            found: items.len(),
        })
    }
}

/// A mapping key parsed from a document member name.
///
/// The key descriptor's plain deserializer receives the member name as a
/// JSON string, so the engine can reject a bad key at its own path before
/// any value is constructed.
pub trait MapKey: Sized + 'static {
    fn key_descriptor() -> TypeDescriptor;

    fn from_key(key: String) -> Result<Self, ConstructError>;
}

impl MapKey for String {
    fn key_descriptor() -> TypeDescriptor {
        String::descriptor()
    }

    fn from_key(key: String) -> Result<Self, ConstructError> {
        Ok(key)
    }
}

macro_rules! integer_key {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl MapKey for $ty {
                fn key_descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar::<$ty>(|node| {
                        let key = node
                            .as_str()
                            .ok_or_else(|| serde_json::Error::custom("map key must be a string"))?;
                        key.parse::<$ty>()
                            .map(|n| Value::$variant(n as $wide))
                            .map_err(|err| serde_json::Error::custom(format!("invalid key {key:?}: {err}")))
                    })
                }

                fn from_key(key: String) -> Result<Self, ConstructError> {
                    key.parse::<$ty>().map_err(|_| ConstructError::InvalidKey {
                        key,
                        type_name: stringify!($ty),
                    })
                }
            }
        )+
    };
}

integer_key!(Int as i64: i8, i16, i32, i64, isize);
integer_key!(UInt as u64: u8, u16, u32, u64, usize);

fn entries<M: 'static>(value: Value) -> Result<Vec<(String, Value)>, ConstructError> {
    match value {
        Value::Mapping(entries) => Ok(entries),
        Value::Null => Err(missing::<M>()),
        other => Err(mismatch::<M>(&other)),
    }
}

impl<K, V> Describe for HashMap<K, V>
where
    K: MapKey + Eq + Hash,
    V: Describe,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::mapping::<Self>(K::key_descriptor(), V::descriptor())
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        entries::<Self>(value)?
            .into_iter()
            .map(|(k, v)| -> Result<(K, V), ConstructError> {
                Ok((K::from_key(k)?, V::from_value(v)?))
            })
            .collect()
    }
}

impl<K, V> Describe for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Describe,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::mapping::<Self>(K::key_descriptor(), V::descriptor())
    }

    fn from_value(value: Value) -> Result<Self, ConstructError> {
        entries::<Self>(value)?
            .into_iter()
            .map(|(k, v)| -> Result<(K, V), ConstructError> {
                Ok((K::from_key(k)?, V::from_value(v)?))
            })
            .collect()
    }
}
