//! # Engine
//!
//! The public entry point: deserialize a document into any [`Describe`]
//! type, or fail with every violation found in one pass.
//!
//! An `Engine` owns its validator, its options and its schema cache. It is
//! `Send + Sync` and is meant to be built once and shared.

use std::io::Read;
use std::sync::Arc;

use bindcheck_core::{
    BindError, Bindable, BindableType, Describe, NoConstraints, PropertyPath, SchemaError,
    TypeRef, Validator, Value, Violations,
};
use serde_json::Value as Json;

use crate::deserialize::deserialize_node;
use crate::introspect::{Schema, SchemaCache};
use crate::options::Options;
use crate::validate::{check_wrapper, scan};

/// Per-call state threaded through recursive descent.
#[derive(Clone, Copy)]
pub(crate) struct Context<'a> {
    pub validator: &'a dyn Validator,
    pub schemas: &'a SchemaCache,
    pub options: &'a Options,
    /// The type owning the fields currently being bound.
    pub owner: TypeRef,
    /// Number of enclosing engine-bound objects.
    pub depth: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn nested(&self, owner: TypeRef, depth: usize) -> Self {
        Self {
            owner,
            depth,
            ..*self
        }
    }
}

/// Deserializes documents into validated Rust values.
#[derive(Debug)]
pub struct Engine<V = NoConstraints> {
    validator: V,
    options: Options,
    schemas: SchemaCache,
}

impl Default for Engine<NoConstraints> {
    fn default() -> Self {
        Self::new(NoConstraints)
    }
}

impl<V: Validator> Engine<V> {
    /// An engine with default [`Options`].
    pub fn new(validator: V) -> Self {
        Self::with_options(validator, Options::default())
    }

    pub fn with_options(validator: V, options: Options) -> Self {
        Self {
            validator,
            options,
            schemas: SchemaCache::new(),
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The compiled schema of `T`.
    pub fn describe<T: Bindable>(&self) -> Result<Arc<Schema>, SchemaError> {
        self.schemas.schema(&BindableType::of::<T>())
    }

    /// Number of schemas compiled so far.
    pub fn cached_schemas(&self) -> usize {
        self.schemas.len()
    }

    /// Deserializes and validates `document` as `T`.
    ///
    /// Fails with [`BindError::Invalid`] listing every violation when the
    /// document does not satisfy the declared constraints.
    pub fn deserialize<T: Describe>(&self, document: &Json) -> Result<T, BindError> {
        let ty = T::descriptor();
        let owner = TypeRef::of::<T>();
        let cx = Context {
            validator: &self.validator,
            schemas: &self.schemas,
            options: &self.options,
            owner,
            depth: 0,
        };

        let value = match deserialize_node(&cx, &ty, document) {
            Err(BindError::Invalid(violations)) => return Err(self.reject(ty.name(), violations)),
            other => other?,
        };

        let root = PropertyPath::root();
        let mut violations = match &value {
            Value::Wrapper {
                wrapper,
                member,
                underlying,
            } => check_wrapper(&cx, *wrapper, member, underlying, &root),
            _ => scan(&cx, &ty, &value, &root),
        };
        if violations.is_empty() && value.is_null() && !ty.is_nullable() {
            violations.push(self.validator.not_null(owner, root));
        }
        if !violations.is_empty() {
            return Err(self.reject(ty.name(), violations));
        }

        T::from_value(value).map_err(|source| BindError::Construct {
            type_name: ty.name(),
            source,
        })
    }

    /// Parses `input` and deserializes it as `T`.
    pub fn from_str<T: Describe>(&self, input: &str) -> Result<T, BindError> {
        let document: Json = serde_json::from_str(input)?;
        self.deserialize(&document)
    }

    /// Parses `input` and deserializes it as `T`.
    pub fn from_slice<T: Describe>(&self, input: &[u8]) -> Result<T, BindError> {
        let document: Json = serde_json::from_slice(input)?;
        self.deserialize(&document)
    }

    /// Reads a document from `reader` and deserializes it as `T`.
    pub fn from_reader<T: Describe, R: Read>(&self, reader: R) -> Result<T, BindError> {
        let document: Json = serde_json::from_reader(reader)?;
        self.deserialize(&document)
    }

    fn reject(&self, type_name: &'static str, violations: Violations) -> BindError {
        tracing::debug!(type_name, violations = violations.len(), "document rejected");
        BindError::Invalid(violations)
    }
}
