//! # Type Descriptors
//!
//! A [`TypeDescriptor`] is the runtime description of a field's declared
//! type: its erased kind, ordered type arguments, and nullability. The
//! engine dispatches on it; it never inspects Rust types directly.
//!
//! Descriptors are produced by [`Describe::descriptor`](crate::Describe)
//! and are plain data (function pointers, static names, vectors), so they
//! are `Send + Sync` and freely cloned into cached schemas.
//!
//! Object and wrapper descriptors refer to their target through a
//! [`BindableType`] handle instead of embedding the target's fields. That
//! keeps recursive types (a node with an optional child node) finite: the
//! engine resolves handles lazily through its schema cache.

use std::any::{Any, TypeId};
use std::fmt;

use crate::declare::{Arguments, Bindable, SchemaBuilder};
use crate::error::ConstructError;
use crate::value::Value;

/// The plain-type deserializer for one scalar or serde-deserializable type.
pub type PlainFn = fn(&serde_json::Value) -> Result<Value, serde_json::Error>;

type DeclareFn = fn(&mut SchemaBuilder);
type ConstructFn = fn(&mut Arguments) -> Result<Box<dyn Any>, ConstructError>;
type ApplyFn = fn(&mut dyn Any, &str, Value) -> Result<(), ConstructError>;

/// Identity of a Rust type: its `TypeId` plus a printable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    /// The identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased handle to a [`Bindable`] type.
///
/// Carries the monomorphized declaration, construction and property
/// assignment functions so that cached schemas can build values of the
/// type without knowing it statically.
#[derive(Clone, Copy)]
pub struct BindableType {
    ty: TypeRef,
    declare: DeclareFn,
    construct: ConstructFn,
    apply: ApplyFn,
}

impl BindableType {
    /// The handle for `T`.
    pub fn of<T: Bindable>() -> Self {
        Self {
            ty: TypeRef::of::<T>(),
            declare: T::declare,
            construct: construct_erased::<T>,
            apply: apply_erased::<T>,
        }
    }

    /// Identity of the bound type.
    pub fn type_ref(&self) -> TypeRef {
        self.ty
    }

    /// The `TypeId` of the bound type.
    pub fn id(&self) -> TypeId {
        self.ty.id()
    }

    /// The name of the bound type.
    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    /// Runs the type's field declarations.
    pub fn declare(&self) -> SchemaBuilder {
        let mut builder = SchemaBuilder::new(self.ty);
        (self.declare)(&mut builder);
        builder
    }

    /// Invokes the type's constructor with the named arguments.
    pub fn construct(&self, args: &mut Arguments) -> Result<Box<dyn Any>, ConstructError> {
        (self.construct)(args)
    }

    /// Assigns a settable property on a value previously built by
    /// [`construct`](Self::construct).
    pub fn apply(
        &self,
        target: &mut dyn Any,
        property: &str,
        value: Value,
    ) -> Result<(), ConstructError> {
        (self.apply)(target, property, value)
    }
}

impl fmt::Debug for BindableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BindableType").field(&self.ty.name()).finish()
    }
}

fn construct_erased<T: Bindable>(args: &mut Arguments) -> Result<Box<dyn Any>, ConstructError> {
    T::construct(args).map(|value| Box::new(value) as Box<dyn Any>)
}

fn apply_erased<T: Bindable>(
    target: &mut dyn Any,
    property: &str,
    value: Value,
) -> Result<(), ConstructError> {
    match target.downcast_mut::<T>() {
        Some(target) => target.set_property(property, value),
        None => Err(ConstructError::Mismatch {
            expected: std::any::type_name::<T>(),
            found: "a value of another type",
        }),
    }
}

/// The erased kind of a declared type.
#[derive(Debug, Clone, Copy)]
pub enum TypeKind {
    /// A scalar or opaque type handled by the plain-type deserializer.
    Plain(PlainFn),
    /// A type bound field-by-field by the engine.
    Object(BindableType),
    /// A growable sequence; one type argument (the element).
    Sequence,
    /// A string-keyed mapping; two type arguments (key, value).
    Mapping,
    /// A fixed-size array of the given length; one type argument.
    Array(usize),
    /// A single-value wrapper around its one constructor parameter.
    Wrapper(BindableType),
}

/// Runtime description of a declared type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
    type_arguments: Vec<TypeDescriptor>,
    nullable: bool,
}

impl TypeDescriptor {
    /// A scalar whose plain deserializer produces a primitive [`Value`].
    pub fn scalar<T: ?Sized + 'static>(deserialize: PlainFn) -> Self {
        Self::leaf(std::any::type_name::<T>(), TypeKind::Plain(deserialize))
    }

    /// An opaque type deserialized by serde and carried as [`Value::Object`].
    pub fn plain<T>() -> Self
    where
        T: serde::de::DeserializeOwned + 'static,
    {
        Self::leaf(std::any::type_name::<T>(), TypeKind::Plain(deserialize_plain::<T>))
    }

    /// A type bound by the engine through its [`Bindable`] declaration.
    pub fn object<T: Bindable>() -> Self {
        Self::leaf(std::any::type_name::<T>(), TypeKind::Object(BindableType::of::<T>()))
    }

    /// A single-value wrapper type. The wrapper must declare exactly one
    /// constructor parameter; this is checked when a schema using it is
    /// introspected.
    pub fn wrapper<T: Bindable>() -> Self {
        Self::leaf(std::any::type_name::<T>(), TypeKind::Wrapper(BindableType::of::<T>()))
    }

    /// A sequence type `S` of `element`s.
    pub fn sequence<S: ?Sized + 'static>(element: TypeDescriptor) -> Self {
        Self {
            name: std::any::type_name::<S>(),
            kind: TypeKind::Sequence,
            type_arguments: vec![element],
            nullable: false,
        }
    }

    /// A fixed-size array type `A` of `len` `element`s.
    pub fn array<A: ?Sized + 'static>(element: TypeDescriptor, len: usize) -> Self {
        Self {
            name: std::any::type_name::<A>(),
            kind: TypeKind::Array(len),
            type_arguments: vec![element],
            nullable: false,
        }
    }

    /// A mapping type `M` from `key` to `value`.
    pub fn mapping<M: ?Sized + 'static>(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self {
            name: std::any::type_name::<M>(),
            kind: TypeKind::Mapping,
            type_arguments: vec![key, value],
            nullable: false,
        }
    }

    fn leaf(name: &'static str, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            type_arguments: Vec::new(),
            nullable: false,
        }
    }

    /// This descriptor, marked nullable.
    pub fn into_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The declared type's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The erased kind.
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Ordered type arguments; empty for non-generic types.
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        &self.type_arguments
    }

    /// Whether `null` is a legal value of this type.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the type carries type arguments.
    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    /// The element type of a container: the single argument of sequences
    /// and arrays, the value argument of mappings.
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self.kind {
            TypeKind::Sequence | TypeKind::Array(_) => self.type_arguments.first(),
            TypeKind::Mapping => self.type_arguments.get(1),
            _ => None,
        }
    }

    /// The key type of a mapping.
    pub fn key_type(&self) -> Option<&TypeDescriptor> {
        match self.kind {
            TypeKind::Mapping => self.type_arguments.first(),
            _ => None,
        }
    }

    /// Whether this is a container whose elements must not be null.
    pub fn is_non_nullable_container(&self) -> bool {
        self.element_type().is_some_and(|element| !element.is_nullable())
    }
}

fn deserialize_plain<T>(node: &serde_json::Value) -> Result<Value, serde_json::Error>
where
    T: serde::de::DeserializeOwned + 'static,
{
    T::deserialize(node).map(Value::object)
}
