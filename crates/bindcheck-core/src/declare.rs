//! # Schema Declarations
//!
//! A target type opts into binding by implementing [`Bindable`]. It lists
//! its fields on a [`SchemaBuilder`] and builds itself from the named
//! [`Arguments`] the engine collects.
//!
//! ## Fields
//!
//! - **Constructor parameters** ([`SchemaBuilder::param`]) are passed to
//!   [`Bindable::construct`]. A parameter marked [`optional`] is omitted
//!   from the arguments when its input is absent or null, so the type's own
//!   default applies.
//! - **Settable properties** ([`SchemaBuilder::property`]) are assigned
//!   through [`Bindable::set_property`] after construction. They are
//!   optional unless marked [`required`].
//!
//! [`rename`] sets the wire name under which a field appears in documents.
//!
//! [`optional`]: FieldDeclaration::optional
//! [`required`]: FieldDeclaration::required
//! [`rename`]: FieldDeclaration::rename
//!
//! ## Example
//!
//! ```
//! use bindcheck_core::{describe, Arguments, Bindable, ConstructError, SchemaBuilder};
//!
//! struct Node {
//!     other_not_blank: String,
//!     some_nullable: Option<String>,
//!     child: Option<Box<Node>>,
//! }
//!
//! impl Bindable for Node {
//!     fn declare(schema: &mut SchemaBuilder) {
//!         schema.param::<String>("other_not_blank").rename("otherNotBlank");
//!         schema.param::<Option<String>>("some_nullable").rename("someNullable");
//!         schema.param::<Option<Box<Node>>>("child");
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
//!         Ok(Self {
//!             other_not_blank: args.take("other_not_blank")?,
//!             some_nullable: args.take("some_nullable")?,
//!             child: args.take("child")?,
//!         })
//!     }
//! }
//!
//! describe!(object Node);
//! ```

use std::collections::HashMap;

use crate::describe::Describe;
use crate::descriptor::{TypeDescriptor, TypeRef};
use crate::error::ConstructError;
use crate::value::Value;

/// A type the engine binds field by field.
pub trait Bindable: Sized + 'static {
    /// Declares the type's fields in binding order.
    fn declare(schema: &mut SchemaBuilder);

    /// Builds a value from the validated constructor arguments.
    fn construct(args: &mut Arguments) -> Result<Self, ConstructError>;

    /// Assigns a settable property after construction.
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ConstructError> {
        let _ = value;
        Err(ConstructError::UnknownProperty {
            name: name.to_owned(),
        })
    }
}

/// How a field's value reaches the constructed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Passed to [`Bindable::construct`].
    Constructor,
    /// Assigned through [`Bindable::set_property`].
    Setter,
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    name: &'static str,
    rename: Option<&'static str>,
    descriptor: TypeDescriptor,
    optional: bool,
    binding: Binding,
}

impl FieldDeclaration {
    /// Overrides the wire name. A blank override is ignored.
    pub fn rename(&mut self, wire_name: &'static str) -> &mut Self {
        self.rename = Some(wire_name);
        self
    }

    /// Marks the field as having a default used when input is absent.
    pub fn optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }

    /// Marks the field as required.
    pub fn required(&mut self) -> &mut Self {
        self.optional = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rename_override(&self) -> Option<&'static str> {
        self.rename
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }
}

/// Collects a type's field declarations.
#[derive(Debug)]
pub struct SchemaBuilder {
    owner: TypeRef,
    fields: Vec<FieldDeclaration>,
}

impl SchemaBuilder {
    /// An empty builder for `owner`.
    pub fn new(owner: TypeRef) -> Self {
        Self {
            owner,
            fields: Vec::new(),
        }
    }

    /// Declares a constructor parameter of type `T`.
    pub fn param<T: Describe>(&mut self, name: &'static str) -> &mut FieldDeclaration {
        self.push(name, T::descriptor(), false, Binding::Constructor)
    }

    /// Declares a settable property of type `T`, optional by default.
    pub fn property<T: Describe>(&mut self, name: &'static str) -> &mut FieldDeclaration {
        self.push(name, T::descriptor(), true, Binding::Setter)
    }

    fn push(
        &mut self,
        name: &'static str,
        descriptor: TypeDescriptor,
        optional: bool,
        binding: Binding,
    ) -> &mut FieldDeclaration {
        let index = self.fields.len();
        self.fields.push(FieldDeclaration {
            name,
            rename: None,
            descriptor,
            optional,
            binding,
        });
        &mut self.fields[index]
    }

    /// The declaring type.
    pub fn owner(&self) -> TypeRef {
        self.owner
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldDeclaration> {
        self.fields
    }
}

/// Named constructor arguments.
///
/// Optional parameters whose input was absent are not present at all;
/// [`take_or`](Self::take_or) and friends supply the type's default.
#[derive(Debug)]
pub struct Arguments {
    type_name: &'static str,
    values: HashMap<&'static str, Value>,
}

impl Arguments {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            values: HashMap::new(),
        }
    }

    /// Name of the type being constructed.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    /// Whether an argument was supplied for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes and converts the argument `name`.
    ///
    /// An absent argument converts from [`Value::Null`], so `Option`
    /// parameters read as `None`; other types fail with
    /// [`ConstructError::Missing`].
    pub fn take<T: Describe>(&mut self, name: &str) -> Result<T, ConstructError> {
        match self.values.remove(name) {
            Some(value) => T::from_value(value),
            None => T::from_value(Value::Null).map_err(|_| ConstructError::Missing {
                name: name.to_owned(),
            }),
        }
    }

    /// Like [`take`](Self::take), with `default` for an absent argument.
    pub fn take_or<T: Describe>(&mut self, name: &str, default: T) -> Result<T, ConstructError> {
        self.take_or_else(name, || default)
    }

    /// Like [`take`](Self::take), computing the default lazily.
    pub fn take_or_else<T, F>(&mut self, name: &str, default: F) -> Result<T, ConstructError>
    where
        T: Describe,
        F: FnOnce() -> T,
    {
        match self.values.remove(name) {
            Some(value) => T::from_value(value),
            None => Ok(default()),
        }
    }

    /// Like [`take`](Self::take), with `T::default()` for an absent argument.
    pub fn take_or_default<T: Describe + Default>(&mut self, name: &str) -> Result<T, ConstructError> {
        self.take_or_else(name, T::default)
    }
}
