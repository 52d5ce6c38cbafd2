//! # Schema Introspector
//!
//! Compiles a [`Bindable`](bindcheck_core::Bindable) type's declarations
//! into an immutable [`Schema`]: the ordered list of fields to bind, each
//! with its resolved wire name, type descriptor, optionality, and, for
//! single-value wrapper fields, the wrapper's member and underlying type.
//!
//! ## Rules
//!
//! - Constructor parameters come first in declaration order, interleaved
//!   with settable properties exactly as declared.
//! - A settable property sharing a name with a constructor parameter is
//!   dropped; the constructor binding wins.
//! - The wire name is the rename override unless it is blank.
//! - Wrapper types anywhere in a field's type (directly or as container
//!   elements) are checked eagerly: exactly one constructor parameter and
//!   nothing else.
//!
//! ## Caching
//!
//! [`SchemaCache`] keys compiled schemas by `TypeId`. Compilation runs
//! outside any map lock and the first inserted schema wins, so concurrent
//! misses on the same type are harmless.

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use bindcheck_core::{
    Binding, BindableType, SchemaError, TypeDescriptor, TypeKind, TypeRef,
};
use dashmap::DashMap;

/// The wrapped member of a single-value wrapper type.
#[derive(Debug, Clone)]
pub struct WrapperInfo {
    wrapper: TypeRef,
    member: &'static str,
    underlying: TypeDescriptor,
}

impl WrapperInfo {
    pub fn wrapper(&self) -> TypeRef {
        self.wrapper
    }

    /// Declared name of the wrapper's single constructor parameter.
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// Declared type of the wrapper's single constructor parameter.
    pub fn underlying(&self) -> &TypeDescriptor {
        &self.underlying
    }
}

/// One bindable field of a compiled schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    wire_name: &'static str,
    type_descriptor: TypeDescriptor,
    optional: bool,
    binding: Binding,
    wrapper: Option<Arc<WrapperInfo>>,
}

impl FieldDescriptor {
    /// Declared name, used for constructor arguments and validator lookups.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name under which the field appears in documents.
    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn type_descriptor(&self) -> &TypeDescriptor {
        &self.type_descriptor
    }

    /// Whether an absent or null input falls back to the type's default.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// The wrapper's member, when the field's type is a single-value wrapper.
    pub fn wrapper(&self) -> Option<&WrapperInfo> {
        self.wrapper.as_deref()
    }
}

/// The compiled, immutable field table of one type.
#[derive(Debug)]
pub struct Schema {
    ty: BindableType,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn bindable_type(&self) -> &BindableType {
        &self.ty
    }

    /// Fields in binding order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The field bound under `wire_name`.
    pub fn field(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }
}

/// Shared cache of compiled schemas and wrapper members.
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: DashMap<TypeId, Arc<Schema>>,
    wrappers: DashMap<TypeId, Arc<WrapperInfo>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of compiled schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// The schema of `ty`, compiling it on first use.
    pub fn schema(&self, ty: &BindableType) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.schemas.get(&ty.id()) {
            return Ok(Arc::clone(schema.value()));
        }
        let compiled = Arc::new(self.compile(ty)?);
        tracing::debug!(
            type_name = ty.name(),
            fields = compiled.fields.len(),
            "compiled schema"
        );
        let entry = self.schemas.entry(ty.id()).or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    /// The member of the single-value wrapper `ty`.
    pub fn wrapper(&self, ty: &BindableType) -> Result<Arc<WrapperInfo>, SchemaError> {
        if let Some(info) = self.wrappers.get(&ty.id()) {
            return Ok(Arc::clone(info.value()));
        }
        let fields = ty.declare().into_fields();
        let info = match fields.as_slice() {
            [member] if member.binding() == Binding::Constructor => Arc::new(WrapperInfo {
                wrapper: ty.type_ref(),
                member: member.name(),
                underlying: member.descriptor().clone(),
            }),
            _ => {
                return Err(SchemaError::WrapperArity {
                    type_name: ty.name(),
                    found: fields.len(),
                })
            }
        };
        let entry = self.wrappers.entry(ty.id()).or_insert(info);
        Ok(Arc::clone(entry.value()))
    }

    /// The member of a wrapper already resolved by [`wrapper`](Self::wrapper).
    pub fn cached_wrapper(&self, wrapper: TypeRef) -> Option<Arc<WrapperInfo>> {
        self.wrappers
            .get(&wrapper.id())
            .map(|info| Arc::clone(info.value()))
    }

    fn compile(&self, ty: &BindableType) -> Result<Schema, SchemaError> {
        let declarations = ty.declare().into_fields();
        let constructor_names: HashSet<&str> = declarations
            .iter()
            .filter(|d| d.binding() == Binding::Constructor)
            .map(|d| d.name())
            .collect();

        let mut wire_names = HashSet::new();
        let mut fields = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let name = declaration.name();
            if name.trim().is_empty() {
                return Err(SchemaError::BlankName {
                    type_name: ty.name(),
                });
            }
            if declaration.binding() == Binding::Setter && constructor_names.contains(name) {
                continue;
            }
            let wire_name = declaration
                .rename_override()
                .filter(|rename| !rename.trim().is_empty())
                .unwrap_or(name);
            if !wire_names.insert(wire_name) {
                return Err(SchemaError::DuplicateWireName {
                    type_name: ty.name(),
                    wire_name: wire_name.to_owned(),
                });
            }

            let descriptor = declaration.descriptor();
            self.check_nested_wrappers(descriptor)?;
            let wrapper = match descriptor.kind() {
                TypeKind::Wrapper(wrapper) => Some(self.wrapper(wrapper)?),
                _ => None,
            };
            fields.push(FieldDescriptor {
                name,
                wire_name,
                type_descriptor: descriptor.clone(),
                optional: declaration.is_optional(),
                binding: declaration.binding(),
                wrapper,
            });
        }
        Ok(Schema { ty: *ty, fields })
    }

    fn check_nested_wrappers(&self, descriptor: &TypeDescriptor) -> Result<(), SchemaError> {
        for argument in descriptor.type_arguments() {
            if let TypeKind::Wrapper(wrapper) = argument.kind() {
                self.wrapper(wrapper)?;
            }
            self.check_nested_wrappers(argument)?;
        }
        Ok(())
    }
}
