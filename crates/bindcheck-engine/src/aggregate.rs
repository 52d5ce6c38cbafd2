//! # Aggregator & Constructor
//!
//! Collects the outcome of every field of one object. Any violation
//! anywhere fails the object with all of them; construction is never
//! attempted on partially invalid input. Otherwise the constructor runs
//! with every constructor field not supplied by default, then settable
//! properties are applied in schema order.

use bindcheck_core::{Arguments, BindError, Binding, Value, Violations};

use crate::introspect::{FieldDescriptor, Schema};

/// Outcome of deserializing and validating one field.
#[derive(Debug)]
pub struct ValidatedField<'s> {
    descriptor: &'s FieldDescriptor,
    value: Value,
    violations: Violations,
}

impl<'s> ValidatedField<'s> {
    pub(crate) fn new(descriptor: &'s FieldDescriptor, value: Value, violations: Violations) -> Self {
        Self {
            descriptor,
            value,
            violations,
        }
    }

    /// A field whose value could not be produced.
    pub(crate) fn rejected(descriptor: &'s FieldDescriptor, violations: Violations) -> Self {
        Self::new(descriptor, Value::Null, violations)
    }

    pub fn descriptor(&self) -> &'s FieldDescriptor {
        self.descriptor
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Whether the type's own default replaces this field's value.
    pub fn supplied_by_default(&self) -> bool {
        self.descriptor.is_optional() && self.value.is_null()
    }
}

/// Constructs the schema's type from validated fields, or fails with
/// every violation they carry.
pub(crate) fn resolve(schema: &Schema, fields: Vec<ValidatedField<'_>>) -> Result<Value, BindError> {
    let ty = schema.bindable_type();
    let violations: Violations = fields
        .iter()
        .flat_map(|field| field.violations.iter().cloned())
        .collect();
    if !violations.is_empty() {
        tracing::debug!(
            type_name = ty.name(),
            violations = violations.len(),
            "object rejected"
        );
        return Err(BindError::Invalid(violations));
    }

    let mut args = Arguments::new(ty.name());
    let mut properties = Vec::new();
    for field in fields {
        if field.supplied_by_default() {
            continue;
        }
        let name = field.descriptor.name();
        match field.descriptor.binding() {
            Binding::Constructor => args.insert(name, field.value),
            Binding::Setter => properties.push((name, field.value)),
        }
    }

    let construct_failed = |source| BindError::Construct {
        type_name: ty.name(),
        source,
    };
    let mut instance = ty.construct(&mut args).map_err(construct_failed)?;
    for (name, value) in properties {
        ty.apply(&mut *instance, name, value)
            .map_err(construct_failed)?;
    }
    Ok(Value::from_boxed(ty.type_ref(), instance))
}
