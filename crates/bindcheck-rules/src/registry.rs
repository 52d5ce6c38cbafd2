//! # Constraint Registry
//!
//! [`ConstraintValidator`] holds the constraints declared for each
//! `(owning type, property)` pair and implements the engine's
//! [`Validator`] seam. Constraints on a single-value wrapper are declared
//! on the wrapper type's member.

use std::any::TypeId;
use std::collections::HashMap;

use bindcheck_core::{TypeRef, Validator, Value, Violation, Violations};

use crate::constraint::Constraint;

type PropertyRules = HashMap<&'static str, Vec<Box<dyn Constraint>>>;

/// A [`Validator`] backed by per-property constraint lists.
#[derive(Debug, Default)]
pub struct ConstraintValidator {
    rules: HashMap<TypeId, PropertyRules>,
}

impl ConstraintValidator {
    pub fn builder() -> ConstraintValidatorBuilder {
        ConstraintValidatorBuilder::default()
    }

    fn check(&self, owner: TypeRef, property: &str, value: &Value) -> Violations {
        let Some(constraints) = self
            .rules
            .get(&owner.id())
            .and_then(|properties| properties.get(property))
        else {
            return Violations::new();
        };
        constraints
            .iter()
            .filter_map(|constraint| constraint.check(value))
            .map(|message| {
                tracing::trace!(owner = owner.name(), property, %message, "constraint failed");
                Violation::new(message, owner.name()).with_invalid_value(value.to_json())
            })
            .collect()
    }
}

impl Validator for ConstraintValidator {
    fn validate_property(&self, owner: TypeRef, property: &str, value: &Value) -> Violations {
        self.check(owner, property, value)
    }

    fn validate_wrapper(&self, wrapper: TypeRef, member: &str, value: &Value) -> Violations {
        self.check(wrapper, member, value)
    }
}

/// Collects constraints for a [`ConstraintValidator`].
#[derive(Debug, Default)]
pub struct ConstraintValidatorBuilder {
    rules: HashMap<TypeId, PropertyRules>,
}

impl ConstraintValidatorBuilder {
    /// Adds `constraint` to `property` of `T`. Constraints on one property
    /// are checked in registration order.
    pub fn constrain<T: 'static>(
        mut self,
        property: &'static str,
        constraint: impl Constraint + 'static,
    ) -> Self {
        self.rules
            .entry(TypeId::of::<T>())
            .or_default()
            .entry(property)
            .or_default()
            .push(Box::new(constraint));
        self
    }

    pub fn build(self) -> ConstraintValidator {
        ConstraintValidator { rules: self.rules }
    }
}
