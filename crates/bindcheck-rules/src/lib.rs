//! # bindcheck-rules — Reference Constraint Validator
//!
//! A small, declarative implementation of the [`Validator`] seam. Rules
//! are registered per owning type and property:
//!
//! ```
//! use bindcheck_rules::{ConstraintValidator, NotBlank, Pattern};
//!
//! struct Node;
//!
//! let validator = ConstraintValidator::builder()
//!     .constrain::<Node>("other_not_blank", NotBlank)
//!     .constrain::<Node>("some_nullable", Pattern::new("[^ ]+").unwrap())
//!     .build();
//! # let _ = validator;
//! ```
//!
//! Properties are addressed by their declared name, not their wire name.
//! The engine never depends on this crate.
//!
//! [`Validator`]: bindcheck_core::Validator

pub mod constraint;
pub mod registry;

pub use constraint::{Constraint, Max, Min, NotBlank, NotEmpty, NotNull, Pattern, Size};
pub use registry::{ConstraintValidator, ConstraintValidatorBuilder};
