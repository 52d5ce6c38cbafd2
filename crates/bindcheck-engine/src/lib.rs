//! # bindcheck-engine — Constraint-Validating Tree Deserialization
//!
//! Binds a JSON document tree to a declared Rust type one field at a time,
//! validates every bound value, and constructs the target only when no
//! field has a violation. A failed document yields a single
//! [`BindError::Invalid`] listing every violation with a path relative to
//! the document root, however deeply it was found.
//!
//! ## Pipeline
//!
//! ```text
//! document ──► Field Binder ──► Per-Field Deserializer ──► Field Validator ──► Aggregator
//!   (json)      (bind.rs)        (deserialize.rs,           (validate.rs)       (aggregate.rs)
//!                                 generic.rs)                                      │
//!                                     ▲                                            ▼
//!                                     └──── Path Reconstruction (reconstruct.rs) ◄─ value | violations
//! ```
//!
//! Schemas are compiled once per type by the introspector
//! ([`introspect`]) and cached for the lifetime of the [`Engine`].
//!
//! ## Example
//!
//! ```
//! use bindcheck_engine::{describe, Arguments, Bindable, ConstructError, Engine, SchemaBuilder};
//! use bindcheck_rules::{ConstraintValidator, NotBlank};
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Foo {
//!     bar: String,
//! }
//!
//! impl Bindable for Foo {
//!     fn declare(schema: &mut SchemaBuilder) {
//!         schema.param::<String>("bar");
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
//!         Ok(Self { bar: args.take("bar")? })
//!     }
//! }
//!
//! describe!(object Foo);
//!
//! let engine = Engine::new(
//!     ConstraintValidator::builder().constrain::<Foo>("bar", NotBlank).build(),
//! );
//! let err = engine
//!     .deserialize::<Vec<Foo>>(&json!([{"bar": "ok"}, {"bar": " "}, null]))
//!     .unwrap_err();
//! assert_eq!(
//!     err.violations().unwrap().lines(),
//!     vec!["[1].bar: must not be blank", "[2]: must not be null"],
//! );
//! ```
//!
//! ## Crate Policy
//!
//! - Synchronous and allocation-only: no I/O besides the optional
//!   `from_reader` parse.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Logs through `tracing`; installing a subscriber is the host's job.

pub mod aggregate;
pub mod bind;
mod deserialize;
pub mod engine;
mod generic;
pub mod introspect;
pub mod options;
mod reconstruct;
mod validate;

pub use aggregate::ValidatedField;
pub use bind::BoundField;
pub use engine::Engine;
pub use introspect::{FieldDescriptor, Schema, SchemaCache, WrapperInfo};
pub use options::Options;
pub use reconstruct::reconstruct;

// Re-export the model so hosts depend on one crate.
pub use bindcheck_core::{
    describe, Arguments, BindError, Bindable, BindableType, Binding, ConstructError, Describe,
    MapKey, NoConstraints, PathSegment, PropertyPath, SchemaBuilder, SchemaError, TypeDescriptor,
    TypeKind, TypeRef, Validator, Value, Violation, Violations,
};
