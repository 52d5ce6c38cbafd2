//! # bindcheck-core — Model Types for Validated Binding
//!
//! This crate defines everything the binding engine and its collaborators
//! share: document paths, the violation model, bound values, type
//! descriptors, the declaration traits user types implement, and the
//! validator seam. It depends on no other `bindcheck-*` crate.
//!
//! ## Key Design Principles
//!
//! 1. **Violations are data.** A [`Violation`] is an immutable record; path
//!    prefixing returns a new violation. [`Violations`] aggregates them in
//!    encounter order with set semantics on `(path, message)`.
//!
//! 2. **Types describe themselves.** [`Describe`] yields a
//!    [`TypeDescriptor`] without runtime reflection. Object and wrapper
//!    descriptors hold a [`BindableType`] handle, never their fields, so
//!    recursive types stay finite.
//!
//! 3. **Wrappers stay tagged.** A single-value wrapper travels through
//!    validation as [`Value::Wrapper`] so the wrapper's own constraints
//!    apply; it becomes the Rust wrapper type only when its owner is
//!    constructed.
//!
//! 4. **Constraints are external.** The [`Validator`] trait is the only
//!    contact point with a constraint language.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bindcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod declare;
pub mod describe;
pub mod descriptor;
pub mod error;
pub mod path;
pub mod validator;
pub mod value;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use declare::{Arguments, Bindable, Binding, FieldDeclaration, SchemaBuilder};
pub use describe::{Describe, MapKey};
pub use descriptor::{BindableType, PlainFn, TypeDescriptor, TypeKind, TypeRef};
pub use error::{BindError, ConstructError, SchemaError};
pub use path::{PathSegment, PropertyPath};
pub use validator::{NoConstraints, Validator, NOT_NULL_MESSAGE};
pub use value::{Object, Value};
pub use violation::{Violation, Violations};
