//! # Error Types
//!
//! Three layers, all `thiserror` enums:
//!
//! - [`BindError`] crosses the engine's public boundary. Invalid input is
//!   always [`BindError::Invalid`], carrying every violation found in one
//!   pass. The other variants are collaborator failures (malformed
//!   document, type mismatch, serde rejection) and configuration failures.
//! - [`SchemaError`] is a configuration failure detected when a type's
//!   schema is introspected. It never depends on document contents.
//! - [`ConstructError`] is raised while turning bound values back into
//!   Rust values, including by user constructors.
//!
//! Collaborator failures carry the document path at which they occurred.
//! [`BindError::with_prefix`] extends that path exactly as it extends
//! violation paths, so a failure three levels deep reports its full path.

use thiserror::Error;

use crate::path::{PathSegment, PropertyPath};
use crate::violation::Violations;

/// Failure of one deserialize-and-validate call.
#[derive(Error, Debug)]
pub enum BindError {
    /// The document violated one or more constraints.
    #[error("{0}")]
    Invalid(Violations),

    /// The input bytes are not a well-formed document.
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The plain-type deserializer rejected a node.
    #[error("cannot deserialize {type_name} at {path}: {source}")]
    Deserialize {
        path: PropertyPath,
        type_name: &'static str,
        source: serde_json::Error,
    },

    /// A node has the wrong shape for the declared type.
    #[error("expected {expected} at {path}, found {found}")]
    Mismatch {
        path: PropertyPath,
        expected: &'static str,
        found: &'static str,
    },

    /// A fixed-size array node has the wrong number of elements.
    #[error("expected {expected} elements at {path}, found {found}")]
    Length {
        path: PropertyPath,
        expected: usize,
        found: usize,
    },

    /// An object member matches no field and unknown members are denied.
    #[error("unknown property {path} for {type_name}")]
    UnknownProperty {
        path: PropertyPath,
        type_name: &'static str,
    },

    /// Object nesting exceeded the configured limit.
    #[error("nesting deeper than {limit} at {path}")]
    DepthExceeded { path: PropertyPath, limit: usize },

    /// The target type's schema is unusable.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The target type's constructor or property setter failed.
    #[error("cannot construct {type_name}: {source}")]
    Construct {
        type_name: &'static str,
        source: ConstructError,
    },
}

impl BindError {
    /// Prepends `segment` to every path this error carries.
    ///
    /// Errors without a document path are returned unchanged.
    pub fn with_prefix(self, segment: PathSegment) -> Self {
        match self {
            Self::Invalid(violations) => Self::Invalid(violations.with_prefix(&segment)),
            Self::Deserialize {
                path,
                type_name,
                source,
            } => Self::Deserialize {
                path: path.with_prefix(segment),
                type_name,
                source,
            },
            Self::Mismatch {
                path,
                expected,
                found,
            } => Self::Mismatch {
                path: path.with_prefix(segment),
                expected,
                found,
            },
            Self::Length {
                path,
                expected,
                found,
            } => Self::Length {
                path: path.with_prefix(segment),
                expected,
                found,
            },
            Self::UnknownProperty { path, type_name } => Self::UnknownProperty {
                path: path.with_prefix(segment),
                type_name,
            },
            Self::DepthExceeded { path, limit } => Self::DepthExceeded {
                path: path.with_prefix(segment),
                limit,
            },
            other => other,
        }
    }

    /// The violations, if this is a constraint failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            _ => None,
        }
    }

    /// Consumes self and returns the violations of a constraint failure.
    pub fn into_violations(self) -> Option<Violations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            _ => None,
        }
    }

    /// The document path of a collaborator failure.
    pub fn path(&self) -> Option<&PropertyPath> {
        match self {
            Self::Deserialize { path, .. }
            | Self::Mismatch { path, .. }
            | Self::Length { path, .. }
            | Self::UnknownProperty { path, .. }
            | Self::DepthExceeded { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// A type's declared schema cannot be bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A single-value wrapper must declare exactly one constructor
    /// parameter and no settable properties.
    #[error("wrapper type {type_name} must declare exactly one constructor parameter and nothing else, found {found} fields")]
    WrapperArity { type_name: &'static str, found: usize },

    /// Two fields resolve to the same wire name.
    #[error("duplicate wire name {wire_name:?} in {type_name}")]
    DuplicateWireName {
        type_name: &'static str,
        wire_name: String,
    },

    /// A field was declared with an empty name.
    #[error("blank field name in {type_name}")]
    BlankName { type_name: &'static str },
}

/// Conversion of a bound value into a Rust value failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// A required argument was not supplied.
    #[error("missing value for {name}")]
    Missing { name: String },

    /// The bound value has a different shape than the target type.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An integer does not fit the target width.
    #[error("value out of range for {type_name}")]
    OutOfRange { type_name: &'static str },

    /// A fixed-size array received the wrong number of elements.
    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },

    /// A mapping key cannot be parsed as the key type.
    #[error("invalid key {key:?} for {type_name}")]
    InvalidKey { key: String, type_name: &'static str },

    /// `set_property` was called with a name the type does not accept.
    #[error("unknown property {name}")]
    UnknownProperty { name: String },

    /// A user constructor rejected its arguments.
    #[error("{0}")]
    Custom(String),
}

impl ConstructError {
    /// A constructor-defined failure.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
