//! # Constraint Violations
//!
//! A [`Violation`] records one constraint failure: the message, the
//! document path at which it occurred, the type that owns the violated
//! property, and the offending value when it has a JSON rendering.
//!
//! [`Violations`] is the aggregate raised for one failed deserialization.
//! It preserves encounter order and has set semantics on
//! `(path, message)`: pushing a violation that is already present is a
//! no-op. Membership is hashed, so pushing stays constant time however
//! many violations a document produces.
//!
//! ## Diagnostics
//!
//! ```text
//! 3 constraint violations
//!  - nested.someNullable: must match "[^ ]+"
//!  - nested.child.child.otherNotBlank: must not be blank
//!  - nested.child.child.someNullable: must match "[^ ]+"
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;
use serde::{Serialize, Serializer};

use crate::path::{PathSegment, PropertyPath};

/// A single constraint failure.
///
/// Violations are immutable; the path-editing methods return new values.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    message: String,
    path: PropertyPath,
    root_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_value: Option<serde_json::Value>,
}

impl Violation {
    /// A violation at the root path.
    pub fn new(message: impl Into<String>, root_type: &'static str) -> Self {
        Self {
            message: message.into(),
            path: PropertyPath::root(),
            root_type,
            invalid_value: None,
        }
    }

    /// Places the violation at `path`.
    pub fn at(mut self, path: PropertyPath) -> Self {
        self.path = path;
        self
    }

    /// Records the offending value.
    pub fn with_invalid_value(mut self, value: Option<serde_json::Value>) -> Self {
        self.invalid_value = value;
        self
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Path of the violating value relative to the document root.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Name of the type that owns the violated property.
    pub fn root_type(&self) -> &'static str {
        self.root_type
    }

    /// The offending value, if it has a JSON rendering.
    pub fn invalid_value(&self) -> Option<&serde_json::Value> {
        self.invalid_value.as_ref()
    }

    /// A copy of this violation with `segment` prepended to its path.
    pub fn with_prefix(&self, segment: PathSegment) -> Self {
        Self {
            path: self.path.with_prefix(segment),
            ..self.clone()
        }
    }

    /// A copy of this violation with `parent` prepended to its path.
    pub fn with_parent(&self, parent: &PropertyPath) -> Self {
        Self {
            path: self.path.with_parent(parent),
            ..self.clone()
        }
    }
}

impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.message == other.message
    }
}

impl Eq for Violation {}

impl Hash for Violation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.message.hash(state);
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The aggregate of every violation found for one document.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: IndexSet<Violation>,
}

impl Violations {
    /// An empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `violation` unless an equal one is already present.
    pub fn push(&mut self, violation: Violation) {
        self.violations.insert(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violation at `index` in encounter order.
    pub fn get(&self, index: usize) -> Option<&Violation> {
        self.violations.get_index(index)
    }

    /// Iterates the violations in encounter order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Consumes self and returns the violations in encounter order.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations.into_iter().collect()
    }

    /// Every violation with `segment` prepended to its path.
    pub fn with_prefix(&self, segment: &PathSegment) -> Self {
        self.iter().map(|v| v.with_prefix(segment.clone())).collect()
    }

    /// Every violation with `parent` prepended to its path.
    pub fn with_parent(&self, parent: &PropertyPath) -> Self {
        self.iter().map(|v| v.with_parent(parent)).collect()
    }

    /// One `"<path>: <message>"` line per violation.
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(Violation::to_string).collect()
    }
}

/// Equal when both hold the same violations in the same order.
impl PartialEq for Violations {
    fn eq(&self, other: &Self) -> bool {
        self.violations.iter().eq(other.violations.iter())
    }
}

impl Eq for Violations {}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.violations)
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut violations = Self::new();
        violations.extend(iter);
        violations
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = indexmap::set::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = indexmap::set::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} constraint violations", self.violations.len())?;
        for v in &self.violations {
            write!(f, "\n - {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}
