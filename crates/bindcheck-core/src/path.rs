//! # Document Paths
//!
//! A [`PropertyPath`] locates a value inside a document tree relative to
//! the root of one deserialization call. Paths are built from the inside
//! out: a nested call reports violations relative to its own root, and
//! every enclosing level prepends the segment under which it descended.
//!
//! ## Rendering
//!
//! Property names are joined with dots; index and key segments render as
//! `[k]` directly abutting the preceding segment:
//!
//! ```text
//! nested.child.otherNotBlank
//! list[0].bar
//! strings[0][1]
//! ```
//!
//! The empty path renders as `(root)`.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A field addressed by its wire name.
    Property(String),
    /// A position inside a sequence or fixed-size array.
    Index(usize),
    /// A key inside a mapping.
    Key(String),
}

impl PathSegment {
    /// Segment for a field wire name.
    pub fn property(name: impl Into<String>) -> Self {
        Self::Property(name.into())
    }

    /// Segment for a mapping key.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Whether this segment renders in brackets.
    pub fn is_bracketed(&self) -> bool {
        matches!(self, Self::Index(_) | Self::Key(_))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "[{key}]"),
        }
    }
}

/// An ordered sequence of [`PathSegment`]s, outermost first.
///
/// Paths are immutable values: [`with_prefix`](Self::with_prefix) and
/// [`child`](Self::child) return new paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyPath(Vec<PathSegment>);

impl PropertyPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A single-segment path.
    pub fn of(segment: PathSegment) -> Self {
        Self(vec![segment])
    }

    /// Returns the segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment);
        Self(segments)
    }

    /// A new path with `segment` prepended.
    pub fn with_prefix(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.push(segment);
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    /// A new path with all of `parent`'s segments prepended.
    pub fn with_parent(&self, parent: &PropertyPath) -> Self {
        let mut segments = Vec::with_capacity(parent.0.len() + self.0.len());
        segments.extend(parent.0.iter().cloned());
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }
}

impl From<Vec<PathSegment>> for PropertyPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for PropertyPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && !segment.is_bracketed() {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
