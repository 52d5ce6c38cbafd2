//! # Constraint Rules
//!
//! Each rule inspects one bound [`Value`] and returns the violation
//! message when the value fails. Except for [`NotNull`], [`NotBlank`] and
//! [`NotEmpty`], rules accept `null`; nullness is the engine's concern.

use std::fmt;

use bindcheck_core::Value;
use regex::Regex;

/// A single constraint on a bound value.
pub trait Constraint: Send + Sync + fmt::Debug {
    /// The violation message, or `None` when `value` satisfies the rule.
    fn check(&self, value: &Value) -> Option<String>;
}

/// The value must not be null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotNull;

impl Constraint for NotNull {
    fn check(&self, value: &Value) -> Option<String> {
        value.is_null().then(|| "must not be null".to_owned())
    }
}

/// The value must be a string with at least one non-whitespace character.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotBlank;

impl Constraint for NotBlank {
    fn check(&self, value: &Value) -> Option<String> {
        let blank = match value {
            Value::Null => true,
            other => other.as_str().is_some_and(|s| s.trim().is_empty()),
        };
        blank.then(|| "must not be blank".to_owned())
    }
}

/// The value must not be null, an empty string, or an empty container.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEmpty;

impl Constraint for NotEmpty {
    fn check(&self, value: &Value) -> Option<String> {
        let empty = value.is_null() || value.len() == Some(0);
        empty.then(|| "must not be empty".to_owned())
    }
}

/// String values must match the regular expression in full.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`, anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl Constraint for Pattern {
    fn check(&self, value: &Value) -> Option<String> {
        let s = value.as_str()?;
        (!self.regex.is_match(s)).then(|| format!("must match \"{}\"", self.source))
    }
}

/// Character count of strings, or entry count of containers, must lie in
/// `min..=max`.
#[derive(Debug, Clone, Copy)]
pub struct Size {
    min: usize,
    max: usize,
}

impl Size {
    pub fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: usize) -> Self {
        Self::between(min, i32::MAX as usize)
    }

    pub fn at_most(max: usize) -> Self {
        Self::between(0, max)
    }
}

impl Constraint for Size {
    fn check(&self, value: &Value) -> Option<String> {
        let len = value.len()?;
        (len < self.min || len > self.max)
            .then(|| format!("size must be between {} and {}", self.min, self.max))
    }
}

/// Numeric values must be at least the bound.
#[derive(Debug, Clone, Copy)]
pub struct Min(pub i64);

impl Constraint for Min {
    fn check(&self, value: &Value) -> Option<String> {
        let below = match value {
            Value::Int(i) => *i < self.0,
            Value::UInt(u) => i64::try_from(*u).is_ok_and(|u| u < self.0),
            other => other.as_f64()? < self.0 as f64,
        };
        below.then(|| format!("must be greater than or equal to {}", self.0))
    }
}

/// Numeric values must be at most the bound.
#[derive(Debug, Clone, Copy)]
pub struct Max(pub i64);

impl Constraint for Max {
    fn check(&self, value: &Value) -> Option<String> {
        let above = match value {
            Value::Int(i) => *i > self.0,
            Value::UInt(u) => i64::try_from(*u).map_or(true, |u| u > self.0),
            other => other.as_f64()? > self.0 as f64,
        };
        above.then(|| format!("must be less than or equal to {}", self.0))
    }
}
