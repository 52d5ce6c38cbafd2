//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default limit on nested object depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunables for one [`Engine`](crate::Engine).
///
/// Missing keys take their defaults when deserialized, so hosts can embed
/// this in their own configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Fail on object members that match no field's wire name.
    pub deny_unknown_properties: bool,
    /// Maximum nesting of engine-bound objects in one document.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            deny_unknown_properties: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
