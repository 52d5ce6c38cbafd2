//! # Path Reconstruction
//!
//! Every descent into a child node (a field, a sequence index, a mapping
//! key) runs inside [`reconstruct`]. Nested levels report paths relative to
//! their own root; on the way out each level prepends the segment it
//! descended through, so a violation three levels down surfaces as one
//! flat path from the document root.
//!
//! Aggregate failures have every violation prefixed. Collaborator failures
//! that carry a path have that path prefixed too; anything else is
//! propagated unchanged.

use bindcheck_core::{BindError, PathSegment};

/// Runs `f` as the deserialization of the child at `segment`.
pub fn reconstruct<T, F>(segment: PathSegment, f: F) -> Result<T, BindError>
where
    F: FnOnce() -> Result<T, BindError>,
{
    f().map_err(|err| err.with_prefix(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindcheck_core::{ConstructError, PropertyPath, Violation, Violations};

    fn invalid_at(inner: &str) -> BindError {
        let violations: Violations = std::iter::once(
            Violation::new("must not be blank", "Foo")
                .at(PropertyPath::of(PathSegment::property(inner))),
        )
        .collect();
        BindError::Invalid(violations)
    }

    #[test]
    fn test_nested_levels_compose() {
        let result: Result<(), _> = reconstruct(PathSegment::property("list"), || {
            reconstruct(PathSegment::Index(1), || Err(invalid_at("bar")))
        });
        let err = result.unwrap_err();
        assert_eq!(err.violations().unwrap().lines(), vec!["list[1].bar: must not be blank"]);
    }

    #[test]
    fn test_success_passes_through() {
        let value = reconstruct(PathSegment::Index(0), || Ok(7)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_pathless_failure_unchanged() {
        let result: Result<(), _> = reconstruct(PathSegment::property("x"), || {
            Err(BindError::Construct {
                type_name: "Foo",
                source: ConstructError::custom("boom"),
            })
        });
        assert_eq!(result.unwrap_err().to_string(), "cannot construct Foo: boom");
    }
}
