use std::collections::HashSet;

use crate::domain::{
    behaviors::{BehaviorConfig, BehaviorRegistry, validate},
    entities::common::RelativePath,
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entry points the application layer calls before doing any work.
pub struct DomainValidator;

impl DomainValidator {
    /// Fails with every violation when the behavior list is invalid.
    pub fn validate_behaviors(
        registry: &BehaviorRegistry,
        configs: &[BehaviorConfig],
    ) -> Result<(), DomainError> {
        validate(registry, configs).into_result()
    }

    /// Output roots must be relative, inside the working directory, and
    /// listed at most once.
    pub fn validate_output_roots<S: AsRef<str>>(
        roots: &[S],
    ) -> Result<Vec<RelativePath>, DomainError> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(roots.len());
        for root in roots {
            let path = RelativePath::try_new(root.as_ref())?;
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_deduplicated_in_order() {
        let roots =
            DomainValidator::validate_output_roots(&["src/generated", "lib/gen", "src/generated"])
                .unwrap();
        let rendered: Vec<String> = roots.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["src/generated", "lib/gen"]);
    }

    #[test]
    fn absolute_root_is_rejected() {
        assert!(DomainValidator::validate_output_roots(&["/tmp/out"]).is_err());
    }

    #[test]
    fn invalid_behaviors_fail() {
        let configs: Vec<BehaviorConfig> = vec!["bogus".into()];
        assert!(DomainValidator::validate_behaviors(&BehaviorRegistry::builtin(), &configs).is_err());
    }
}
