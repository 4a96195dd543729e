//! Requires mandatory keys in the package manifest.

use catalint_common::{Manifest, ManifestLayout, PackageDir};

use super::{NameList, Rule, RuleError, display_path};

/// Fails when the root manifest lacks any mandatory top-level key.
///
/// A manifest that cannot be parsed fails this rule too, with the parse error
/// as its message. Packages without a manifest pass; the mandatory files rule
/// reports them.
#[derive(Debug, Clone)]
pub struct MissingManifestFields {
    layout: ManifestLayout,
    fields: Vec<String>,
}

impl MissingManifestFields {
    /// Creates the rule for the given keys.
    #[must_use]
    pub const fn new(layout: ManifestLayout, fields: Vec<String>) -> Self {
        Self { layout, fields }
    }
}

impl Rule for MissingManifestFields {
    fn name(&self) -> &'static str {
        "missing_manifest_fields"
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        let Some(path) = self.layout.locate(package.path())? else {
            return Ok(());
        };
        let manifest = Manifest::load(&path)?;

        if manifest.mapping().is_none() {
            return Err(RuleError::NotAMapping {
                path: display_path(package, &path),
                kind: manifest.kind(),
            });
        }

        let missing: NameList = self
            .fields
            .iter()
            .filter(|field| !manifest.contains_key(field))
            .map(String::as_str)
            .collect();

        if missing.as_slice().is_empty() {
            Ok(())
        } else {
            Err(RuleError::MissingFields {
                path: display_path(package, &path),
                fields: missing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{TempPackage, layout};
    use rstest::{fixture, rstest};

    #[fixture]
    fn rule() -> MissingManifestFields {
        MissingManifestFields::new(
            layout(),
            vec!["name".to_owned(), "description".to_owned(), "version".to_owned()],
        )
    }

    #[rstest]
    fn complete_manifests_pass(rule: MissingManifestFields) {
        let package = TempPackage::new("foo");
        package.file(
            "manifest.yaml",
            "name: foo\ndescription: Foo tools\nversion: 1.0.0\n",
        );

        assert!(rule.validate(&package.open()).is_ok());
    }

    #[rstest]
    fn packages_without_a_manifest_pass(rule: MissingManifestFields) {
        let package = TempPackage::new("foo");
        assert!(rule.validate(&package.open()).is_ok());
    }

    #[rstest]
    fn lists_every_missing_field(rule: MissingManifestFields) {
        let package = TempPackage::new("foo");
        package.file("manifest.yaml", "name: foo\n");

        let err = rule.validate(&package.open()).expect_err("expected failure");
        assert_eq!(
            err.to_string(),
            "manifest foo/manifest.yaml is missing mandatory fields: 'description', 'version'"
        );
    }

    #[rstest]
    fn null_values_still_count_as_present(rule: MissingManifestFields) {
        let package = TempPackage::new("foo");
        package.file("manifest.yaml", "name: foo\ndescription:\nversion: ~\n");

        assert!(rule.validate(&package.open()).is_ok());
    }

    #[rstest]
    #[case::empty("", "an empty document")]
    #[case::sequence("- name\n- version\n", "a sequence")]
    fn non_mapping_documents_fail(
        rule: MissingManifestFields,
        #[case] source: &str,
        #[case] kind: &str,
    ) {
        let package = TempPackage::new("foo");
        package.file("manifest.yaml", source);

        let err = rule.validate(&package.open()).expect_err("expected failure");
        assert!(
            matches!(&err, RuleError::NotAMapping { kind: found, .. } if *found == kind),
            "got: {err:?}"
        );
    }

    #[rstest]
    fn parse_failures_are_reported(rule: MissingManifestFields) {
        let package = TempPackage::new("foo");
        package.file("manifest.yaml", "name: [unclosed\n");

        let err = rule.validate(&package.open()).expect_err("expected failure");
        assert!(matches!(err, RuleError::Manifest(_)), "got: {err:?}");
    }

    #[rstest]
    fn alternative_manifest_names_are_checked(rule: MissingManifestFields) {
        let package = TempPackage::new("bar");
        package.file("manifest.yml", "name: bar\ndescription: Bar\n");

        let err = rule.validate(&package.open()).expect_err("expected failure");
        assert!(
            matches!(&err, RuleError::MissingFields { fields, .. } if fields.as_slice() == ["version"]),
            "got: {err:?}"
        );
    }
}
