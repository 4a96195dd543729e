//! Parses every manifest in a package.

use catalint_common::{Manifest, ManifestLayout, PackageDir, VersionPattern};
use log::trace;

use super::{Rule, RuleError, manifest_candidates};

/// Fails when any manifest in the package root or its version directories is
/// not valid YAML.
#[derive(Debug, Clone)]
pub struct InvalidYaml {
    layout: ManifestLayout,
    versions: VersionPattern,
}

impl InvalidYaml {
    /// Creates the rule.
    #[must_use]
    pub const fn new(layout: ManifestLayout, versions: VersionPattern) -> Self {
        Self { layout, versions }
    }
}

impl Rule for InvalidYaml {
    fn name(&self) -> &'static str {
        "invalid_yaml"
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        for path in manifest_candidates(package, &self.layout, &self.versions)? {
            trace!("parsing {path}");
            Manifest::load(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{TempPackage, layout, versions};
    use catalint_common::ManifestError;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rule() -> InvalidYaml {
        InvalidYaml::new(layout(), versions())
    }

    #[rstest]
    fn well_formed_manifests_pass(rule: InvalidYaml) {
        let package = TempPackage::new("foo");
        package
            .file("manifest.yaml", "name: foo\nversion: 1.0.0\n")
            .file("1.0.0/manifest.yaml", "name: foo\n");

        assert!(rule.validate(&package.open()).is_ok());
    }

    #[rstest]
    fn empty_manifests_are_valid_yaml(rule: InvalidYaml) {
        let package = TempPackage::new("foo");
        package.file("manifest.yaml", "");

        assert!(rule.validate(&package.open()).is_ok());
    }

    #[rstest]
    fn reports_a_broken_root_manifest(rule: InvalidYaml) {
        let package = TempPackage::new("foo");
        package.file("manifest.yaml", "name: foo\n  version: [\n");

        let err = rule.validate(&package.open()).expect_err("expected failure");
        assert!(
            matches!(err, RuleError::Manifest(ManifestError::Parse { .. })),
            "got: {err:?}"
        );
        assert!(err.to_string().contains("manifest.yaml"));
    }

    #[rstest]
    fn reports_a_broken_version_manifest(rule: InvalidYaml) {
        let package = TempPackage::new("foo");
        package
            .file("manifest.yaml", "name: foo\n")
            .file("1.0.0/manifest.yaml", "description: \"unterminated\n");

        let err = rule.validate(&package.open()).expect_err("expected failure");
        assert!(err.to_string().contains("1.0.0"), "got: {err}");
    }

    #[rstest]
    fn unrelated_files_are_not_parsed(rule: InvalidYaml) {
        let package = TempPackage::new("foo");
        package
            .file("manifest.yaml", "name: foo\n")
            .file("README.md", "name: [\n");

        assert!(rule.validate(&package.open()).is_ok());
    }
}
