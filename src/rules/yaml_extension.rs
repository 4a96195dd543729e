//! Enforces the manifest file extension.

use catalint_common::{ManifestLayout, PackageDir, VersionPattern};

use super::{NameList, Rule, RuleError, display_path, manifest_candidates};

/// Fails when a manifest uses an extension outside the accepted set, such as
/// `manifest.yml` when only `yaml` is accepted.
#[derive(Debug, Clone)]
pub struct NoYamlExtension {
    layout: ManifestLayout,
    versions: VersionPattern,
    extensions: Vec<String>,
}

impl NoYamlExtension {
    /// Creates the rule. `extensions` are given without a leading dot.
    #[must_use]
    pub const fn new(
        layout: ManifestLayout,
        versions: VersionPattern,
        extensions: Vec<String>,
    ) -> Self {
        Self {
            layout,
            versions,
            extensions,
        }
    }
}

impl Rule for NoYamlExtension {
    fn name(&self) -> &'static str {
        "no_yaml_extension"
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        let offenders: NameList = manifest_candidates(package, &self.layout, &self.versions)?
            .into_iter()
            .filter(|path| {
                !path
                    .extension()
                    .is_some_and(|ext| self.extensions.iter().any(|accepted| accepted == ext))
            })
            .map(|path| display_path(package, &path).into_string())
            .collect();

        if offenders.as_slice().is_empty() {
            Ok(())
        } else {
            Err(RuleError::WrongExtension {
                files: offenders,
                expected: self.extensions.iter().map(|ext| format!(".{ext}")).collect(),
            })
        }
    }
}
