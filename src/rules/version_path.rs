//! Restricts package roots to version directories.

use catalint_common::{DirEntry, ManifestLayout, PackageDir, VersionPattern};
use log::trace;

use super::{NameList, Rule, RuleError};

/// Fails when the package root contains anything besides version
/// directories, manifest files, and configured mandatory files.
#[derive(Debug, Clone)]
pub struct InvalidVersionPath {
    versions: VersionPattern,
    layout: ManifestLayout,
    mandatory_files: Vec<String>,
}

impl InvalidVersionPath {
    /// Creates the rule.
    #[must_use]
    pub const fn new(
        versions: VersionPattern,
        layout: ManifestLayout,
        mandatory_files: Vec<String>,
    ) -> Self {
        Self {
            versions,
            layout,
            mandatory_files,
        }
    }

    fn is_allowed(&self, entry: &DirEntry) -> bool {
        if entry.lossy {
            false
        } else if entry.is_dir {
            self.versions.matches(&entry.name)
        } else {
            self.layout.is_candidate(&entry.name)
                || self.mandatory_files.iter().any(|file| *file == entry.name)
        }
    }
}

impl Rule for InvalidVersionPath {
    fn name(&self) -> &'static str {
        "invalid_version_path"
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        let unexpected: NameList = package
            .entries()?
            .into_iter()
            .filter(|entry| {
                let allowed = self.is_allowed(entry);
                trace!("{}: entry {} allowed: {allowed}", package.name(), entry.name);
                !allowed
            })
            .map(|entry| entry.name)
            .collect();

        if unexpected.as_slice().is_empty() {
            Ok(())
        } else {
            Err(RuleError::UnexpectedEntries {
                entries: unexpected,
            })
        }
    }
}
