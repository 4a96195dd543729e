//! Cross-checks manifest metadata against the directory layout.
//!
//! The root manifest must carry the package directory's name, and any version
//! it declares must exist as a version directory. Manifests inside version
//! directories may restate the name and version; when they do, both must match
//! their location. Manifests that fail to parse are skipped here and reported
//! by the YAML rule instead.

use std::collections::BTreeSet;

use camino::Utf8Path;
use catalint_common::{Manifest, ManifestLayout, PackageDir, VersionPattern};
use log::debug;

use super::{Mismatch, Rule, RuleError, display_path, version_dirs};

/// Fails when manifest names or versions disagree with their directories.
#[derive(Debug, Clone)]
pub struct IncoherentPath {
    layout: ManifestLayout,
    versions: VersionPattern,
    name_field: String,
    version_field: String,
}

impl IncoherentPath {
    /// Creates the rule.
    #[must_use]
    pub const fn new(
        layout: ManifestLayout,
        versions: VersionPattern,
        name_field: String,
        version_field: String,
    ) -> Self {
        Self {
            layout,
            versions,
            name_field,
            version_field,
        }
    }

    fn load(&self, dir: &Utf8Path) -> Result<Option<Manifest>, RuleError> {
        let Some(path) = self.layout.locate(dir)? else {
            return Ok(None);
        };
        match Manifest::load(&path) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(err) => {
                debug!("skipping coherence checks for {path}: {err}");
                Ok(None)
            }
        }
    }

    fn check_name(
        &self,
        package: &PackageDir,
        manifest: &Manifest,
        mismatches: &mut Vec<Mismatch>,
    ) {
        if let Some(declared) = manifest
            .string_field(&self.name_field)
            .filter(|declared| declared != package.name())
        {
            mismatches.push(Mismatch::Name {
                manifest: display_path(package, manifest.path()),
                declared,
                expected: package.name().to_owned(),
            });
        }
    }
}

impl Rule for IncoherentPath {
    fn name(&self) -> &'static str {
        "incoherent_path"
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        let versions = version_dirs(package, &self.versions)?;
        let known: BTreeSet<&str> = versions.iter().map(|entry| entry.name.as_str()).collect();
        let mut mismatches = Vec::new();

        if let Some(manifest) = self.load(package.path())? {
            self.check_name(package, &manifest, &mut mismatches);
            if let Some(declared) = manifest
                .string_field(&self.version_field)
                .filter(|declared| !known.contains(declared.as_str()))
            {
                mismatches.push(Mismatch::UnknownVersion {
                    manifest: display_path(package, manifest.path()),
                    declared,
                });
            }
        }

        for version in &versions {
            let Some(manifest) = self.load(&version.path)? else {
                continue;
            };
            self.check_name(package, &manifest, &mut mismatches);
            if let Some(declared) = manifest
                .string_field(&self.version_field)
                .filter(|declared| *declared != version.name)
            {
                mismatches.push(Mismatch::Version {
                    manifest: display_path(package, manifest.path()),
                    declared,
                    directory: version.name.clone(),
                });
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(RuleError::incoherent(mismatches))
        }
    }
}
