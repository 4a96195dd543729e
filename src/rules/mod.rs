//! Package rules and the registry that orders them.
//!
//! Each rule inspects one package directory and reports at most one
//! [`RuleError`]. Rules that look at several offending entries fold them into
//! that single error so a report stays one line per rule.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use catalint_common::{
    DirEntry, ManifestError, ManifestLayout, PackageDir, PackageDirError, PackageNameError,
    VersionPattern,
};
use thiserror::Error;

use crate::config::{ConfigError, LintConfig};

mod coherent_path;
mod mandatory_files;
mod manifest_fields;
mod package_name;
mod version_path;
mod yaml_extension;
mod yaml_syntax;

pub use coherent_path::IncoherentPath;
pub use mandatory_files::MissingMandatoryFiles;
pub use manifest_fields::MissingManifestFields;
pub use package_name::InvalidPackageName;
pub use version_path::InvalidVersionPath;
pub use yaml_extension::NoYamlExtension;
pub use yaml_syntax::InvalidYaml;

/// A single structural check applied to a package directory.
pub trait Rule {
    /// Stable identifier printed in reports.
    fn name(&self) -> &'static str;

    /// Checks `package`.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] describing why the package fails the rule.
    fn validate(&self, package: &PackageDir) -> Result<(), RuleError>;
}

/// Quoted, comma-separated list of names used in rule messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameList(Vec<String>);

impl NameList {
    /// Returns the listed names.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for NameList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A disagreement between a manifest and the directory it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The declared name differs from the package directory name.
    Name {
        /// Manifest declaring the name.
        manifest: Utf8PathBuf,
        /// Declared value.
        declared: String,
        /// Package directory name.
        expected: String,
    },
    /// The root manifest declares a version with no matching directory.
    UnknownVersion {
        /// Manifest declaring the version.
        manifest: Utf8PathBuf,
        /// Declared value.
        declared: String,
    },
    /// A version manifest declares a version other than its directory name.
    Version {
        /// Manifest declaring the version.
        manifest: Utf8PathBuf,
        /// Declared value.
        declared: String,
        /// Name of the containing version directory.
        directory: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name {
                manifest,
                declared,
                expected,
            } => write!(
                f,
                "{manifest} declares name '{declared}' but the package directory is '{expected}'"
            ),
            Self::UnknownVersion { manifest, declared } => write!(
                f,
                "{manifest} declares version '{declared}' but there is no such version directory"
            ),
            Self::Version {
                manifest,
                declared,
                directory,
            } => write!(
                f,
                "{manifest} declares version '{declared}' but lives in version directory '{directory}'"
            ),
        }
    }
}

/// All mismatches found in one package, separated by `; `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatches(Vec<Mismatch>);

impl Mismatches {
    /// Returns the individual mismatches.
    #[must_use]
    pub fn as_slice(&self) -> &[Mismatch] {
        &self.0
    }
}

impl fmt::Display for Mismatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, mismatch) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{mismatch}")?;
        }
        Ok(())
    }
}

/// Reasons a package fails a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Mandatory files are absent from the package root.
    #[error("missing mandatory files: {files}")]
    MissingFiles {
        /// Missing file names.
        files: NameList,
    },

    /// The package root holds entries that are not version directories.
    #[error(
        "found {entries} where only version number directories (like 0.1.0) and mandatory files are expected"
    )]
    UnexpectedEntries {
        /// Offending entry names.
        entries: NameList,
    },

    /// The package directory name breaks the naming policy.
    #[error("invalid package name: {0}")]
    InvalidName(#[from] PackageNameError),

    /// Manifest contents disagree with the directory layout.
    #[error("{mismatches}")]
    Incoherent {
        /// Every disagreement found.
        mismatches: Mismatches,
    },

    /// The manifest lacks mandatory fields.
    #[error("manifest {path} is missing mandatory fields: {fields}")]
    MissingFields {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Missing keys.
        fields: NameList,
    },

    /// The manifest is valid YAML but not a mapping of fields.
    #[error("manifest {path} must be a mapping of fields, found {kind}")]
    NotAMapping {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Description of the document found.
        kind: &'static str,
    },

    /// A manifest could not be read or parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Manifest files use an extension outside the accepted set.
    #[error("manifest files {files} must use one of the extensions {expected}")]
    WrongExtension {
        /// Offending manifest paths.
        files: NameList,
        /// Accepted extensions, with their leading dot.
        expected: NameList,
    },

    /// The package directory could not be listed.
    #[error(transparent)]
    Listing(#[from] PackageDirError),
}

impl RuleError {
    pub(crate) const fn incoherent(mismatches: Vec<Mismatch>) -> Self {
        Self::Incoherent {
            mismatches: Mismatches(mismatches),
        }
    }
}

/// Ordered collection of rules applied to every package.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Builds the standard rules configured by `config`, in reporting order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the version pattern or manifest name in
    /// `config` is unusable.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let versions = config.version_glob()?;
        let layout = config.manifest_layout()?;

        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(MissingMandatoryFiles::new(config.mandatory_files.clone())),
            Box::new(InvalidVersionPath::new(
                versions.clone(),
                layout.clone(),
                config.mandatory_files.clone(),
            )),
            Box::new(InvalidPackageName::new(config.package_name.max_length)),
            Box::new(IncoherentPath::new(
                layout.clone(),
                versions.clone(),
                config.name_field.clone(),
                config.version_field.clone(),
            )),
            Box::new(MissingManifestFields::new(
                layout.clone(),
                config.mandatory_fields.clone(),
            )),
            Box::new(InvalidYaml::new(layout.clone(), versions.clone())),
            Box::new(NoYamlExtension::new(
                layout,
                versions,
                config.normalised_extensions(),
            )),
        ];

        Ok(Self { rules })
    }

    /// Wraps an explicit list of rules, preserving their order.
    #[must_use]
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Returns the rules in order.
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Returns the rule names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

/// Lists the version directories of `package` in name order.
pub(crate) fn version_dirs(
    package: &PackageDir,
    versions: &VersionPattern,
) -> Result<Vec<DirEntry>, PackageDirError> {
    Ok(package
        .entries()?
        .into_iter()
        .filter(|entry| entry.is_dir && !entry.lossy && versions.matches(&entry.name))
        .collect())
}

/// Lists manifest candidates in the package root and in each version
/// directory.
pub(crate) fn manifest_candidates(
    package: &PackageDir,
    layout: &ManifestLayout,
    versions: &VersionPattern,
) -> Result<Vec<Utf8PathBuf>, PackageDirError> {
    let mut candidates = layout.candidates_in(package.path())?;
    for version in version_dirs(package, versions)? {
        candidates.extend(layout.candidates_in(&version.path)?);
    }
    Ok(candidates)
}

/// Renders `path` relative to the package's parent so messages read
/// `foo/1.0.0/manifest.yaml` regardless of where the catalog lives.
pub(crate) fn display_path(package: &PackageDir, path: &Utf8Path) -> Utf8PathBuf {
    path.strip_prefix(package.path())
        .map_or_else(|_| path.to_owned(), |relative| Utf8Path::new(package.name()).join(relative))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Temporary package trees shared by the rule tests.

    use camino::Utf8PathBuf;
    use catalint_common::{
        DEFAULT_MANIFEST_FILE, DEFAULT_VERSION_PATTERN, ManifestLayout, PackageDir, VersionPattern,
    };
    use std::fs;
    use tempfile::TempDir;

    pub(crate) struct TempPackage {
        _temp: TempDir,
        pub(crate) path: Utf8PathBuf,
    }

    impl TempPackage {
        pub(crate) fn new(name: &str) -> Self {
            let temp = TempDir::new().expect("failed to create temp dir");
            let root = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
            let path = root.join(name);
            fs::create_dir(&path).expect("failed to create package dir");
            Self { _temp: temp, path }
        }

        pub(crate) fn file(&self, relative: &str, contents: &str) -> &Self {
            let path = self.path.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create parent dir");
            }
            fs::write(path, contents).expect("failed to write file");
            self
        }

        pub(crate) fn dir(&self, relative: &str) -> &Self {
            fs::create_dir_all(self.path.join(relative)).expect("failed to create dir");
            self
        }

        #[cfg(unix)]
        pub(crate) fn raw_file(&self, name: &[u8]) -> &Self {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;

            fs::write(self.path.as_std_path().join(OsStr::from_bytes(name)), "")
                .expect("failed to write file");
            self
        }

        pub(crate) fn open(&self) -> PackageDir {
            PackageDir::open(&self.path).expect("expected package to open")
        }
    }

    pub(crate) fn layout() -> ManifestLayout {
        ManifestLayout::new(DEFAULT_MANIFEST_FILE).expect("valid manifest name")
    }

    pub(crate) fn versions() -> VersionPattern {
        VersionPattern::new(DEFAULT_VERSION_PATTERN).expect("valid version pattern")
    }
}
