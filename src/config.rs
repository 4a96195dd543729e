//! Catalog policy configuration.
//!
//! Which files are mandatory, which manifest fields must be present, and how
//! versions and manifests are named are properties of the catalog, not of the
//! linter. They live in `catalint.toml`, deserialised into [`LintConfig`].
//! Every setting falls back to a default when omitted, so an absent file is
//! equivalent to an empty one.

use camino::{Utf8Path, Utf8PathBuf};
use catalint_common::{
    DEFAULT_MANIFEST_FILE, DEFAULT_MAX_LENGTH, DEFAULT_VERSION_PATTERN, ManifestLayout,
    VersionPattern,
};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "catalint.toml";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Configuration path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid configuration {path}: {source}")]
    Parse {
        /// Configuration path.
        path: Utf8PathBuf,
        /// TOML deserialisation error.
        #[source]
        source: toml::de::Error,
    },

    /// `version_pattern` is not a valid glob.
    #[error("invalid version_pattern '{pattern}': {reason}")]
    InvalidVersionPattern {
        /// The rejected pattern.
        pattern: String,
        /// Description of the glob error.
        reason: String,
    },

    /// `manifest_file` has no file stem.
    #[error("invalid manifest_file '{file_name}': expected a file name such as manifest.yaml")]
    InvalidManifestFile {
        /// The rejected file name.
        file_name: String,
    },

    /// A list setting contains an empty or whitespace-only entry.
    #[error("{setting} must not contain blank entries")]
    BlankEntry {
        /// Name of the offending setting.
        setting: &'static str,
    },

    /// `package_name.max_length` is zero.
    #[error("package_name.max_length must be at least 1")]
    ZeroMaxLength,
}

/// Catalog policy applied by the rules.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Files that must exist in every package root.
    pub mandatory_files: Vec<String>,
    /// Top-level keys every package manifest must define.
    pub mandatory_fields: Vec<String>,
    /// Canonical manifest file name. Files sharing its stem are treated as
    /// manifest candidates.
    pub manifest_file: String,
    /// Extensions (without the leading dot) accepted for manifest files.
    pub manifest_extensions: Vec<String>,
    /// Glob matched against version directory names.
    pub version_pattern: String,
    /// Manifest key declaring the package name.
    pub name_field: String,
    /// Manifest key declaring the package version.
    pub version_field: String,
    /// Naming policy for package directories.
    pub package_name: PackageNameConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            mandatory_files: vec![DEFAULT_MANIFEST_FILE.to_owned()],
            mandatory_fields: vec![
                "name".to_owned(),
                "description".to_owned(),
                "version".to_owned(),
            ],
            manifest_file: DEFAULT_MANIFEST_FILE.to_owned(),
            manifest_extensions: vec!["yaml".to_owned()],
            version_pattern: DEFAULT_VERSION_PATTERN.to_owned(),
            name_field: "name".to_owned(),
            version_field: "version".to_owned(),
            package_name: PackageNameConfig::default(),
        }
    }
}

impl LintConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// `path` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// the validation errors described on [`Self::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use catalint::LintConfig;
    ///
    /// let config = LintConfig::from_toml_str(
    ///     Utf8Path::new("catalint.toml"),
    ///     "mandatory_files = [\"manifest.yaml\", \"README.md\"]\n",
    /// )
    /// .expect("valid configuration");
    /// assert_eq!(config.mandatory_files.len(), 2);
    /// assert_eq!(config.manifest_file, "manifest.yaml");
    /// ```
    pub fn from_toml_str(path: &Utf8Path, source: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, plus any
    /// error from [`Self::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        debug!("loading configuration from {path}");
        Self::from_toml_str(path, &source)
    }

    /// Loads `catalint.toml` from `dir` when it exists, otherwise returns the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::load`] when the file exists but cannot
    /// be used.
    pub fn discover(dir: &Utf8Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!("no {CONFIG_FILE_NAME} in {dir}; using defaults");
            Ok(Self::default())
        }
    }

    /// Checks settings that deserialisation alone cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVersionPattern`],
    /// [`ConfigError::InvalidManifestFile`], [`ConfigError::BlankEntry`], or
    /// [`ConfigError::ZeroMaxLength`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.version_glob()?;
        self.manifest_layout()?;

        let lists: [(&'static str, &[String]); 3] = [
            ("mandatory_files", self.mandatory_files.as_slice()),
            ("mandatory_fields", self.mandatory_fields.as_slice()),
            ("manifest_extensions", self.manifest_extensions.as_slice()),
        ];
        for (setting, entries) in lists {
            if entries.iter().any(|entry| entry.trim().is_empty()) {
                return Err(ConfigError::BlankEntry { setting });
            }
        }

        for (setting, value) in [
            ("name_field", &self.name_field),
            ("version_field", &self.version_field),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::BlankEntry { setting });
            }
        }

        if self.package_name.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }

        Ok(())
    }

    /// Compiles [`Self::version_pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVersionPattern`] for an invalid glob.
    pub fn version_glob(&self) -> Result<VersionPattern, ConfigError> {
        VersionPattern::new(&self.version_pattern).map_err(|err| {
            ConfigError::InvalidVersionPattern {
                pattern: self.version_pattern.clone(),
                reason: err.to_string(),
            }
        })
    }

    /// Builds the manifest layout for [`Self::manifest_file`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidManifestFile`] when the name has no stem.
    pub fn manifest_layout(&self) -> Result<ManifestLayout, ConfigError> {
        ManifestLayout::new(&self.manifest_file).ok_or_else(|| ConfigError::InvalidManifestFile {
            file_name: self.manifest_file.clone(),
        })
    }

    /// Accepted manifest extensions with any leading dot removed.
    #[must_use]
    pub fn normalised_extensions(&self) -> Vec<String> {
        self.manifest_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_owned())
            .collect()
    }
}

/// Settings for the package naming rule.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageNameConfig {
    /// Maximum number of characters in a package directory name.
    #[serde(default = "PackageNameConfig::default_max_length")]
    pub max_length: usize,
}

impl PackageNameConfig {
    const fn default_max_length() -> usize {
        DEFAULT_MAX_LENGTH
    }
}

impl Default for PackageNameConfig {
    fn default() -> Self {
        Self {
            max_length: Self::default_max_length(),
        }
    }
}
