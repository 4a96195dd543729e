//! Manifest discovery and parsing.
//!
//! Every package carries a YAML manifest describing its metadata. The
//! canonical file name is configurable (`manifest.yaml` by default); any file
//! sharing its stem, whatever the extension, is a *manifest candidate*. This
//! lets the extension rule report `manifest.yml` instead of treating the
//! manifest as absent.

use camino::{Utf8Path, Utf8PathBuf};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::package::{PackageDirError, list_visible_entries};

/// Canonical manifest file name unless configured otherwise.
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.yaml";

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid YAML.
    #[error("invalid YAML in {path}: {source}")]
    Parse {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Parser error, including the location of the problem.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Where manifests live and what they are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLayout {
    file_name: String,
    stem: String,
}

impl ManifestLayout {
    /// Creates a layout for the canonical manifest `file_name`.
    ///
    /// Returns `None` when `file_name` has no stem (for example an empty
    /// string or a path ending in `..`).
    ///
    /// # Examples
    ///
    /// ```
    /// use catalint_common::manifest::ManifestLayout;
    ///
    /// let layout = ManifestLayout::new("manifest.yaml").expect("valid file name");
    /// assert_eq!(layout.stem(), "manifest");
    /// assert!(layout.is_candidate("manifest.yml"));
    /// assert!(!layout.is_candidate("README.md"));
    /// ```
    #[must_use]
    pub fn new(file_name: &str) -> Option<Self> {
        let stem = Utf8Path::new(file_name).file_stem()?;
        Some(Self {
            file_name: file_name.to_owned(),
            stem: stem.to_owned(),
        })
    }

    /// Returns the canonical manifest file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the stem shared by every manifest candidate.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Returns `true` when a file called `name` is a manifest candidate.
    #[must_use]
    pub fn is_candidate(&self, name: &str) -> bool {
        Utf8Path::new(name).file_stem() == Some(self.stem.as_str())
    }

    /// Lists the manifest candidates directly inside `dir`, in name order.
    ///
    /// Files whose names are not valid UTF-8 are never candidates.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDirError::Read`] when `dir` cannot be listed.
    pub fn candidates_in(&self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, PackageDirError> {
        Ok(list_visible_entries(dir)?
            .into_iter()
            .filter(|entry| !entry.is_dir && !entry.lossy && self.is_candidate(&entry.name))
            .map(|entry| entry.path)
            .collect())
    }

    /// Locates the manifest in `dir`.
    ///
    /// The canonical file wins when present; otherwise the first candidate in
    /// name order is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDirError::Read`] when `dir` cannot be listed.
    pub fn locate(&self, dir: &Utf8Path) -> Result<Option<Utf8PathBuf>, PackageDirError> {
        let mut candidates = self.candidates_in(dir)?;
        let canonical = candidates
            .iter()
            .position(|path| path.file_name() == Some(self.file_name.as_str()));

        Ok(match canonical {
            Some(index) => Some(candidates.swap_remove(index)),
            None => candidates.into_iter().next(),
        })
    }
}

/// A parsed manifest document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: Utf8PathBuf,
    document: Value,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Read`] when the file cannot be read and
    /// [`ManifestError::Parse`] when it is not valid YAML.
    pub fn load(path: &Utf8Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(path, &source)
    }

    /// Parses `source` as the manifest stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] when `source` is not valid YAML.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use catalint_common::manifest::Manifest;
    ///
    /// let manifest = Manifest::parse(Utf8Path::new("foo/manifest.yaml"), "name: foo\n")
    ///     .expect("valid YAML");
    /// assert_eq!(manifest.string_field("name").as_deref(), Some("foo"));
    /// ```
    pub fn parse(path: &Utf8Path, source: &str) -> Result<Self, ManifestError> {
        let document =
            serde_yaml::from_str::<Value>(source).map_err(|source| ManifestError::Parse {
                path: path.to_owned(),
                source,
            })?;

        Ok(Self {
            path: path.to_owned(),
            document,
        })
    }

    /// Returns the manifest path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the top-level mapping, if the document is one.
    #[must_use]
    pub fn mapping(&self) -> Option<&Mapping> {
        self.document.as_mapping()
    }

    /// Returns `true` when the top-level mapping contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.mapping().is_some_and(|mapping| mapping.contains_key(key))
    }

    /// Returns a top-level scalar field rendered as a string.
    ///
    /// Strings are returned as-is; numbers and booleans are formatted so that
    /// an unquoted `version: 1.0` still compares against directory names.
    #[must_use]
    pub fn string_field(&self, key: &str) -> Option<String> {
        match self.mapping()?.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Returns a short description of the top-level document kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.document {
            Value::Null => "an empty document",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
        }
    }
}
