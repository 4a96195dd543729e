//! Package directories and their immediate contents.
//!
//! A [`PackageDir`] is an existing directory under the catalog root. The
//! helpers here list its children once, in name order, so that rules see a
//! deterministic view of the filesystem.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use thiserror::Error;

/// Errors raised while opening or reading a package directory.
#[derive(Debug, Error)]
pub enum PackageDirError {
    /// The path does not name an existing directory.
    #[error("the given path is not a directory: {path}")]
    NotADirectory {
        /// Path that was expected to be a directory.
        path: Utf8PathBuf,
    },

    /// The directory has no usable base name (for example `/`).
    #[error("cannot derive a package name from {path}")]
    Unnamed {
        /// Path without a final component.
        path: Utf8PathBuf,
    },

    /// Reading the directory failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Directory being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// An immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the entry, lossily decoded when it is not UTF-8.
    pub name: String,
    /// Full path of the entry. Only usable for I/O when `lossy` is `false`.
    pub path: Utf8PathBuf,
    /// Whether the entry is a directory (symlinks are followed).
    pub is_dir: bool,
    /// Whether the on-disk name is not valid UTF-8.
    pub lossy: bool,
}

/// A package directory within the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    path: Utf8PathBuf,
    name: String,
}

impl PackageDir {
    /// Opens the package at `path`.
    ///
    /// The package name is the directory's base name. Paths without one, such
    /// as `.`, are resolved through [`Utf8Path::canonicalize_utf8`] first.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDirError::NotADirectory`] when `path` does not exist or
    /// is not a directory, and [`PackageDirError::Unnamed`] when no base name
    /// can be derived.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, PackageDirError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(PackageDirError::NotADirectory {
                path: path.to_owned(),
            });
        }

        let name = match path.file_name() {
            Some(name) => name.to_owned(),
            None => path
                .canonicalize_utf8()
                .ok()
                .and_then(|resolved| resolved.file_name().map(str::to_owned))
                .ok_or_else(|| PackageDirError::Unnamed {
                    path: path.to_owned(),
                })?,
        };

        Ok(Self {
            path: path.to_owned(),
            name,
        })
    }

    /// Returns the package directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the directory base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lists the package's non-hidden immediate children in name order.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDirError::Read`] when the directory or one of its
    /// entries cannot be read.
    pub fn entries(&self) -> Result<Vec<DirEntry>, PackageDirError> {
        list_visible_entries(&self.path)
    }
}

/// Lists the non-hidden immediate children of `dir` in name order.
///
/// Entries whose names start with `.` are skipped, matching shell glob
/// semantics for `dir/*`. Names that are not valid UTF-8 are kept, decoded
/// lossily and flagged through [`DirEntry::lossy`].
///
/// # Errors
///
/// Returns [`PackageDirError::Read`] when the directory or one of its entries
/// cannot be read.
pub fn list_visible_entries(dir: &Utf8Path) -> Result<Vec<DirEntry>, PackageDirError> {
    let read_error = |source| PackageDirError::Read {
        path: dir.to_owned(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let (name, lossy) = match entry.file_name().into_string() {
            Ok(name) => (name, false),
            Err(raw) => (raw.to_string_lossy().into_owned(), true),
        };
        let path = dir.join(&name);
        if name.starts_with('.') {
            trace!("skipping hidden entry {path}");
            continue;
        }
        if lossy {
            trace!("entry {path} does not have a UTF-8 name");
        }

        entries.push(DirEntry {
            is_dir: entry.path().is_dir(),
            name,
            path,
            lossy,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
