//! Catalog model shared by the catalint rules and CLI: package directories,
//! package names, version directories, and YAML manifests.

pub mod manifest;
pub mod package;
pub mod package_name;
pub mod version;

pub use manifest::{DEFAULT_MANIFEST_FILE, Manifest, ManifestError, ManifestLayout};
pub use package::{DirEntry, PackageDir, PackageDirError, list_visible_entries};
pub use package_name::{DEFAULT_MAX_LENGTH, PackageName, PackageNameError};
pub use version::{DEFAULT_VERSION_PATTERN, VersionPattern};
