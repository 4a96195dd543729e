//! Shared test utilities for the CLI crate.

use camino::Utf8PathBuf;
use rstest::fixture;
use std::fs;
use tempfile::TempDir;

/// Manifest that satisfies every default rule for a package called `name`.
pub fn conformant_manifest(name: &str) -> String {
    format!("name: {name}\ndescription: The {name} package\nversion: 1.0.0\n")
}

/// A temporary catalog root converted to a UTF-8 path.
pub struct TempCatalog {
    _temp: TempDir,
    /// Catalog root.
    pub root: Utf8PathBuf,
}

impl TempCatalog {
    /// Writes `contents` to `relative`, creating parent directories.
    pub fn file(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, contents).expect("failed to write file");
    }

    /// Creates the directory `relative` and its parents.
    pub fn dir(&self, relative: &str) {
        fs::create_dir_all(self.root.join(relative)).expect("failed to create dir");
    }

    /// Creates a directory directly under the root from raw name bytes.
    #[cfg(unix)]
    pub fn raw_dir(&self, name: &[u8]) {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        fs::create_dir(self.root.as_std_path().join(OsStr::from_bytes(name)))
            .expect("failed to create dir");
    }

    /// Creates a package that passes every default rule.
    pub fn conformant_package(&self, name: &str) {
        self.file(&format!("{name}/manifest.yaml"), &conformant_manifest(name));
        self.dir(&format!("{name}/1.0.0"));
    }
}

#[fixture]
pub fn temp_catalog() -> TempCatalog {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
    TempCatalog { _temp: temp, root }
}

/// A Write implementation that always fails, for testing error paths.
pub struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("simulated write failure"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::other("simulated flush failure"))
    }
}
