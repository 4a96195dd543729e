//! Requires configured files at the package root.

use catalint_common::PackageDir;
use log::trace;

use super::{NameList, Rule, RuleError};

/// Fails when any configured mandatory file is absent from the package root.
#[derive(Debug, Clone)]
pub struct MissingMandatoryFiles {
    files: Vec<String>,
}

impl MissingMandatoryFiles {
    /// Creates the rule for the given file names.
    #[must_use]
    pub const fn new(files: Vec<String>) -> Self {
        Self { files }
    }
}

impl Rule for MissingMandatoryFiles {
    fn name(&self) -> &'static str {
        "missing_mandatory_files"
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        let missing: NameList = self
            .files
            .iter()
            .filter(|file| {
                let present = package.path().join(file).is_file();
                trace!("{}: mandatory file {file} present: {present}", package.name());
                !present
            })
            .map(String::as_str)
            .collect();

        if missing.as_slice().is_empty() {
            Ok(())
        } else {
            Err(RuleError::MissingFiles { files: missing })
        }
    }
}
