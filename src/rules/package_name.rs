//! Checks the package directory name.

use catalint_common::{PackageDir, PackageName};
use log::trace;

use super::{Rule, RuleError};

/// Fails when the package directory name breaks the naming policy.
#[derive(Debug, Clone, Copy)]
pub struct InvalidPackageName {
    max_length: usize,
}

impl InvalidPackageName {
    /// Rule name shown in reports.
    pub const NAME: &'static str = "invalid_package_name";

    /// Creates the rule with the given maximum name length.
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Rule for InvalidPackageName {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(&self, package: &PackageDir) -> Result<(), RuleError> {
        let name = PackageName::parse(package.name(), self.max_length)?;
        trace!("accepted package name {name}");
        Ok(())
    }
}
