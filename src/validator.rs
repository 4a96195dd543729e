//! Runs every registered rule against a package directory.

use camino::Utf8Path;
use catalint_common::{PackageDir, PackageDirError, PackageNameError};
use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, LintConfig};
use crate::rules::{InvalidPackageName, RuleError, RuleRegistry};

/// A failed rule, as shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Name of the failing rule.
    pub rule: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    /// Reports a package directory whose name is not valid UTF-8.
    ///
    /// Such a directory cannot be opened, so only the name check applies.
    /// `lossy_name` is the name with invalid bytes replaced.
    #[must_use]
    pub fn non_utf8_package_name(lossy_name: &str) -> Self {
        let err = RuleError::InvalidName(PackageNameError::NotUtf8 {
            name: lossy_name.to_owned(),
        });
        Self {
            rule: InvalidPackageName::NAME,
            message: err.to_string(),
        }
    }
}

/// Errors that prevent a package from being validated at all.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The path is not a usable package directory.
    #[error(transparent)]
    Package(#[from] PackageDirError),
}

/// Applies a [`RuleRegistry`] to package directories.
#[derive(Debug)]
pub struct PackageValidator {
    registry: RuleRegistry,
}

impl PackageValidator {
    /// Creates a validator for `registry`.
    #[must_use]
    pub const fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Creates a validator running the standard rules configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `config` is invalid.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        RuleRegistry::from_config(config).map(Self::new)
    }

    /// Returns the registered rules.
    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates the package at `path`.
    ///
    /// Every rule runs, in registry order, even after an earlier one fails.
    /// An empty result means the package passed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Package`] when `path` is not a directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use catalint::{LintConfig, PackageValidator};
    ///
    /// let validator = PackageValidator::from_config(&LintConfig::default())?;
    /// for error in validator.validate(Utf8Path::new("src/foo"))? {
    ///     println!("{}: {}", error.rule, error.message);
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn validate(&self, path: &Utf8Path) -> Result<Vec<ValidationError>, ValidateError> {
        let package = PackageDir::open(path)?;
        Ok(self.validate_package(&package))
    }

    /// Validates an already opened package.
    #[must_use]
    pub fn validate_package(&self, package: &PackageDir) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for rule in self.registry.rules() {
            debug!("{}: running {}", package.name(), rule.name());
            match rule.validate(package) {
                Ok(()) => debug!("{}: {} passed", package.name(), rule.name()),
                Err(err) => {
                    debug!("{}: {} failed: {err}", package.name(), rule.name());
                    errors.push(ValidationError {
                        rule: rule.name(),
                        message: err.to_string(),
                    });
                }
            }
        }
        errors
    }
}
