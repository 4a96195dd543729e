//! Structural lint rules for versioned package catalogs.
//!
//! A catalog is a directory of packages. Each package directory holds a YAML
//! manifest and one directory per released version. [`PackageValidator`]
//! applies the configured [`rules`] to one package and returns every failure.

pub mod config;
pub mod rules;
pub mod validator;

pub use config::{CONFIG_FILE_NAME, ConfigError, LintConfig, PackageNameConfig};
pub use rules::{Rule, RuleError, RuleRegistry};
pub use validator::{PackageValidator, ValidateError, ValidationError};
