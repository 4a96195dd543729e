//! Catalog traversal.
//!
//! [`run_catalog`] validates every package under the catalog root in name
//! order, writing progress as it goes, and returns the collected [`Report`].

use camino::Utf8Path;
use catalint::{PackageValidator, ValidationError};
use catalint_common::list_visible_entries;
use log::{info, warn};
use std::io::Write;

use crate::error::{CliError, Result};
use crate::report::{HEADING, write_summary};

/// Validation outcome for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    /// Package directory name.
    pub name: String,
    /// Failed rules, in registry order.
    pub errors: Vec<ValidationError>,
}

impl PackageReport {
    /// Returns `true` when no rule failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of one catalog run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    packages: Vec<PackageReport>,
}

impl Report {
    /// Builds a report from per-package outcomes.
    #[must_use]
    pub const fn new(packages: Vec<PackageReport>) -> Self {
        Self { packages }
    }

    /// Returns every validated package in name order.
    #[must_use]
    pub fn packages(&self) -> &[PackageReport] {
        &self.packages
    }

    /// Iterates over the packages with at least one failure.
    pub fn failures(&self) -> impl Iterator<Item = &PackageReport> {
        self.packages.iter().filter(|package| !package.passed())
    }

    /// Returns `true` when every package passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.packages.iter().all(PackageReport::passed)
    }

    /// Total number of failed rules across all packages.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.packages.iter().map(|package| package.errors.len()).sum()
    }
}

/// Validates every package under `root`, writing progress and the summary to
/// `out`.
///
/// Only directories are packages; other entries are skipped with a warning.
/// A package directory whose name is not valid UTF-8 is reported as failing
/// `invalid_package_name` without running the other rules.
///
/// # Errors
///
/// Returns [`CliError::RootNotFound`] when `root` is not a directory,
/// [`CliError::Listing`] when it cannot be read, and
/// [`CliError::WriteFailed`] when `out` rejects a write.
pub fn run_catalog(
    root: &Utf8Path,
    validator: &PackageValidator,
    out: &mut dyn Write,
) -> Result<Report> {
    if !root.is_dir() {
        return Err(CliError::RootNotFound {
            path: root.to_owned(),
        });
    }

    let entries = list_visible_entries(root)?;
    writeln!(out, "{HEADING}\n")?;

    let mut packages = Vec::new();
    for entry in entries {
        if !entry.is_dir {
            warn!("skipping {}: not a package directory", entry.path);
            continue;
        }

        info!("validating package {}", entry.path);
        write!(out, "Validating package: {}... ", entry.name)?;
        let errors = if entry.lossy {
            warn!("package directory {} does not have a UTF-8 name", entry.path);
            vec![ValidationError::non_utf8_package_name(&entry.name)]
        } else {
            validator.validate(&entry.path)?
        };
        write_progress(&errors, out)?;

        packages.push(PackageReport {
            name: entry.name,
            errors,
        });
    }

    let report = Report::new(packages);
    write_summary(&report, out)?;
    Ok(report)
}

fn write_progress(errors: &[ValidationError], out: &mut dyn Write) -> std::io::Result<()> {
    if errors.is_empty() {
        return writeln!(out, "OK");
    }

    writeln!(out, "Found {} errors:", errors.len())?;
    for error in errors {
        writeln!(out, "Check: {}", error.rule)?;
        writeln!(out, " ->: {}", error.message)?;
    }
    Ok(())
}
