//! JSON Lines output for CI tooling.
//!
//! Each failed rule becomes one object on its own line:
//! `{"package":"bar","rule":"no_yaml_extension","message":"..."}`.

use camino::Utf8Path;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::catalog::Report;
use crate::error::{CliError, Result};

/// One failed rule for one package.
#[derive(Debug, Serialize)]
pub struct FailureRecord<'a> {
    /// Package directory name.
    pub package: &'a str,
    /// Failed rule name.
    pub rule: &'a str,
    /// Rule message.
    pub message: &'a str,
}

/// Writes one JSON object per failure in `report` to `out`.
///
/// # Errors
///
/// Returns any error raised by `out` or by serialisation.
pub fn write_records(report: &Report, out: &mut dyn Write) -> std::io::Result<()> {
    for package in report.failures() {
        for error in &package.errors {
            let record = FailureRecord {
                package: &package.name,
                rule: error.rule,
                message: &error.message,
            };
            serde_json::to_writer(&mut *out, &record)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()
}

/// Creates `path` and writes the records for `report` into it.
///
/// A passing run produces an empty file.
///
/// # Errors
///
/// Returns [`CliError::JsonlFailed`] when the file cannot be created or
/// written.
pub fn write_file(path: &Utf8Path, report: &Report) -> Result<()> {
    let to_error = |source| CliError::JsonlFailed {
        path: path.to_owned(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    write_records(report, &mut BufWriter::new(file)).map_err(to_error)
}
