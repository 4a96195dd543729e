//! Summary formatting for catalog runs.
//!
//! A passing run ends with a one-line confirmation. A failing run ends with a
//! Markdown report listing every failed rule per package, suitable for pasting
//! into a pull request.

use std::io::Write;

use crate::catalog::Report;

/// Heading written before the first package is validated.
pub const HEADING: &str = "## Catalog quality check 🤖";

/// Closing line for a run with no failures.
pub const SUCCESS_LINE: &str = "All checks passed ✅ Great job!";

/// Opening line of the failure report.
pub const FAILURE_INTRO: &str =
    "Some packages failed the checks 🤖 They need fixing before the change is merged:";

/// Closing hint for a run with failures.
pub const FAILURE_HINT: &str =
    "After fixing the problems, push another commit to re-run the checks 🚀";

/// Formats the end-of-run summary for `report`.
///
/// # Examples
///
/// ```
/// use catalint_cli::catalog::Report;
/// use catalint_cli::report::format_summary;
///
/// let summary = format_summary(&Report::default());
/// assert!(summary.contains("All checks passed"));
/// ```
#[must_use]
pub fn format_summary(report: &Report) -> String {
    if report.is_success() {
        return format!("\n{SUCCESS_LINE}\n");
    }

    let mut output = format!("\n{FAILURE_INTRO}\n");
    for package in report.failures() {
        output.push_str(&format!("\n### Package: {}\n", package.name));
        for error in &package.errors {
            output.push_str(&format!(
                "\n#### Check: **{}** ❌\n\n```\n{}\n```\n",
                error.rule, error.message
            ));
        }
    }
    output.push('\n');
    output.push_str(FAILURE_HINT);
    output.push('\n');
    output
}

/// Writes the summary for `report` to `out`.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_summary(report: &Report, out: &mut dyn Write) -> std::io::Result<()> {
    out.write_all(format_summary(report).as_bytes())
}
