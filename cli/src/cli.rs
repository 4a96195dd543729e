//! CLI argument definitions for catalint.
//!
//! Running `catalint` with no arguments checks every package under `src`
//! using `catalint.toml` from the working directory when present.

use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Catalog root used when `--root` is not given.
pub const DEFAULT_ROOT: &str = "src";

/// Check every package in a versioned catalog.
#[derive(Parser, Debug, Clone)]
#[command(name = "catalint")]
#[command(version, about)]
#[command(long_about = concat!(
    "Check every package in a versioned catalog.\n\n",
    "Each directory under the catalog root is a package. A package holds a YAML ",
    "manifest and one directory per released version (such as 1.0.0). Every ",
    "package is checked against the full rule set and a report is printed to ",
    "stdout. The exit status is 0 when every package passes, 1 when any package ",
    "fails, and 2 when the catalog or configuration cannot be used.",
))]
#[command(after_help = concat!(
    "RULES:\n",
    "  missing_mandatory_files    Mandatory files must exist in the package root\n",
    "  invalid_version_path       Only version directories may sit beside the manifest\n",
    "  invalid_package_name       Package directory names must be lowercase identifiers\n",
    "  incoherent_path            Manifest name and version must match the layout\n",
    "  missing_manifest_fields    The manifest must define every mandatory field\n",
    "  invalid_yaml               Every manifest must be valid YAML\n",
    "  no_yaml_extension          Manifests must use an accepted extension\n\n",
    "EXAMPLES:\n",
    "  Check the catalog under ./src:\n",
    "    $ catalint\n\n",
    "  Check another catalog with a custom policy:\n",
    "    $ catalint --root packages --config ci/catalint.toml\n\n",
    "  Also write machine-readable failures:\n",
    "    $ catalint --jsonl target/catalint.jsonl\n",
))]
pub struct Cli {
    /// Catalog root containing one directory per package.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub root: Utf8PathBuf,

    /// Configuration file [default: ./catalint.toml when present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Also write one JSON object per failure to FILE.
    #[arg(long, value_name = "FILE")]
    pub jsonl: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Maps the `-v` count to a log level, starting from `warn`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalint_cli::cli::Cli;
    /// use log::LevelFilter;
    ///
    /// let cli = Cli { verbosity: 2, ..Cli::default() };
    /// assert_eq!(cli.log_level(), LevelFilter::Debug);
    /// ```
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl Default for Cli {
    /// Matches a bare `catalint` invocation.
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from(DEFAULT_ROOT),
            config: None,
            jsonl: None,
            verbosity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bare_invocation_matches_the_default() {
        let cli = Cli::parse_from(["catalint"]);
        assert_eq!(cli.root, Utf8PathBuf::from("src"));
        assert!(cli.config.is_none());
        assert!(cli.jsonl.is_none());
        assert_eq!(cli.verbosity, Cli::default().verbosity);
    }

    #[rstest]
    fn parses_every_flag() {
        let cli = Cli::parse_from([
            "catalint",
            "--root",
            "packages",
            "--config",
            "ci/catalint.toml",
            "--jsonl",
            "out.jsonl",
            "-vv",
        ]);

        assert_eq!(cli.root, Utf8PathBuf::from("packages"));
        assert_eq!(cli.config, Some(Utf8PathBuf::from("ci/catalint.toml")));
        assert_eq!(cli.jsonl, Some(Utf8PathBuf::from("out.jsonl")));
        assert_eq!(cli.verbosity, 2);
    }

    #[rstest]
    #[case::quiet(0, LevelFilter::Warn)]
    #[case::info(1, LevelFilter::Info)]
    #[case::debug(2, LevelFilter::Debug)]
    #[case::trace(3, LevelFilter::Trace)]
    #[case::saturates(7, LevelFilter::Trace)]
    fn verbosity_raises_the_log_level(#[case] verbosity: u8, #[case] expected: LevelFilter) {
        let cli = Cli {
            verbosity,
            ..Cli::default()
        };
        assert_eq!(cli.log_level(), expected);
    }

    #[rstest]
    fn rejects_unknown_flags() {
        let err = Cli::try_parse_from(["catalint", "--fix"]).expect_err("expected a parse error");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
