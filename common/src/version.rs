//! Version directory naming.
//!
//! Each published version of a package lives in a child directory named after
//! the version number. The accepted names are described by a glob pattern so
//! that catalogs can relax the default single-digit `MAJOR.MINOR.PATCH` form.

use std::fmt;

use glob::{MatchOptions, Pattern, PatternError};

/// Glob accepted for version directories unless configured otherwise.
pub const DEFAULT_VERSION_PATTERN: &str = "[0-9].[0-9].[0-9]";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Compiled glob describing valid version directory names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPattern {
    pattern: Pattern,
}

impl VersionPattern {
    /// Compiles `source` into a version pattern.
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] reported by `glob` when `source` is not a
    /// valid glob.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalint_common::version::VersionPattern;
    ///
    /// let pattern = VersionPattern::new("[0-9].[0-9].[0-9]").expect("valid glob");
    /// assert!(pattern.matches("1.0.0"));
    /// assert!(!pattern.matches("1.0"));
    /// ```
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::new(source)?,
        })
    }

    /// Returns `true` when `name` is a valid version directory name.
    ///
    /// Matching is case-sensitive and a leading `.` is never matched by a
    /// wildcard, so hidden entries cannot pose as versions.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, MATCH_OPTIONS)
    }

    /// Returns the glob source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl fmt::Display for VersionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
