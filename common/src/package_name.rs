//! Validated package names.
//!
//! A package is identified by the base name of its directory under the catalog
//! root. [`PackageName::parse`] enforces the naming policy: lowercase ASCII
//! letters, digits, and the separators `-` and `_`, starting with a letter or
//! digit, with no leading, trailing, or doubled separators, and no longer than
//! the configured maximum.

use std::fmt;

use thiserror::Error;

/// Default upper bound on the number of characters in a package name.
pub const DEFAULT_MAX_LENGTH: usize = 64;

/// Reasons a directory name is rejected as a package name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackageNameError {
    /// The name is empty.
    #[error("package name must not be empty")]
    Empty,

    /// The name has more characters than allowed.
    #[error("package name '{name}' is {length} characters long; the limit is {max}")]
    TooLong {
        /// The rejected name.
        name: String,
        /// Number of characters in the name.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The name contains an uppercase letter.
    #[error("package name '{name}' must be lowercase (found '{character}')")]
    Uppercase {
        /// The rejected name.
        name: String,
        /// First uppercase character encountered.
        character: char,
    },

    /// The name contains a character outside the allowed set.
    #[error(
        "package name '{name}' contains '{character}'; only lowercase letters, digits, '-' and '_' are allowed"
    )]
    InvalidCharacter {
        /// The rejected name.
        name: String,
        /// First disallowed character encountered.
        character: char,
    },

    /// The directory name is not valid UTF-8.
    #[error("package name '{name}' is not valid UTF-8")]
    NotUtf8 {
        /// The name, lossily decoded.
        name: String,
    },

    /// The name starts or ends with a separator, or repeats one.
    #[error("package name '{name}' must not start or end with '-'/'_' or repeat them")]
    MisplacedSeparator {
        /// The rejected name.
        name: String,
    },
}

/// A package name that satisfies the naming policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    /// Validates `raw` against the naming policy.
    ///
    /// Checks run in a fixed order and the first violation is returned, so a
    /// name such as `Bad Name` reports the uppercase letter before the space.
    ///
    /// # Errors
    ///
    /// Returns a [`PackageNameError`] describing the first violated constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalint_common::package_name::{PackageName, PackageNameError};
    ///
    /// let name = PackageName::parse("json-schema", 64).expect("valid name");
    /// assert_eq!(name.as_str(), "json-schema");
    ///
    /// let err = PackageName::parse("JsonSchema", 64).expect_err("uppercase is rejected");
    /// assert!(matches!(err, PackageNameError::Uppercase { character: 'J', .. }));
    /// ```
    pub fn parse(raw: &str, max_length: usize) -> Result<Self, PackageNameError> {
        if raw.is_empty() {
            return Err(PackageNameError::Empty);
        }

        let length = raw.chars().count();
        if length > max_length {
            return Err(PackageNameError::TooLong {
                name: raw.to_owned(),
                length,
                max: max_length,
            });
        }

        if let Some(character) = raw.chars().find(char::is_ascii_uppercase) {
            return Err(PackageNameError::Uppercase {
                name: raw.to_owned(),
                character,
            });
        }

        if let Some(character) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || is_separator(*c)))
        {
            return Err(PackageNameError::InvalidCharacter {
                name: raw.to_owned(),
                character,
            });
        }

        if has_misplaced_separator(raw) {
            return Err(PackageNameError::MisplacedSeparator {
                name: raw.to_owned(),
            });
        }

        Ok(Self(raw.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_')
}

fn has_misplaced_separator(raw: &str) -> bool {
    let starts = raw.chars().next().is_some_and(is_separator);
    let ends = raw.chars().next_back().is_some_and(is_separator);
    let doubled = raw
        .chars()
        .zip(raw.chars().skip(1))
        .any(|(a, b)| is_separator(a) && is_separator(b));

    starts || ends || doubled
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
