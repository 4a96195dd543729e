//! catalint command-line library.
//!
//! This crate walks a catalog root, validates each package with
//! [`catalint::PackageValidator`], and renders the results. It backs the
//! `catalint` binary and can be driven directly in tests.
//!
//! # Modules
//!
//! - [`catalog`] - Package discovery and the per-package progress output
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Fatal error types
//! - [`jsonl`] - JSON Lines output of failures
//! - [`report`] - End-of-run summary formatting

pub mod catalog;
pub mod cli;
pub mod error;
pub mod jsonl;
pub mod report;

#[cfg(test)]
mod test_utils;
