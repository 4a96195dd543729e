//! End-to-end behaviour tests for the `catalint` binary.
//!
//! Each test builds a catalog in a temporary directory and runs the binary
//! with that directory as its working directory.

use rstest::{fixture, rstest};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn file(&self, relative: &str, contents: &str) -> &Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, contents).expect("failed to write file");
        self
    }

    fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path().join(relative)).expect("failed to create dir");
        self
    }

    fn package(&self, name: &str) -> &Self {
        self.file(
            &format!("src/{name}/manifest.yaml"),
            &format!("name: {name}\ndescription: The {name} package\nversion: 1.0.0\n"),
        )
        .dir(&format!("src/{name}/1.0.0"))
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_catalint"))
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run catalint")
    }

    fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        temp: TempDir::new().expect("failed to create temp dir"),
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout was not UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr was not UTF-8")
}

#[rstest]
fn a_conformant_catalog_exits_zero(workspace: Workspace) {
    workspace.package("foo");

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Validating package: foo... OK"));
    assert!(text.contains("All checks passed ✅ Great job!"));
}

#[rstest]
fn a_yml_manifest_fails_the_extension_rule(workspace: Workspace) {
    workspace.package("foo");
    workspace
        .file(
            "src/bar/manifest.yml",
            "name: bar\ndescription: The bar package\nversion: 1.0.0\n",
        )
        .dir("src/bar/1.0.0");

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Validating package: bar... Found 2 errors:"));
    assert!(text.contains("#### Check: **no_yaml_extension** ❌"));
    assert!(text.contains("bar/manifest.yml"));
    assert!(!text.contains("### Package: foo"));
}

#[rstest]
fn a_missing_manifest_and_bad_version_report_two_rules(workspace: Workspace) {
    workspace.dir("src/baz/v1");

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Found 2 errors:"));
    assert!(text.contains("Check: missing_mandatory_files"));
    assert!(text.contains("Check: invalid_version_path"));
}

#[rstest]
fn a_stray_readme_fails_only_that_package(workspace: Workspace) {
    workspace.package("foo").package("qux");
    workspace.file("src/qux/README.md", "# qux\n");

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Validating package: foo... OK"));
    assert!(text.contains("### Package: qux"));
    assert!(text.contains("'README.md'"));
}

#[rstest]
fn repeated_runs_are_identical(workspace: Workspace) {
    workspace.package("foo");
    workspace.dir("src/Bad/0.1");

    let first = workspace.run(&[]);
    let second = workspace.run(&[]);

    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
}

#[rstest]
fn a_missing_root_exits_two(workspace: Workspace) {
    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("catalog root src is not a directory"));
}

#[rstest]
fn the_root_can_be_overridden(workspace: Workspace) {
    workspace
        .file(
            "packages/foo/manifest.yaml",
            "name: foo\ndescription: Foo\nversion: 1.0.0\n",
        )
        .dir("packages/foo/1.0.0");

    let output = workspace.run(&["--root", "packages"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[rstest]
fn catalog_configuration_is_discovered(workspace: Workspace) {
    workspace
        .file(
            "src/bar/manifest.yml",
            "name: bar\ndescription: Bar\nversion: 1.0.0\n",
        )
        .dir("src/bar/1.0.0")
        .file(
            "catalint.toml",
            "mandatory_files = []\nmanifest_extensions = [\"yaml\", \"yml\"]\n",
        );

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
}

#[rstest]
fn invalid_configuration_exits_two(workspace: Workspace) {
    workspace.package("foo").file("catalint.toml", "surprise = 1\n");

    let output = workspace.run(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid configuration"));
}

#[rstest]
fn a_missing_explicit_config_exits_two(workspace: Workspace) {
    workspace.package("foo");

    let output = workspace.run(&["--config", "nope.toml"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("nope.toml"));
}

#[rstest]
fn jsonl_output_lists_each_failure(workspace: Workspace) {
    workspace.package("foo").dir("src/baz/v1");

    let output = workspace.run(&["--jsonl", "failures.jsonl"]);

    assert_eq!(output.status.code(), Some(1));
    let records =
        fs::read_to_string(workspace.join("failures.jsonl")).expect("failed to read JSONL");
    let lines: Vec<_> = records.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with("{\"package\":\"baz\"")));
}

#[rstest]
fn verbose_runs_log_to_stderr_only(workspace: Workspace) {
    workspace.package("foo");

    let output = workspace.run(&["-vv"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("running missing_mandatory_files"));
    assert!(!stdout(&output).contains("running missing_mandatory_files"));
}
