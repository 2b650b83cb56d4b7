//! End-to-end runs of the step binary against fake `swift` and `envman`
//! scripts.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_SWIFT: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    if [ -n "$FAKE_SWIFT_VERSION_FAIL" ]; then
        echo "swift: toolchain is broken" >&2
        exit 1
    fi
    echo "Swift version 5.10.1 (swift-5.10.1-RELEASE)"
    echo "Target: x86_64-unknown-linux-gnu"
    exit 0
fi
echo "$@" > "$FAKE_SWIFT_ARGS"
echo "Compiling FakePackage main.swift"
echo "warning: FakePackage has no tests" >&2
exit "${FAKE_SWIFT_EXIT:-0}"
"#;

const FAKE_ENVMAN: &str = r#"#!/bin/sh
if [ -n "$FAKE_ENVMAN_FAIL" ]; then
    echo "envman: not configured" >&2
    exit 1
fi
echo "$@" > "$FAKE_ENVMAN_ARGS"
cat > "$FAKE_ENVMAN_VALUE"
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        write_script(&dir.path().join("swift"), FAKE_SWIFT);
        write_script(&dir.path().join("envman"), FAKE_ENVMAN);
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("swiftstep-build").unwrap();
        for key in ["build_path", "configuration", "build_tests", "disable_sandbox", "SWIFTSTEP_VARIANT", "RUST_LOG"] {
            cmd.env_remove(key);
        }
        cmd.env("SWIFTSTEP_SWIFT", self.path("swift"))
            .env("SWIFTSTEP_ENVMAN", self.path("envman"))
            .env("FAKE_SWIFT_ARGS", self.path("swift.args"))
            .env("FAKE_ENVMAN_ARGS", self.path("envman.args"))
            .env("FAKE_ENVMAN_VALUE", self.path("envman.value"));
        cmd
    }

    fn read(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path(name)).ok()
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[test]
fn test_invalid_input_fails_before_build() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .env("build_path", "/tmp/out")
        .env("configuration", "release")
        .env("build_tests", "maybe")
        .env("disable_sandbox", "no")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Issue with input: Invalid input: (build_tests) value: (maybe), valid options: yes, no",
        ));

    assert!(sandbox.read("swift.args").is_none());
}

#[test]
fn test_missing_input_is_named() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .env("configuration", "debug")
        .env("build_tests", "no")
        .env("disable_sandbox", "no")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required input: build_path"));
}

#[test]
fn test_successful_build_exports_executable_path() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .env("build_path", "/out")
        .env("configuration", "debug")
        .env("build_tests", "yes")
        .env("disable_sandbox", "no")
        .assert()
        .success()
        .stdout(predicate::str::contains("- BuildPath: /out"))
        .stdout(predicate::str::contains(
            "swift_version: 5.10.1 (x86_64-unknown-linux-gnu)",
        ))
        .stdout(predicate::str::contains(
            "build --build-path /out --configuration debug --build-tests",
        ));

    assert_eq!(
        sandbox.read("swift.args").unwrap().trim(),
        "build --build-path /out --configuration debug --build-tests"
    );
    assert_eq!(
        sandbox.read("envman.args").unwrap().trim(),
        "add --key BITRISE_EXECUTABLE_PATH"
    );
    assert_eq!(sandbox.read("envman.value").unwrap(), "/out/debug");
}

#[test]
fn test_build_failure_exits_one_without_export() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .env("build_path", "/out")
        .env("configuration", "release")
        .env("build_tests", "no")
        .env("disable_sandbox", "yes")
        .env("FAKE_SWIFT_EXIT", "1")
        .assert()
        .code(1)
        .stderr(predicate::function(|err: &str| {
            err.matches("Build failed").count() == 1
        }))
        .stderr(predicate::str::contains("Build failed, error: exit status 1"));

    assert!(sandbox.read("swift.args").is_some());
    assert!(sandbox.read("envman.args").is_none());
}

#[test]
fn test_export_failure_is_only_a_warning() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .env("build_path", "/out")
        .env("configuration", "release")
        .env("build_tests", "no")
        .env("disable_sandbox", "no")
        .env("FAKE_ENVMAN_FAIL", "1")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Failed to export: BITRISE_EXECUTABLE_PATH, error:",
        ))
        .stderr(predicate::function(|err: &str| {
            err.matches("Failed to export").count() == 1
        }));
}

#[test]
fn test_command_is_printed_before_build_output_streams() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .command()
        .env("build_path", "/out")
        .env("configuration", "debug")
        .env("build_tests", "no")
        .env("disable_sandbox", "no")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let command_line = stdout
        .lines()
        .position(|l| l.contains("swift build --build-path /out --configuration debug"))
        .expect("rendered command in stdout");
    let build_line = stdout
        .lines()
        .position(|l| l.contains("Compiling FakePackage main.swift"))
        .expect("swift build stdout passed through");

    assert!(stdout.lines().nth(command_line).unwrap().contains('$'));
    assert!(command_line < build_line);
    assert!(stderr.contains("warning: FakePackage has no tests"));
}

#[test]
fn test_toolchain_probe_failure_is_fatal() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .env("build_path", "/out")
        .env("configuration", "debug")
        .env("build_tests", "no")
        .env("disable_sandbox", "no")
        .env("FAKE_SWIFT_VERSION_FAIL", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to get the version of swift!"));

    assert!(sandbox.read("swift.args").is_none());
}

#[test]
fn test_plain_variant_skips_configuration() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .arg("--variant")
        .arg("plain")
        .env("build_path", ".build")
        .env("build_tests", "no")
        .env("disable_sandbox", "yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration").not());

    assert_eq!(
        sandbox.read("swift.args").unwrap().trim(),
        "build --build-path .build --disable-sandbox"
    );
    assert!(sandbox.read("envman.args").is_none());
}
