//! Integration tests for the lsgo CLI
//!
//! Discovery is driven by a stand-in `go` script passed through
//! `--go-binary`, so these tests need a Unix shell.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn lsgo_cmd() -> Command {
    Command::cargo_bin("lsgo").unwrap()
}

#[test]
fn test_cli_help() {
    lsgo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-pattern"))
        .stdout(predicate::str::contains("--use-relative-path"));
}

#[test]
fn test_cli_version() {
    lsgo_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_print_default_config() {
    lsgo_cmd()
        .arg("--print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("exclude_cache: false"))
        .stdout(predicate::str::contains("Library/Caches"));
}

#[test]
fn test_invalid_skip_pattern_fails() {
    let temp_dir = tempdir().unwrap();

    lsgo_cmd()
        .current_dir(temp_dir.path())
        .args(["--skip-pattern", "[", "--go-binary", "/nonexistent/go"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid pattern"));
}

#[test]
fn test_missing_go_binary_fails() {
    let temp_dir = tempdir().unwrap();

    lsgo_cmd()
        .current_dir(temp_dir.path())
        .args(["--go-binary", "/nonexistent/go", "./..."])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("/nonexistent/go"));
}

#[cfg(unix)]
mod fake_toolchain {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Package listing printed by the stand-in toolchain. With `-test`, a
    /// synthesized test main from the build cache is listed as well.
    const GO_SCRIPT: &str = r#"#!/bin/sh
test_mode=0
for arg in "$@"; do
  [ "$arg" = "-test" ] && test_mode=1
done
cat <<'EOF'
{"Dir": "/work/app", "ImportPath": "example.com/app", "Name": "app",
 "GoFiles": ["main.go", "util.go"], "TestGoFiles": ["util_test.go"]}
{"Dir": "/work/app/internal", "ImportPath": "example.com/app/internal", "Name": "internal",
 "GoFiles": ["store.go"], "XTestGoFiles": ["store_ext_test.go"]}
EOF
if [ "$test_mode" = 1 ]; then
cat <<'EOF'
{"Dir": "/Users/dev/Library/Caches/go-build/ab", "ImportPath": "example.com/app.test", "Name": "main",
 "GoFiles": ["_testmain.go"]}
EOF
fi
"#;

    const FAILING_SCRIPT: &str = "#!/bin/sh\necho 'go: cannot find main module' >&2\nexit 1\n";

    fn write_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-go");
        fs::write(&path, body).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn cmd_with_fake_go(dir: &Path) -> Command {
        let script = write_script(dir, GO_SCRIPT);
        let mut cmd = lsgo_cmd();
        cmd.current_dir(dir).arg("--go-binary").arg(script);
        cmd
    }

    #[test]
    fn test_lists_package_files() {
        let temp_dir = tempdir().unwrap();

        cmd_with_fake_go(temp_dir.path())
            .assert()
            .success()
            .stdout("/work/app/main.go\n/work/app/util.go\n/work/app/internal/store.go\n");
    }

    #[test]
    fn test_include_tests_lists_test_files() {
        let temp_dir = tempdir().unwrap();

        cmd_with_fake_go(temp_dir.path())
            .arg("--include-tests")
            .assert()
            .success()
            .stdout(predicate::str::contains("/work/app/util_test.go"))
            .stdout(predicate::str::contains("/work/app/internal/store_ext_test.go"))
            .stdout(predicate::str::contains("_testmain.go"));
    }

    #[test]
    fn test_exclude_cache_drops_test_main() {
        let temp_dir = tempdir().unwrap();

        cmd_with_fake_go(temp_dir.path())
            .args(["--include-tests", "--exclude-cache"])
            .assert()
            .success()
            .stdout(predicate::str::contains("util_test.go"))
            .stdout(predicate::str::contains("Library/Caches").not());
    }

    #[test]
    fn test_skip_and_keep_patterns() {
        let temp_dir = tempdir().unwrap();

        cmd_with_fake_go(temp_dir.path())
            .args([
                "--include-tests",
                "--exclude-cache",
                "--skip-pattern",
                "_test\\.go$",
                "--keep-pattern",
                "/internal/",
            ])
            .assert()
            .success()
            .stdout("/work/app/internal/store.go\n");
    }

    #[test]
    fn test_config_file_sets_filters() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(".lsgo.yml"),
            "load:\n  tests: true\nfilters:\n  exclude_cache: true\n  keep_pattern: '_test\\.go$'\n",
        )
        .unwrap();

        cmd_with_fake_go(temp_dir.path())
            .assert()
            .success()
            .stdout("/work/app/util_test.go\n/work/app/internal/store_ext_test.go\n");
    }

    #[test]
    fn test_relative_paths_from_config_base() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(".lsgo.yml"),
            "output:\n  base_dir: /work/app\n",
        )
        .unwrap();

        cmd_with_fake_go(temp_dir.path())
            .arg("--use-relative-path")
            .assert()
            .success()
            .stdout("main.go\nutil.go\ninternal/store.go\n");
    }

    #[test]
    fn test_discovery_failure_exits_nonzero() {
        let temp_dir = tempdir().unwrap();
        let script = write_script(temp_dir.path(), FAILING_SCRIPT);

        lsgo_cmd()
            .current_dir(temp_dir.path())
            .arg("--go-binary")
            .arg(script)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("cannot find main module"));
    }
}
