//! Package discovery backed by `go list -json`.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::errors::{LsgoError, Result};

use super::{LoadConfig, PackageLoader, PackageRecord};

/// One package object from `go list -json`. Only the fields we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListPackage {
    #[serde(default)]
    dir: String,
    #[serde(default)]
    import_path: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    go_files: Vec<String>,
    #[serde(default)]
    cgo_files: Vec<String>,
    #[serde(default)]
    test_go_files: Vec<String>,
    #[serde(default)]
    x_test_go_files: Vec<String>,
    #[serde(default)]
    error: Option<GoListError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListError {
    #[serde(default)]
    err: String,
}

/// Resolves patterns by running the Go toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoListLoader;

impl GoListLoader {
    pub fn new() -> Self {
        Self
    }

    /// Arguments passed after the binary name.
    fn command_args(config: &LoadConfig, patterns: &[String]) -> Vec<String> {
        let mut args = vec!["list".to_string(), "-e".to_string(), "-json".to_string()];
        if config.tests {
            args.push("-test".to_string());
        }
        args.extend(config.build_flags.iter().cloned());
        args.push("--".to_string());
        args.extend(patterns.iter().cloned());
        args
    }

    fn run(config: &LoadConfig, patterns: &[String]) -> Result<Vec<u8>> {
        let args = Self::command_args(config, patterns);
        debug!(binary = %config.go_binary, ?args, "Running package discovery");

        let mut command = Command::new(&config.go_binary);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &config.dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| {
            LsgoError::discovery(
                format!("failed to run '{}': {e}", config.go_binary),
                patterns,
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LsgoError::discovery(
                format!(
                    "'{} list' failed with exit code {}: {}",
                    config.go_binary,
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
                patterns,
            ));
        }

        Ok(output.stdout)
    }

    /// Decode the concatenated JSON objects `go list -json` prints.
    fn parse(stdout: &[u8], config: &LoadConfig, patterns: &[String]) -> Result<Vec<PackageRecord>> {
        let stream = serde_json::Deserializer::from_slice(stdout).into_iter::<GoListPackage>();
        let mut records = Vec::new();

        for package in stream {
            let package = package.map_err(|e| {
                LsgoError::discovery(format!("malformed go list output: {e}"), patterns)
            })?;

            if let Some(error) = &package.error {
                warn!(package = %package.import_path, "go list reported: {}", error.err);
            }
            records.push(Self::to_record(package, config));
        }

        Ok(records)
    }

    fn to_record(package: GoListPackage, config: &LoadConfig) -> PackageRecord {
        let dir = Path::new(&package.dir);
        let mut files = Vec::new();

        if config.need_files {
            let mut names: Vec<&String> =
                package.go_files.iter().chain(&package.cgo_files).collect();
            if config.tests {
                names.extend(package.test_go_files.iter().chain(&package.x_test_go_files));
            }
            files = names
                .into_iter()
                .map(|name| dir.join(name).to_string_lossy().into_owned())
                .collect();
        }

        PackageRecord {
            name: if config.need_name {
                package.name
            } else {
                String::new()
            },
            import_path: package.import_path,
            dir: (!package.dir.is_empty()).then(|| dir.to_path_buf()),
            files,
        }
    }
}

impl PackageLoader for GoListLoader {
    fn load(&self, config: &LoadConfig, patterns: &[String]) -> Result<Vec<PackageRecord>> {
        let stdout = Self::run(config, patterns)?;
        Self::parse(&stdout, config, patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PACKAGES: &str = r#"{
	"Dir": "/src/app",
	"ImportPath": "example.com/app",
	"Name": "main",
	"GoFiles": ["main.go", "util.go"],
	"TestGoFiles": ["main_test.go"]
}
{
	"Dir": "/src/app/lib",
	"ImportPath": "example.com/app/lib",
	"Name": "lib",
	"GoFiles": ["lib.go"],
	"CgoFiles": ["native.go"],
	"XTestGoFiles": ["lib_ext_test.go"],
	"Error": {"Err": "build constraints exclude all Go files"}
}
"#;

    fn patterns() -> Vec<String> {
        vec!["./...".to_string()]
    }

    #[test]
    fn command_args_place_patterns_after_separator() {
        let mut config = LoadConfig::default();
        config.build_flags = vec!["-tags=integration".into()];
        let args = GoListLoader::command_args(&config, &["./cmd/...".into()]);
        assert_eq!(args, vec!["list", "-e", "-json", "-tags=integration", "--", "./cmd/..."]);

        let args = GoListLoader::command_args(&config.need_tests(), &patterns());
        assert_eq!(args[3], "-test");
    }

    #[test]
    fn parse_joins_files_onto_package_dir() {
        let records =
            GoListLoader::parse(TWO_PACKAGES.as_bytes(), &LoadConfig::default(), &patterns())
                .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "main");
        assert_eq!(records[0].import_path, "example.com/app");
        assert_eq!(records[0].files, vec!["/src/app/main.go", "/src/app/util.go"]);
        assert_eq!(records[1].files, vec!["/src/app/lib/lib.go", "/src/app/lib/native.go"]);
        assert_eq!(records[1].dir.as_deref(), Some(Path::new("/src/app/lib")));
    }

    #[test]
    fn parse_includes_test_files_when_requested() {
        let config = LoadConfig::default().need_tests();
        let records = GoListLoader::parse(TWO_PACKAGES.as_bytes(), &config, &patterns()).unwrap();

        assert_eq!(
            records[0].files,
            vec!["/src/app/main.go", "/src/app/util.go", "/src/app/main_test.go"]
        );
        assert!(records[1].files.contains(&"/src/app/lib/lib_ext_test.go".to_string()));
    }

    #[test]
    fn parse_respects_need_flags() {
        let records =
            GoListLoader::parse(TWO_PACKAGES.as_bytes(), &LoadConfig::empty(), &patterns())
                .unwrap();
        assert!(records.iter().all(|r| r.name.is_empty() && r.files.is_empty()));
        assert_eq!(records[1].import_path, "example.com/app/lib");
    }

    #[test]
    fn absolute_file_names_are_kept() {
        let json = r#"{"Dir": "/src/app", "ImportPath": "example.com/app.test", "GoFiles": ["/cache/go-build/ab/_testmain.go"]}"#;
        let records =
            GoListLoader::parse(json.as_bytes(), &LoadConfig::default(), &patterns()).unwrap();
        assert_eq!(records[0].files, vec!["/cache/go-build/ab/_testmain.go"]);
    }

    #[test]
    fn malformed_output_is_a_discovery_error() {
        let err = GoListLoader::parse(b"{\"Dir\": ", &LoadConfig::default(), &patterns())
            .unwrap_err();
        assert!(matches!(err, LsgoError::Discovery { .. }));
    }

    #[test]
    fn empty_output_yields_no_records() {
        let records = GoListLoader::parse(b"", &LoadConfig::default(), &patterns()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_binary_is_a_discovery_error() {
        let config = LoadConfig::default().with_go_binary("/nonexistent/lsgo-test-go");
        let err = GoListLoader::new().load(&config, &patterns()).unwrap_err();
        match err {
            LsgoError::Discovery { message, patterns } => {
                assert!(message.contains("/nonexistent/lsgo-test-go"));
                assert_eq!(patterns, vec!["./..."]);
            }
            other => panic!("expected Discovery error, got {other:?}"),
        }
    }
}
