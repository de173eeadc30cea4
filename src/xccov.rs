//! Access to coverage data inside a result bundle.
//!
//! A [`CoverageService`] produces raw JSON (normally by running
//! `xcrun xccov`), and a [`Repository`] decodes it into report items.
use std::path::Path;
use std::process::Command;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{CoverageError, Result};
use crate::logger::Logger;
use crate::model::{CoverageItem, CoverageReport};

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// A source of raw coverage JSON for a result bundle.
pub trait CoverageService {
    /// JSON array of all targets in the bundle.
    fn available_targets(&self, bundle: &Path) -> Result<String>;

    /// JSON array of per-target file reports for `target`.
    fn raw_coverage_report(&self, target: &str, bundle: &Path) -> Result<String>;
}

/// Runs `xcrun xccov view` against the bundle.
pub struct XccovService;

impl XccovService {
    fn view(&self, args: &[&str], bundle: &Path) -> Result<String> {
        let output = Command::new("xcrun")
            .args(["xccov", "view", "--report"])
            .args(args)
            .arg("--json")
            .arg(bundle)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoverageError::Tool(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| CoverageError::Tool("xccov output not valid UTF-8".to_string()))?;
        remove_warnings(&stdout)
    }
}

impl CoverageService for XccovService {
    fn available_targets(&self, bundle: &Path) -> Result<String> {
        self.view(&["--only-targets"], bundle)
    }

    fn raw_coverage_report(&self, target: &str, bundle: &Path) -> Result<String> {
        self.view(&["--files-for-target", target], bundle)
    }
}

const WARNING_PATTERN: &str = r"xccov\[\d+:[0-9a-fA-Fx]+\]";

/// Drop the `xccov[pid:tid]` warning lines the tool mixes into its output.
pub fn remove_warnings(output: &str) -> Result<String> {
    let pattern = Regex::new(WARNING_PATTERN)
        .map_err(|e| CoverageError::Other(format!("invalid warning pattern: {e}")))?;
    Ok(output
        .lines()
        .filter(|line| !pattern.is_match(line))
        .collect::<Vec<_>>()
        .join("\n"))
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Decodes service output into report items.
pub struct Repository<S> {
    service: S,
}

impl Repository<XccovService> {
    pub fn xccov() -> Self {
        Self::new(XccovService)
    }
}

impl<S: CoverageService> Repository<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// All targets in the bundle. Fails with `EmptyReport` if there are none.
    pub fn available_targets(&self, bundle: &Path, log: &Logger) -> Result<Vec<CoverageItem>> {
        let raw = self.service.available_targets(bundle)?;
        let targets: Vec<CoverageItem> = decode(&raw, log)?;

        if targets.is_empty() {
            return Err(CoverageError::EmptyReport);
        }
        Ok(targets)
    }

    /// File report for one target. Only the first report in the output is used.
    pub fn coverage_report(
        &self,
        target: &str,
        bundle: &Path,
        log: &Logger,
    ) -> Result<CoverageReport> {
        let raw = self.service.raw_coverage_report(target, bundle)?;
        let reports: Vec<CoverageReport> = decode(&raw, log)?;

        reports.into_iter().next().ok_or(CoverageError::EmptyReport)
    }
}

fn decode<T: DeserializeOwned>(raw: &str, log: &Logger) -> Result<T> {
    log.debug(raw);
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockService {
        targets: String,
        report: String,
    }

    impl CoverageService for MockService {
        fn available_targets(&self, _bundle: &Path) -> Result<String> {
            Ok(self.targets.clone())
        }

        fn raw_coverage_report(&self, _target: &str, _bundle: &Path) -> Result<String> {
            Ok(self.report.clone())
        }
    }

    fn repository(targets: &str, report: &str) -> Repository<MockService> {
        Repository::new(MockService {
            targets: targets.to_string(),
            report: report.to_string(),
        })
    }

    fn log() -> Logger {
        Logger::with_color(false)
    }

    #[test]
    fn test_available_targets() {
        let repo = repository(
            r#"[
                {"coveredLines": 100, "lineCoverage": 0.7512345, "name": "MyTarget.app",
                 "executableLines": 133, "buildProductPath": "X"},
                {"coveredLines": 25, "lineCoverage": 0.25, "name": "MyTargetTests.framework",
                 "executableLines": 100, "buildProductPath": "X"},
                {"coveredLines": 4234, "lineCoverage": 0.117892, "name": "SomeFramework.framework",
                 "executableLines": 35914, "buildProductPath": "X"}
            ]"#,
            "[]",
        );

        let targets = repo.available_targets(Path::new(""), &log()).unwrap();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].name, "MyTarget.app");
        assert_eq!(targets[0].covered_lines, 100);
        assert_eq!(targets[0].executable_lines, 133);
        assert_eq!(targets[0].line_coverage, 0.7512345);
        assert_eq!(targets[2].name, "SomeFramework.framework");
        assert_eq!(targets[2].line_coverage, 0.117892);
    }

    #[test]
    fn test_coverage_report() {
        let repo = repository(
            "[]",
            r#"[{
                "product": "/Build/Products/MyApplication.app/MyApplication",
                "files": [
                    {"coveredLines": 58, "lineCoverage": 0.1847133758, "path": "",
                     "name": "File1.swift", "executableLines": 314},
                    {"coveredLines": 400, "lineCoverage": 1, "path": "",
                     "name": "File3.swift", "executableLines": 400},
                    {"coveredLines": 0, "lineCoverage": 0, "path": "",
                     "name": "File4.swift", "executableLines": 27}
                ]
            }]"#,
        );

        let report = repo
            .coverage_report("MyApplication.app", Path::new(""), &log())
            .unwrap();
        assert_eq!(report.product, "/Build/Products/MyApplication.app/MyApplication");
        assert_eq!(report.files.len(), 3);
        assert_eq!(report.files[1].line_coverage, 1.0);
        assert_eq!(report.files[2].covered_lines, 0);
    }

    #[test]
    fn test_empty_targets() {
        let repo = repository("[]", "[]");
        let err = repo.available_targets(Path::new(""), &log()).unwrap_err();
        assert!(matches!(err, CoverageError::EmptyReport));
        assert_eq!(err.to_string(), "no data found in report, cannot proceed");
    }

    #[test]
    fn test_empty_report() {
        let repo = repository("[]", "[]");
        let err = repo
            .coverage_report("Target", Path::new(""), &log())
            .unwrap_err();
        assert!(matches!(err, CoverageError::EmptyReport));
    }

    #[test]
    fn test_malformed_json() {
        let repo = repository("not json", "[]");
        let err = repo.available_targets(Path::new(""), &log()).unwrap_err();
        assert!(matches!(err, CoverageError::Json(_)));
    }

    #[test]
    fn test_remove_warnings() {
        let output = "2023-01-01 10:00:00.000 xccov[12345:0x1a2b3c] warning: something\n\
                      [\n  {\"name\": \"xccov[not-a-warning]\"}\n]";
        let cleaned = remove_warnings(output).unwrap();
        assert!(!cleaned.contains("warning: something"));
        assert!(cleaned.starts_with('['));
        assert!(cleaned.contains("xccov[not-a-warning]"));
    }
}
