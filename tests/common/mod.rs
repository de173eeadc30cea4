#![allow(dead_code)]

use std::path::Path;

use xccov_report::error::Result;
use xccov_report::logger::Logger;
use xccov_report::options::Options;
use xccov_report::xccov::{CoverageService, Repository};

pub const TARGETS_JSON: &str = r#"[
  {
    "coveredLines": 100,
    "lineCoverage": 0.75187969924812026,
    "name": "MyTarget.app",
    "executableLines": 133,
    "buildProductPath": "/Build/Products/Debug-iphonesimulator/MyTarget.app/MyTarget"
  },
  {
    "coveredLines": 25,
    "lineCoverage": 0.25,
    "name": "MyTargetTests.framework",
    "executableLines": 100,
    "buildProductPath": "/Build/Products/Debug-iphonesimulator/MyTargetTests.framework/MyTargetTests"
  },
  {
    "coveredLines": 4234,
    "lineCoverage": 0.11789274377680014,
    "name": "SomeFramework.framework",
    "executableLines": 35914,
    "buildProductPath": "/Build/Products/Debug-iphonesimulator/SomeFramework.framework/SomeFramework"
  }
]"#;

pub const FILES_JSON: &str = r#"[
  {
    "product": "/Build/Products/Debug-iphonesimulator/MyTarget.app/MyTarget",
    "files": [
      {"coveredLines": 58, "lineCoverage": 0.18471337579617833, "path": "/src/AView.swift",
       "name": "AView.swift", "executableLines": 314},
      {"coveredLines": 13, "lineCoverage": 0.68421052631578949, "path": "/src/APresenter.swift",
       "name": "APresenter.swift", "executableLines": 19},
      {"coveredLines": 400, "lineCoverage": 1, "path": "/src/BView.swift",
       "name": "BView.swift", "executableLines": 400},
      {"coveredLines": 0, "lineCoverage": 0, "path": "/src/BPresenter.swift",
       "name": "BPresenter.swift", "executableLines": 27},
      {"coveredLines": 201, "lineCoverage": 1, "path": "/src/Repository.swift",
       "name": "Repository.swift", "executableLines": 201},
      {"coveredLines": 388, "lineCoverage": 0.85840707964601770, "path": "/src/Service.swift",
       "name": "Service.swift", "executableLines": 452}
    ]
  },
  {
    "product": "/Build/Products/Debug-iphonesimulator/Ignored.framework/Ignored",
    "files": []
  }
]"#;

/// Serves canned JSON in place of `xcrun xccov`.
pub struct FixtureService {
    pub targets: String,
    pub report: String,
}

impl CoverageService for FixtureService {
    fn available_targets(&self, _bundle: &Path) -> Result<String> {
        Ok(self.targets.clone())
    }

    fn raw_coverage_report(&self, _target: &str, _bundle: &Path) -> Result<String> {
        Ok(self.report.clone())
    }
}

pub fn repository() -> Repository<FixtureService> {
    repository_with(TARGETS_JSON, FILES_JSON)
}

pub fn repository_with(targets: &str, report: &str) -> Repository<FixtureService> {
    Repository::new(FixtureService {
        targets: targets.to_string(),
        report: report.to_string(),
    })
}

pub fn quiet_logger() -> Logger {
    let mut log = Logger::with_color(false);
    log.set_quiet(true);
    log
}

/// Options resolved from a command line, as the binary would see them.
pub fn options_for(tokens: &[&str]) -> Options {
    let arguments: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    let mut options = Options::new();
    options
        .evaluate(&arguments, &mut quiet_logger())
        .unwrap();
    options
}
