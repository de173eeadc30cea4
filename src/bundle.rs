//! Locating result bundles and writing finished reports next to them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use walkdir::WalkDir;

use crate::error::{CoverageError, Result};
use crate::logger::Logger;
use crate::options::RESULT_BUNDLE_EXTENSION;

const REPORT_SUFFIX: &str = "-report.txt";

/// Find the most recently modified result bundle anywhere under `dir`.
///
/// Bundles are directories, so the walk does not descend into one once it
/// has been found.
pub fn latest_result_bundle(dir: &Path, log: &Logger) -> Result<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    let mut walker = WalkDir::new(dir).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_dir() || !is_bundle_name(entry.file_name().to_str()) {
            continue;
        }
        walker.skip_current_dir();

        let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
            continue;
        };
        if latest.as_ref().map_or(true, |(newest, _)| modified > *newest) {
            latest = Some((modified, entry.into_path()));
        }
    }

    let (modified, path) =
        latest.ok_or_else(|| CoverageError::NoResultBundle(dir.to_path_buf()))?;

    let modified: DateTime<Local> = modified.into();
    log.info(&format!(
        "using latest result bundle {} (modified {})",
        path.display(),
        modified.format("%Y-%m-%d %H:%M:%S")
    ));
    Ok(path)
}

fn is_bundle_name(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.ends_with(RESULT_BUNDLE_EXTENSION))
}

/// File name of the written report for `bundle`.
pub fn report_file_name(bundle: &Path) -> Result<String> {
    let name = bundle
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            CoverageError::Other(format!(
                "cannot derive a report file name from {}",
                bundle.display()
            ))
        })?;

    let stem = name.strip_suffix(RESULT_BUNDLE_EXTENSION).unwrap_or(name);
    Ok(format!("{stem}{REPORT_SUFFIX}"))
}

/// Write `report` into `out_dir`, named after `bundle`. Returns the path written.
pub fn write_report(report: &str, bundle: &Path, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(report_file_name(bundle)?);
    fs::write(&path, report)?;
    Ok(path)
}
