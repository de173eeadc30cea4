//! Coverage line items as reported by `xccov`. A target and a file share the
//! same shape, so both are represented by [`CoverageItem`].

use serde::Deserialize;

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Format a 0.0–1.0 rate as a percentage with one decimal place, e.g. "75.1%".
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// One line of a report: a build target or a source file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageItem {
    pub name: String,
    pub line_coverage: f64,
    pub covered_lines: u64,
    pub executable_lines: u64,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub build_product_path: Option<String>,
}

impl CoverageItem {
    /// Create an item whose `line_coverage` is derived from the line counts.
    pub fn new(name: impl Into<String>, covered_lines: u64, executable_lines: u64) -> Self {
        Self {
            name: name.into(),
            line_coverage: rate(covered_lines, executable_lines),
            covered_lines,
            executable_lines,
            path: None,
            build_product_path: None,
        }
    }

    /// Lines still needing coverage.
    #[must_use]
    pub fn gap(&self) -> u64 {
        self.executable_lines.saturating_sub(self.covered_lines)
    }

    #[must_use]
    pub fn is_fully_covered(&self) -> bool {
        self.covered_lines == self.executable_lines
    }

    #[must_use]
    pub fn formatted_line_coverage(&self) -> String {
        format_percentage(self.line_coverage)
    }
}

/// Per-target file report.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageReport {
    #[serde(default)]
    pub product: String,
    pub files: Vec<CoverageItem>,
}

/// What the items of a report represent; used for the footer label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Target,
    File,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Target => "target",
            ItemKind::File => "file",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
