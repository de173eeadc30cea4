//! Named orderings for report items.

use std::cmp::Ordering;

use crate::error::CoverageError;
use crate::model::CoverageItem;

/// How report items are ordered. The declaration order is significant: `-s`
/// accepts either a name or an index into [`SortMode::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Alphabetical,
    /// Highest coverage percentage at the top.
    HighestCoverage,
    /// Lowest coverage percentage at the top.
    LowestCoverage,
    /// Most executable lines at the top.
    MostLines,
    /// Biggest difference between executable and covered lines at the top.
    BiggestGap,
    /// Smallest difference between executable and covered lines at the top.
    /// Fully covered items are dropped from the report.
    SmallestGap,
}

impl SortMode {
    pub const ALL: [SortMode; 6] = [
        SortMode::Alphabetical,
        SortMode::HighestCoverage,
        SortMode::LowestCoverage,
        SortMode::MostLines,
        SortMode::BiggestGap,
        SortMode::SmallestGap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Alphabetical => "alphabetical",
            SortMode::HighestCoverage => "highestCoverage",
            SortMode::LowestCoverage => "lowestCoverage",
            SortMode::MostLines => "mostLines",
            SortMode::BiggestGap => "biggestGap",
            SortMode::SmallestGap => "smallestGap",
        }
    }

    /// Names of all modes, in index order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(SortMode::as_str).collect()
    }

    /// Resolve an exact (case-sensitive) name or a numeric index.
    pub fn from_name_or_index(value: &str) -> Option<SortMode> {
        if let Ok(mode) = value.parse() {
            return Some(mode);
        }
        value
            .parse::<usize>()
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Compare two items under this mode. Suitable for a stable sort.
    pub fn compare(&self, a: &CoverageItem, b: &CoverageItem) -> Ordering {
        match self {
            SortMode::Alphabetical => alphabetical(a, b),
            SortMode::HighestCoverage => by_coverage(a, b, |x, y| y.total_cmp(&x)),
            SortMode::LowestCoverage => by_coverage(a, b, |x, y| x.total_cmp(&y)),
            SortMode::MostLines => b.executable_lines.cmp(&a.executable_lines),
            SortMode::BiggestGap => b.gap().cmp(&a.gap()),
            SortMode::SmallestGap => a.gap().cmp(&b.gap()),
        }
    }

    /// Sort items in place (stable).
    pub fn sort(&self, items: &mut [CoverageItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

fn alphabetical(a: &CoverageItem, b: &CoverageItem) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Items that display the same percentage fall back to alphabetical order,
/// so the order never depends on digits the report doesn't show.
fn by_coverage(
    a: &CoverageItem,
    b: &CoverageItem,
    primary: impl Fn(f64, f64) -> Ordering,
) -> Ordering {
    if a.formatted_line_coverage() == b.formatted_line_coverage() {
        return alphabetical(a, b);
    }
    primary(a.line_coverage, b.line_coverage)
}

impl std::str::FromStr for SortMode {
    type Err = CoverageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SortMode::ALL
            .iter()
            .find(|mode| mode.as_str() == s)
            .copied()
            .ok_or_else(|| {
                CoverageError::Other(format!(
                    "Unknown sort option: '{}'. Supported: {}",
                    s,
                    SortMode::names().join(", ")
                ))
            })
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
