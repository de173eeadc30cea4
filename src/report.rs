//! Text rendering of coverage reports.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;
use crate::logger::Logger;
use crate::model::{format_percentage, rate, CoverageItem, ItemKind};
use crate::options::Options;
use crate::sort::SortMode;
use crate::xccov::{CoverageService, Repository};

/// Padding added after the longest name.
const NAME_PADDING: usize = 10;

/// Slots in the coverage bar; each one stands for 5%.
const BAR_SLOTS: usize = 20;

/// Spaces between the bar and the metrics.
const BAR_GAP: usize = 5;

/// Render `items` as a report. `items` is expected to be non-empty (the
/// repository refuses empty reports); the name column is sized from all of
/// them, before filtering.
#[must_use]
pub fn render(items: &[CoverageItem], options: &Options, kind: ItemKind) -> String {
    render_with_rng(items, options, kind, &mut rand::thread_rng())
}

/// As [`render`], drawing the roulette pick from `rng`.
pub fn render_with_rng<R: Rng + ?Sized>(
    items: &[CoverageItem],
    options: &Options,
    kind: ItemKind,
    rng: &mut R,
) -> String {
    let name_width = items
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0)
        + NAME_PADDING;

    let processed = process(items, options);

    if options.roulette {
        let candidates: Vec<&CoverageItem> = processed
            .iter()
            .filter(|item| !item.is_fully_covered())
            .collect();
        if let Some(item) = candidates.choose(rng) {
            return format_line(item, name_width);
        }
    }

    let mut out = String::new();
    let mut total_covered: u64 = 0;
    let mut total_executable: u64 = 0;

    for item in &processed {
        out.push_str(&format_line(item, name_width));
        total_covered = total_covered.saturating_add(item.covered_lines);
        total_executable = total_executable.saturating_add(item.executable_lines);
    }

    let rule_width = out.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    out.push('\n');
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    out.push_str(&format!(
        "{} {}s, {} lines, {} total coverage\n",
        processed.len(),
        kind,
        total_executable,
        format_percentage(rate(total_covered, total_executable)),
    ));

    out
}

/// Filter, exclude and sort the items according to `options`.
pub fn process(items: &[CoverageItem], options: &Options) -> Vec<CoverageItem> {
    let keep_filtered = |item: &CoverageItem| {
        options
            .filter
            .iter()
            .all(|term| item.name.contains(term.as_str()))
    };
    let keep_unexcluded = |item: &CoverageItem| {
        !options
            .exclude
            .iter()
            .any(|term| item.name.contains(term.as_str()))
    };

    let mut processed: Vec<CoverageItem> = if options.filter_before_exclude == Some(true) {
        items
            .iter()
            .filter(|item| keep_filtered(item))
            .filter(|item| keep_unexcluded(item))
            .cloned()
            .collect()
    } else {
        items
            .iter()
            .filter(|item| keep_unexcluded(item))
            .filter(|item| keep_filtered(item))
            .cloned()
            .collect()
    };

    options.sort.sort(&mut processed);

    if options.sort == SortMode::SmallestGap {
        processed.retain(|item| !item.is_fully_covered());
    }

    processed
}

/// One report line: padded name, bar, percentage and line counts.
fn format_line(item: &CoverageItem, name_width: usize) -> String {
    let filled = ((item.line_coverage * BAR_SLOTS as f64) as usize).min(BAR_SLOTS);
    let padding = name_width.saturating_sub(item.name.chars().count());

    format!(
        "{name}{pad}[{bars}{empty}]{gap}{pct} ({covered}/{executable} lines)\n",
        name = item.name,
        pad = " ".repeat(padding),
        bars = "=".repeat(filled),
        empty = " ".repeat(BAR_SLOTS - filled),
        gap = " ".repeat(BAR_GAP),
        pct = item.formatted_line_coverage(),
        covered = item.covered_lines,
        executable = item.executable_lines,
    )
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Fetches report data for one result bundle and renders it.
pub struct ReportPresenter<'a, S> {
    repository: Repository<S>,
    options: &'a Options,
    bundle: PathBuf,
}

impl<'a, S: CoverageService> ReportPresenter<'a, S> {
    pub fn new(repository: Repository<S>, options: &'a Options, bundle: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            options,
            bundle: bundle.into(),
        }
    }

    pub fn bundle(&self) -> &Path {
        &self.bundle
    }

    /// Report of every target in the bundle.
    pub fn available_targets(&self, log: &Logger) -> Result<String> {
        let targets = self.repository.available_targets(&self.bundle, log)?;
        Ok(render(&targets, self.options, ItemKind::Target))
    }

    /// Report of the files in one target.
    pub fn coverage_report(&self, target: &str, log: &Logger) -> Result<String> {
        let report = self.repository.coverage_report(target, &self.bundle, log)?;
        Ok(render(&report.files, self.options, ItemKind::File))
    }
}
