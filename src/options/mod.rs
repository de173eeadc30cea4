//! Command line option evaluation.
//!
//! Options are recognised and stripped one kind at a time, in a fixed order,
//! leaving only the positional arguments behind. To add a new option:
//!   1. Declare it in [`registry`] and give it an [`OptionId`].
//!   2. Add a field to [`Options`] and an `evaluate_*` step.
//!   3. Call the step from [`Options::evaluate`] at the right point in the order.

pub mod registry;

use crate::error::{CoverageError, Result};
use crate::logger::{Category, Logger};
use crate::sort::SortMode;

pub use registry::{OptionId, Registry};

/// Extension that every result bundle directory carries.
pub const RESULT_BUNDLE_EXTENSION: &str = ".xcresult";

/// Resolved option values for one invocation.
///
/// Values survive repeated calls to [`Options::evaluate`] unless a later
/// argument list overwrites them.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub help: bool,
    pub quiet: bool,
    pub view_targets: bool,
    /// Directory to search for the newest result bundle.
    pub latest_in_directory: Option<String>,
    pub filter: Vec<String>,
    pub exclude: Vec<String>,
    pub sort: SortMode,
    pub roulette: bool,
    pub write: bool,
    pub debug: bool,
    /// Set only when both `-f` and `-x` were given: whether `-f` came first.
    /// `None` and `Some(false)` both mean exclude-then-filter.
    pub filter_before_exclude: Option<bool>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `arguments` (the command line without the program name),
    /// recording every recognised option and returning the remaining
    /// positional arguments.
    ///
    /// Quiet and debug modes are applied to `log` as soon as they are seen.
    pub fn evaluate(&mut self, arguments: &[String], log: &mut Logger) -> Result<Vec<String>> {
        let registry = Registry::new();
        let mut arguments = arguments.to_vec();

        self.evaluate_help(&registry, &mut arguments, log)?;
        self.evaluate_quiet(&registry, &mut arguments, log)?;
        self.evaluate_view_targets(&registry, &mut arguments, log)?;
        self.evaluate_latest(&registry, &mut arguments, log)?;
        self.evaluate_filter(&registry, &mut arguments, log)?;
        self.evaluate_sort(&registry, &mut arguments, log)?;
        self.evaluate_exclude(&registry, &mut arguments, log)?;
        self.evaluate_roulette(&registry, &mut arguments, log)?;
        self.evaluate_write(&registry, &mut arguments, log)?;
        self.evaluate_debug(&registry, &mut arguments, log)?;

        self.evaluate_base_arguments(&registry, &arguments)?;

        Ok(arguments)
    }

    fn evaluate_help(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        if registry.position(arguments, OptionId::Help)?.is_none() {
            return Ok(());
        }

        arguments.retain(|token| !registry.is_option(token));
        if !arguments.is_empty() {
            return Err(CoverageError::invalid([
                "other arguments cannot be provided when specifying help mode",
            ]));
        }

        self.help = true;
        log.write("showing help", Category::Option);
        Ok(())
    }

    // Runs before every other non-help step so that quiet mode is in effect
    // before they log anything.
    fn evaluate_quiet(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &mut Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Quiet)? else {
            return Ok(());
        };

        self.quiet = true;
        log.set_quiet(true);

        arguments.remove(index);
        Ok(())
    }

    fn evaluate_view_targets(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        if registry.position(arguments, OptionId::ViewTargets)?.is_none() {
            return Ok(());
        }

        // -l may stand in for the result bundle here; resolve it now so the
        // later latest step finds nothing left to do.
        if registry.position(arguments, OptionId::Latest)?.is_some() {
            self.evaluate_latest(registry, arguments, log)?;
        }

        self.view_targets = true;
        log.write("viewing targets for result bundle", Category::Option);

        if let Some(index) = registry.position(arguments, OptionId::ViewTargets)? {
            arguments.remove(index);
        }
        Ok(())
    }

    fn evaluate_latest(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Latest)? else {
            return Ok(());
        };
        let directory = value_after(arguments, index)
            .ok_or_else(|| CoverageError::invalid(["please ensure that a directory is specified"]))?;

        log.write(
            &format!(
                "will look for latest result bundle in directory {directory} instead of path to result bundle"
            ),
            Category::Option,
        );
        self.latest_in_directory = Some(directory);

        arguments.drain(index..=index + 1);
        Ok(())
    }

    fn evaluate_filter(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Filter)? else {
            return Ok(());
        };

        // Relative order of -f and -x is only recorded here, while both are
        // still in the list; the exclude step runs later.
        let filter_first = registry
            .position(arguments, OptionId::Exclude)?
            .map(|exclude_index| index < exclude_index);

        let value = value_after(arguments, index).ok_or_else(|| {
            CoverageError::invalid([
                "please ensure that filters are specified",
                "you can specify multiple filters with commas (e.g. \"View,Presenter\")",
            ])
        })?;

        if let Some(filter_first) = filter_first {
            self.filter_before_exclude = Some(filter_first);
            let will = if filter_first { "will" } else { "will not" };
            log.write(
                &format!(
                    "both filter and exclude options are present, filtering {will} be performed before exclusion"
                ),
                Category::Option,
            );
        }

        let filters = split_terms(&value);
        log.write(
            &format!("filtering report to show only files/targets containing {filters:?}"),
            Category::Option,
        );
        self.filter = filters;

        arguments.drain(index..=index + 1);
        Ok(())
    }

    fn evaluate_sort(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Sort)? else {
            return Ok(());
        };
        let names = SortMode::names();

        let value = value_after(arguments, index).ok_or_else(|| {
            CoverageError::invalid([
                "please ensure that a sort option is specified".to_string(),
                format!("available sort options are {names:?}"),
                "you can also use indexes (e.g. `alphabetical` would be 0)".to_string(),
            ])
        })?;

        let mode = SortMode::from_name_or_index(&value).ok_or_else(|| {
            CoverageError::invalid([
                format!("an invalid sort option was provided, available sort options are {names:?}"),
                "if using indexes, make sure the index is in range".to_string(),
            ])
        })?;
        self.sort = mode;

        log.write(
            &format!("sort option provided, coverage report files/targets will be sorted by option {mode}"),
            Category::Option,
        );
        if mode == SortMode::SmallestGap {
            log.write(
                "smallest gap sort option selected, files/targets at 100% coverage will be omitted from report",
                Category::Info,
            );
        }

        arguments.drain(index..=index + 1);
        Ok(())
    }

    fn evaluate_exclude(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Exclude)? else {
            return Ok(());
        };

        let value = value_after(arguments, index).ok_or_else(|| {
            CoverageError::invalid([
                "please ensure that exclusion terms are specified",
                "you can specify multiple exclusions with commas (e.g. \"View,Presenter\")",
            ])
        })?;

        let exclusions = split_terms(&value);
        log.write(
            &format!("excluding files/targets containing {exclusions:?} from report"),
            Category::Option,
        );
        self.exclude = exclusions;

        arguments.drain(index..=index + 1);
        Ok(())
    }

    fn evaluate_roulette(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Roulette)? else {
            return Ok(());
        };

        self.roulette = true;
        log.write(
            "roulette mode enabled, selecting a single random file/target for report",
            Category::Option,
        );

        arguments.remove(index);
        Ok(())
    }

    fn evaluate_write(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Write)? else {
            return Ok(());
        };

        self.write = true;
        log.write(
            "write mode enabled, will write report into file after generation",
            Category::Option,
        );

        arguments.remove(index);
        Ok(())
    }

    fn evaluate_debug(
        &mut self,
        registry: &Registry,
        arguments: &mut Vec<String>,
        log: &mut Logger,
    ) -> Result<()> {
        let Some(index) = registry.position(arguments, OptionId::Debug)? else {
            return Ok(());
        };

        self.debug = true;
        log.set_debug(true);
        log.write("debug mode enabled", Category::Option);

        arguments.remove(index);
        Ok(())
    }

    /// Check the positional arguments left over against the active options.
    fn evaluate_base_arguments(&self, registry: &Registry, arguments: &[String]) -> Result<()> {
        if self.help {
            return Ok(());
        }

        let view_targets = registry.aliases(OptionId::ViewTargets);
        let latest = registry.aliases(OptionId::Latest);

        match (self.view_targets, self.latest_in_directory.is_some()) {
            (true, false) if arguments.len() != 1 => Err(CoverageError::invalid([format!(
                "only the result bundle can be provided as a base argument if using {} (without {})",
                view_targets.longest(),
                latest.longest()
            )])),
            (true, true) if !arguments.is_empty() => Err(CoverageError::invalid([format!(
                "no base arguments can be provided when using {} and {} together",
                view_targets.longest(),
                latest.longest()
            )])),
            (false, true) if arguments.len() != 1 => Err(CoverageError::invalid([format!(
                "only the target name can be provided as a base argument if {latest} is enabled"
            )])),
            (false, false) if arguments.len() != 2 => Err(CoverageError::invalid([
                "two arguments (target and result bundle) are required, please try again",
            ])),
            (false, false) if !is_result_bundle(&arguments[1]) => Err(CoverageError::invalid([
                format!("are you using a valid result bundle with extension {RESULT_BUNDLE_EXTENSION}?"),
            ])),
            _ => Ok(()),
        }
    }
}

/// The argument following the option at `index`, if any.
fn value_after(arguments: &[String], index: usize) -> Option<String> {
    arguments.get(index + 1).cloned()
}

/// Split a comma-separated list, dropping empty segments.
fn split_terms(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_result_bundle(path: &str) -> bool {
    path.trim_end_matches('/').ends_with(RESULT_BUNDLE_EXTENSION)
}
