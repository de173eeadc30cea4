//! Declarative registry of the options the tool recognises.
//!
//! Every option is declared exactly once as a [`clap::Arg`]. Clap is not used
//! to parse the command line (evaluation order and token positions matter,
//! see [`super::Options::evaluate`]); the declarations provide the alias
//! lookups used during evaluation and the `--help` text.

use clap::{Arg, ArgAction, Command};

use crate::error::{CoverageError, Result};
use crate::sort::SortMode;

/// Identity of a recognised option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionId {
    Help,
    Quiet,
    ViewTargets,
    Latest,
    Filter,
    Sort,
    Exclude,
    Roulette,
    Write,
    Debug,
}

impl OptionId {
    pub const ALL: [OptionId; 10] = [
        OptionId::Help,
        OptionId::Quiet,
        OptionId::ViewTargets,
        OptionId::Latest,
        OptionId::Filter,
        OptionId::Sort,
        OptionId::Exclude,
        OptionId::Roulette,
        OptionId::Write,
        OptionId::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionId::Help => "help",
            OptionId::Quiet => "quiet",
            OptionId::ViewTargets => "view-targets",
            OptionId::Latest => "latest",
            OptionId::Filter => "filter",
            OptionId::Sort => "sorted",
            OptionId::Exclude => "exclude",
            OptionId::Roulette => "roulette",
            OptionId::Write => "write",
            OptionId::Debug => "debug",
        }
    }
}

/// Short and long spellings of one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliases {
    pub short: Option<String>,
    pub long: Option<String>,
}

impl Aliases {
    pub fn matches(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long.as_deref() == Some(token)
    }

    /// The longest spelling, used when naming the option in hints.
    pub fn longest(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Aliases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.short, &self.long) {
            (Some(short), Some(long)) => write!(f, "{short}/{long}"),
            (Some(only), None) | (None, Some(only)) => f.write_str(only),
            (None, None) => Ok(()),
        }
    }
}

pub struct Registry {
    command: Command,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self { command: command() }
    }

    fn arg(&self, id: OptionId) -> Option<&Arg> {
        self.command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == id.as_str())
    }

    pub fn aliases(&self, id: OptionId) -> Aliases {
        let arg = self.arg(id);
        Aliases {
            short: arg.and_then(Arg::get_short).map(|c| format!("-{c}")),
            long: arg.and_then(Arg::get_long).map(|l| format!("--{l}")),
        }
    }

    /// Whether `token` spells any recognised option.
    pub fn is_option(&self, token: &str) -> bool {
        OptionId::ALL
            .iter()
            .any(|id| self.aliases(*id).matches(token))
    }

    /// Position of the option in `arguments`, if present.
    ///
    /// Each option may be given once; a second occurrence (under either
    /// spelling) is an error.
    pub fn position(&self, arguments: &[String], id: OptionId) -> Result<Option<usize>> {
        let aliases = self.aliases(id);
        let mut found = arguments
            .iter()
            .enumerate()
            .filter(|(_, token)| aliases.matches(token))
            .map(|(index, _)| index);

        let first = found.next();
        if first.is_some() && found.next().is_some() {
            return Err(CoverageError::invalid([format!(
                "{aliases} can only be provided once"
            )]));
        }
        Ok(first)
    }

    /// Full help text.
    pub fn help(&self) -> String {
        self.command.clone().render_long_help().to_string()
    }
}

fn sort_modes_help() -> String {
    let mut out = String::from("Sort options (name or index):\n");
    for (index, mode) in SortMode::ALL.iter().enumerate() {
        out.push_str(&format!("  {index}  {mode}\n"));
    }
    out
}

fn command() -> Command {
    Command::new("xccov-report")
        .about("Filterable, sortable coverage reports for Xcode result bundles")
        .override_usage(
            "xccov-report [OPTIONS] <TARGET> <RESULT_BUNDLE>\n       \
             xccov-report [OPTIONS] -l <DIR> <TARGET>\n       \
             xccov-report [OPTIONS] -v <RESULT_BUNDLE>\n       \
             xccov-report [OPTIONS] -v -l <DIR>",
        )
        .disable_help_flag(true)
        .disable_version_flag(true)
        .after_long_help(sort_modes_help())
        .arg(
            Arg::new("filter")
                .short('f')
                .long("filter")
                .value_name("CSV")
                .help(
                    "Keep only items whose name contains every given string (case-sensitive). \
                     Combined with -x, the order of the two options decides which runs first",
                ),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("CSV")
                .help("Drop items whose name contains any of the given strings (case-sensitive)"),
        )
        .arg(
            Arg::new("sorted")
                .short('s')
                .long("sorted")
                .value_name("SORT")
                .help("Sort items by a sort option name or its index"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Silence non-essential output"),
        )
        .arg(
            Arg::new("roulette")
                .short('r')
                .long("roulette")
                .action(ArgAction::SetTrue)
                .help("Show a single random item that is not yet fully covered"),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .action(ArgAction::SetTrue)
                .help("Write the report to <bundle name>-report.txt in the current directory"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .arg(
            Arg::new("view-targets")
                .short('v')
                .long("view-targets")
                .action(ArgAction::SetTrue)
                .help("List the targets in the result bundle with their overall coverage"),
        )
        .arg(
            Arg::new("latest")
                .short('l')
                .long("latest")
                .value_name("DIR")
                .help(
                    "Use the most recently created result bundle in DIR instead of \
                     naming a result bundle",
                ),
        )
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Show this help; cannot be combined with other arguments"),
        )
}
