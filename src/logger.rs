//! Category-tagged console logging.
//!
//! The logger is constructed once in `main` and handed to whatever needs to
//! report progress. Quiet and debug modes are switched on by the options
//! evaluator the moment the corresponding flag is seen.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

/// Kind of message being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Plain text (the report itself).
    None,
    /// Raw output from an external tool.
    Output,
    Info,
    /// Describes the effect of a resolved command line option.
    Option,
    Complete,
    Debug,
    Error,
    Hint,
}

impl Category {
    fn tag(self) -> Option<&'static str> {
        match self {
            Category::None | Category::Output => None,
            Category::Info => Some("info"),
            Category::Option => Some("option"),
            Category::Complete => Some("done"),
            Category::Debug => Some("debug"),
            Category::Error => Some("error"),
            Category::Hint => Some("hint"),
        }
    }

    /// Categories that survive quiet mode.
    fn is_essential(self) -> bool {
        matches!(
            self,
            Category::Error | Category::Output | Category::Hint | Category::Debug | Category::None
        )
    }

    fn to_stdout(self) -> bool {
        matches!(self, Category::None | Category::Output)
    }
}

#[derive(Debug, Clone)]
pub struct Logger {
    quiet: bool,
    debug: bool,
    color: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Colour is used when stderr is a terminal and `NO_COLOR` is unset.
    pub fn new() -> Self {
        let color = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        Self::with_color(color)
    }

    pub fn with_color(color: bool) -> Self {
        Self {
            quiet: false,
            debug: false,
            color,
        }
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Whether a message of the given category would be written right now.
    #[must_use]
    pub fn should_write(&self, category: Category) -> bool {
        if self.quiet && !category.is_essential() {
            return false;
        }
        category != Category::Debug || self.debug
    }

    /// Render a message with its category tag, without writing it.
    #[must_use]
    pub fn format(&self, message: &str, category: Category) -> String {
        let Some(tag) = category.tag() else {
            return message.to_string();
        };
        if !self.color {
            return format!("{tag}: {message}");
        }
        let tag = format!("{tag}:");
        match category {
            Category::Error => format!("{} {message}", tag.red().bold()),
            Category::Hint => format!("{} {message}", tag.yellow()),
            Category::Complete => format!("{} {message}", tag.green()),
            Category::Debug => format!("{} {message}", tag.dimmed()),
            _ => format!("{} {message}", tag.cyan()),
        }
    }

    pub fn write(&self, message: &str, category: Category) {
        if !self.should_write(category) {
            return;
        }
        let line = self.format(message, category);
        if category.to_stdout() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    pub fn info(&self, message: &str) {
        self.write(message, Category::Info);
    }

    pub fn debug(&self, message: &str) {
        self.write(message, Category::Debug);
    }

    pub fn error(&self, message: &str) {
        self.write(message, Category::Error);
    }

    pub fn hint(&self, message: &str) {
        self.write(message, Category::Hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hides_debug_only() {
        let log = Logger::with_color(false);
        assert!(log.should_write(Category::Info));
        assert!(log.should_write(Category::Option));
        assert!(log.should_write(Category::Error));
        assert!(!log.should_write(Category::Debug));
    }

    #[test]
    fn test_quiet_mode_keeps_essential_categories() {
        let mut log = Logger::with_color(false);
        log.set_quiet(true);

        assert!(!log.should_write(Category::Info));
        assert!(!log.should_write(Category::Option));
        assert!(!log.should_write(Category::Complete));
        assert!(log.should_write(Category::Error));
        assert!(log.should_write(Category::Hint));
        assert!(log.should_write(Category::Output));
        assert!(log.should_write(Category::None));
    }

    #[test]
    fn test_debug_survives_quiet() {
        let mut log = Logger::with_color(false);
        log.set_quiet(true);
        log.set_debug(true);
        assert!(log.should_write(Category::Debug));
    }

    #[test]
    fn test_format_plain() {
        let log = Logger::with_color(false);
        assert_eq!(log.format("bad input", Category::Error), "error: bad input");
        assert_eq!(log.format("report body", Category::None), "report body");
        assert_eq!(log.format("finished", Category::Complete), "done: finished");
    }

    #[test]
    fn test_format_colored_keeps_message() {
        let log = Logger::with_color(true);
        let line = log.format("try again", Category::Hint);
        assert!(line.contains("hint:"));
        assert!(line.ends_with("try again"));
        assert_ne!(line, "hint: try again");
    }
}
