//! Terminal output.

use console::Term;
use std::io::Write;

use super::{should_use_colors, ContextTheme, UserInterface};

/// Writes values to stdout and diagnostics to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ContextTheme,
}

impl TerminalUI {
    /// Create a terminal UI, colored when stderr is a TTY and `NO_COLOR` is unset.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            ContextTheme::new()
        } else {
            ContextTheme::plain()
        };
        Self::with_theme(theme)
    }

    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(theme: ContextTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&self, msg: &str) {
        writeln!(&self.out, "{}", msg).ok();
    }

    fn info(&self, msg: &str) {
        writeln!(&self.err, "{}", self.theme.format_info(msg)).ok();
    }

    fn warning(&self, msg: &str) {
        writeln!(&self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn hint(&self, msg: &str) {
        writeln!(&self.err, "{}", self.theme.format_hint(msg)).ok();
    }

    fn error(&self, msg: &str) {
        writeln!(&self.err, "{}", self.theme.format_error(msg)).ok();
    }
}
