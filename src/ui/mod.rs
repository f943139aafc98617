//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait, the sink for resolver warnings and notices
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! Resolved values go to stdout via [`UserInterface::message`]; everything
//! else goes to stderr so values can be piped.

pub mod hints;
pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ContextTheme};

/// Trait for user-facing output.
///
/// Methods take `&self` so one sink can be shared by a resolver that is
/// itself shared across threads.
pub trait UserInterface: Send + Sync {
    /// Print a plain line (a resolved value).
    fn message(&self, msg: &str);

    /// Print an informational notice.
    fn info(&self, msg: &str);

    /// Print a warning.
    fn warning(&self, msg: &str);

    /// Print a remedy hint.
    fn hint(&self, msg: &str);

    /// Print an error.
    fn error(&self, msg: &str);
}
