//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures every line
//! for later assertion.
//!
//! # Example
//!
//! ```
//! use cloudctx::ui::{MockUI, UserInterface};
//!
//! let ui = MockUI::new();
//! ui.warning("WARN: something broke");
//! assert_eq!(ui.warnings(), vec!["WARN: something broke".to_string()]);
//! ```

use std::sync::Mutex;

use super::UserInterface;

#[derive(Debug, Default)]
struct Captured {
    messages: Vec<String>,
    infos: Vec<String>,
    warnings: Vec<String>,
    hints: Vec<String>,
    errors: Vec<String>,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    captured: Mutex<Captured>,
}

impl MockUI {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_captured<T>(&self, f: impl FnOnce(&mut Captured) -> T) -> T {
        let mut captured = self
            .captured
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut captured)
    }

    /// Get all captured stdout messages.
    pub fn messages(&self) -> Vec<String> {
        self.with_captured(|c| c.messages.clone())
    }

    /// Get all captured informational messages.
    pub fn infos(&self) -> Vec<String> {
        self.with_captured(|c| c.infos.clone())
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.with_captured(|c| c.warnings.clone())
    }

    /// Get all captured hints.
    pub fn hints(&self) -> Vec<String> {
        self.with_captured(|c| c.hints.clone())
    }

    /// Get all captured errors.
    pub fn errors(&self) -> Vec<String> {
        self.with_captured(|c| c.errors.clone())
    }

    /// Whether nothing at all was printed to the diagnostic channels.
    pub fn is_quiet(&self) -> bool {
        self.with_captured(|c| {
            c.infos.is_empty() && c.warnings.is_empty() && c.hints.is_empty() && c.errors.is_empty()
        })
    }
}

impl UserInterface for MockUI {
    fn message(&self, msg: &str) {
        self.with_captured(|c| c.messages.push(msg.to_string()));
    }

    fn info(&self, msg: &str) {
        self.with_captured(|c| c.infos.push(msg.to_string()));
    }

    fn warning(&self, msg: &str) {
        self.with_captured(|c| c.warnings.push(msg.to_string()));
    }

    fn hint(&self, msg: &str) {
        self.with_captured(|c| c.hints.push(msg.to_string()));
    }

    fn error(&self, msg: &str) {
        self.with_captured(|c| c.errors.push(msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_each_channel_separately() {
        let ui = MockUI::new();
        ui.message("us-east-1");
        ui.info("INFO: x");
        ui.warning("WARN: y");
        ui.hint("try z");
        ui.error("bad");

        assert_eq!(ui.messages(), vec!["us-east-1"]);
        assert_eq!(ui.infos(), vec!["INFO: x"]);
        assert_eq!(ui.warnings(), vec!["WARN: y"]);
        assert_eq!(ui.hints(), vec!["try z"]);
        assert_eq!(ui.errors(), vec!["bad"]);
    }

    #[test]
    fn messages_do_not_break_quiet() {
        let ui = MockUI::new();
        ui.message("us-east-1");
        assert!(ui.is_quiet());
        ui.hint("x");
        assert!(!ui.is_quiet());
    }
}
