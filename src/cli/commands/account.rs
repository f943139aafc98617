//! Account command implementation.
//!
//! The `cloudctx account` command prints the caller's account id. Missing
//! credentials print nothing and still succeed; the resolver has already
//! reported them.

use crate::error::Result;
use crate::resolver::ContextResolver;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The account command implementation.
pub struct AccountCommand<'a> {
    resolver: &'a ContextResolver,
}

impl<'a> AccountCommand<'a> {
    /// Create a new account command.
    pub fn new(resolver: &'a ContextResolver) -> Self {
        Self { resolver }
    }
}

impl Command for AccountCommand<'_> {
    fn execute(&self, ui: &dyn UserInterface) -> Result<CommandResult> {
        if let Some(account) = self.resolver.account()? {
            ui.message(account);
        }
        Ok(CommandResult::success())
    }
}
