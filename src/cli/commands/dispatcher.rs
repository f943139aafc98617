//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::resolver::ContextResolver;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    resolver: ContextResolver,
}

impl CommandDispatcher {
    /// Create a dispatcher whose resolver reports through `ui`.
    pub fn new(config: ResolverConfig, ui: Arc<dyn UserInterface>) -> Self {
        let resolver = ContextResolver::builder().config(config).ui(ui).build();
        Self::with_resolver(resolver)
    }

    /// Create a dispatcher over an existing resolver.
    pub fn with_resolver(resolver: ContextResolver) -> Self {
        Self { resolver }
    }

    /// The resolver commands run against.
    pub fn resolver(&self) -> &ContextResolver {
        &self.resolver
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Region => super::region::RegionCommand::new(&self.resolver).execute(ui),
            Commands::Account => super::account::AccountCommand::new(&self.resolver).execute(ui),
            Commands::Show(args) => {
                super::show::ShowCommand::new(&self.resolver, args.clone()).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
