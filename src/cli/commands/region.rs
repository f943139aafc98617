//! Region command implementation.
//!
//! The `cloudctx region` command prints the resolved region.

use crate::error::Result;
use crate::resolver::ContextResolver;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The region command implementation.
pub struct RegionCommand<'a> {
    resolver: &'a ContextResolver,
}

impl<'a> RegionCommand<'a> {
    /// Create a new region command.
    pub fn new(resolver: &'a ContextResolver) -> Self {
        Self { resolver }
    }
}

impl Command for RegionCommand<'_> {
    fn execute(&self, ui: &dyn UserInterface) -> Result<CommandResult> {
        let region = self.resolver.resolved_region();
        tracing::debug!("Region {} from {}", region.name, region.source);
        ui.message(&region.name);
        Ok(CommandResult::success())
    }
}
