//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which owns the
//! [`ContextResolver`](crate::resolver::ContextResolver) they all read from.

pub mod account;
pub mod completions;
pub mod dispatcher;
pub mod region;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
