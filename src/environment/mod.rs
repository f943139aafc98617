//! Environment access and execution mode.
//!
//! The resolvers read variables through [`EnvironmentView`] so tests can
//! hand them a [`MapEnvironment`] instead of the real process environment.

pub mod mode;
pub mod view;

pub use mode::ExecutionMode;
pub use view::{EnvironmentView, MapEnvironment, ProcessEnvironment};
