//! Local process execution and executable lookup.

pub mod command;
pub mod mock;
pub mod which;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use mock::MockRunner;
pub use which::{executable_extensions, find_executable, find_in_dirs, is_executable};
