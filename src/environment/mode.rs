//! Execution mode detection.

use super::view::EnvironmentView;

/// Whether the process runs under test or normally.
///
/// In [`ExecutionMode::Test`] both resolvers return fixed constants and
/// never consult any source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Resolve from the real sources.
    #[default]
    Normal,
    /// Short-circuit to fixed constants.
    Test,
}

impl ExecutionMode {
    /// Detect the mode from the environment.
    ///
    /// Any value for `test_var`, including an empty one, selects test mode.
    pub fn detect(env: &dyn EnvironmentView, test_var: &str) -> Self {
        if env.var(test_var).is_some() {
            Self::Test
        } else {
            Self::Normal
        }
    }

    /// Check if this is test mode.
    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Test => write!(f, "test"),
        }
    }
}
