//! Executable lookup on the search path.
//!
//! Walks `PATH` directly instead of shelling out to `which`, whose behavior
//! varies across systems and is sometimes a shell builtin.

use crate::environment::EnvironmentView;
use std::path::{Path, PathBuf};

/// Variable holding the executable search path.
pub const PATH_VAR: &str = "PATH";

/// Variable holding the executable extensions (Windows).
pub const PATHEXT_VAR: &str = "PATHEXT";

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.exists()
}

/// Candidate extensions from a `PATHEXT`-style list.
///
/// An unset list yields a single empty extension.
pub fn executable_extensions(pathext: Option<&str>) -> Vec<String> {
    match pathext {
        Some(list) => list.split(';').map(str::to_string).collect(),
        None => vec![String::new()],
    }
}

/// Find `cmd` in the given directories.
///
/// Each directory is tried with every extension, in order. The first
/// candidate that is executable and not a directory wins.
pub fn find_in_dirs(cmd: &str, dirs: &[PathBuf], extensions: &[String]) -> Option<PathBuf> {
    for dir in dirs {
        for ext in extensions {
            let candidate = dir.join(format!("{}{}", cmd, ext));
            if is_executable(&candidate) && !candidate.is_dir() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Find `cmd` on the search path described by `env`.
///
/// `PATH` is split with the platform separator; `PATHEXT`, when set,
/// supplies the extension candidates.
///
/// # Example
///
/// ```
/// use cloudctx::environment::MapEnvironment;
/// use cloudctx::shell::find_executable;
///
/// let env = MapEnvironment::new().with("PATH", "/nonexistent/bin");
/// assert!(find_executable("aws", &env).is_none());
/// ```
pub fn find_executable(cmd: &str, env: &dyn EnvironmentView) -> Option<PathBuf> {
    let path = env.var(PATH_VAR)?;
    let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
    let extensions = executable_extensions(env.var(PATHEXT_VAR).as_deref());
    find_in_dirs(cmd, &dirs, &extensions)
}
