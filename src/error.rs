use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a launch.
///
/// The two subprocess variants carry the child's own exit status so the
/// launcher can exit with it; every other variant maps to exit code 1.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("--config must match \"Debug\" or \"Release\"")]
    InvalidConfig { raw: String },

    #[error("cmake not found in PATH")]
    CmakeNotFound,

    #[error("failed to create build directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to read CMakePresets.json in {path}: {source}")]
    ReadPresets { path: PathBuf, source: io::Error },

    #[error("CMakePresets.json in {path} is not valid: {source}")]
    ParsePresets {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("preset {0:?} not found in CMakePresets.json")]
    PresetNotFound(String),

    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("cmake configure failed with exit status {0}")]
    ConfigureFailed(i32),

    #[error("cmake build failed with exit status {0}")]
    CompileFailed(i32),
}

impl LaunchError {
    /// Process exit code for this error: subprocess failures propagate the
    /// child's status, everything else is a plain 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ConfigureFailed(code) | LaunchError::CompileFailed(code) => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_prints_the_documented_diagnostic() {
        let err = LaunchError::InvalidConfig {
            raw: "Production".into(),
        };
        assert_eq!(err.to_string(), "--config must match \"Debug\" or \"Release\"");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn subprocess_failures_propagate_their_status() {
        assert_eq!(LaunchError::ConfigureFailed(3).exit_code(), 3);
        assert_eq!(LaunchError::CompileFailed(2).exit_code(), 2);
    }
}
