//! The launch pipeline: turn flag values into a configure command and a
//! build command, then run them in sequence with a short-circuit.

use std::path::{Path, PathBuf};

use crate::cmake::BuildConfig;
use crate::cmd::{spawn_error, CommandExecutor, CommandLine};
use crate::error::LaunchError;

/// Default source directory for the configure step.
pub const SOURCE_DIR: &str = ".";
/// Default build output directory.
pub const BUILD_DIR: &str = "build";
/// Cache variable carrying the Boost location into the poise CMake project.
const BOOST_PATH_VAR: &str = "POISE_BOOST_PATH";

/// One launch, fully resolved. Built once per invocation and never mutated;
/// the two command lines are derived from it.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub config: BuildConfig,
    pub boost_path: Option<PathBuf>,
    pub generator: Option<String>,
    pub jobs: bool,
    /// Preset name, already validated against `CMakePresets.json`.
    pub preset: Option<String>,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
}

impl Default for BuildRequest {
    fn default() -> Self {
        Self {
            config: BuildConfig::default(),
            boost_path: None,
            generator: None,
            jobs: false,
            preset: None,
            source_dir: PathBuf::from(SOURCE_DIR),
            build_dir: PathBuf::from(BUILD_DIR),
        }
    }
}

impl BuildRequest {
    /// The configure step: generate build files and export the compile
    /// command database.
    pub fn configure_command(&self) -> CommandLine {
        let mut cmd = CommandLine::new("cmake")
            .arg("-S")
            .arg(self.source_dir.display().to_string())
            .arg("-B")
            .arg(self.build_dir.display().to_string())
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.config))
            .arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=1");

        if let Some(preset) = &self.preset {
            cmd = cmd.arg(format!("--preset={preset}"));
        }
        if let Some(generator) = &self.generator {
            cmd = cmd.arg("-G").arg(generator.clone());
        }
        if let Some(boost_path) = &self.boost_path {
            cmd = cmd.arg(format!("-D{BOOST_PATH_VAR}={}", boost_path.display()));
        }

        cmd
    }

    /// The build step against the configured directory, parallel when asked.
    pub fn compile_command(&self) -> CommandLine {
        let mut cmd = CommandLine::new("cmake")
            .arg("--build")
            .arg(self.build_dir.display().to_string())
            .arg("--config")
            .arg(self.config.as_str());

        if self.jobs {
            cmd = cmd.arg("--").arg("-j");
        }

        cmd
    }
}

/// Create the build output directory if it does not exist. Idempotent.
///
/// Unlike the historical launcher this surfaces creation failure instead of
/// silently configuring into a directory that was never made.
pub fn ensure_build_dir(path: &Path) -> Result<(), LaunchError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|source| LaunchError::CreateDir {
            path: path.to_owned(),
            source,
        })?;
    }
    Ok(())
}

/// Check that cmake is reachable before anything spawns.
pub fn preflight() -> Result<(), LaunchError> {
    which::which("cmake").map_err(|_| LaunchError::CmakeNotFound)?;
    Ok(())
}

/// Run configure, then build, through the injected executor.
///
/// The build step is gated on the configure step's exit status: if configure
/// reports non-zero the build command is never constructed into a process and
/// the configure status becomes the launcher's own. First failure is terminal,
/// nothing is retried.
pub fn run<E: CommandExecutor>(request: &BuildRequest, executor: &mut E) -> Result<(), LaunchError> {
    let configure = request.configure_command();
    tracing::info!(command = %configure, "configure");
    let status = executor
        .execute(&configure)
        .map_err(|e| spawn_error(&configure, e))?;
    if status != 0 {
        return Err(LaunchError::ConfigureFailed(status));
    }

    let compile = request.compile_command();
    tracing::info!(command = %compile, "build");
    let status = executor
        .execute(&compile)
        .map_err(|e| spawn_error(&compile, e))?;
    if status != 0 {
        return Err(LaunchError::CompileFailed(status));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Executor that records every command and replays scripted exit codes.
    struct MockExecutor {
        codes: Vec<i32>,
        calls: Vec<CommandLine>,
    }

    impl MockExecutor {
        fn returning(codes: &[i32]) -> Self {
            Self {
                codes: codes.to_vec(),
                calls: Vec::new(),
            }
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(&mut self, command: &CommandLine) -> io::Result<i32> {
            let code = self.codes[self.calls.len()];
            self.calls.push(command.clone());
            Ok(code)
        }
    }

    #[test]
    fn configure_command_always_carries_the_fixed_parts() {
        let cmd = BuildRequest::default().configure_command();
        assert_eq!(
            cmd.rendered(),
            "cmake -S . -B build -DCMAKE_BUILD_TYPE=Debug -DCMAKE_EXPORT_COMPILE_COMMANDS=1"
        );
    }

    #[test]
    fn generator_and_boost_path_are_appended_only_when_present() {
        let request = BuildRequest {
            generator: Some("Ninja".into()),
            boost_path: Some(PathBuf::from("/opt/boost")),
            ..BuildRequest::default()
        };
        let cmd = request.configure_command();
        assert!(cmd.contains("Ninja"));
        assert!(cmd.contains("-DPOISE_BOOST_PATH=/opt/boost"));

        let bare = BuildRequest::default().configure_command();
        assert!(!bare.contains("-G"));
        assert!(!bare.contains("POISE_BOOST_PATH"));
    }

    #[test]
    fn boost_path_with_a_space_stays_one_argument() {
        let request = BuildRequest {
            boost_path: Some(PathBuf::from("/opt/my lib")),
            ..BuildRequest::default()
        };
        let cmd = request.configure_command();
        assert!(
            cmd.args()
                .iter()
                .any(|a| a == "-DPOISE_BOOST_PATH=/opt/my lib")
        );
        // and the logged form quotes it so a shell would agree
        assert!(cmd.rendered().contains("'-DPOISE_BOOST_PATH=/opt/my lib'"));
    }

    #[test]
    fn compile_command_is_serial_unless_jobs_is_set() {
        let serial = BuildRequest::default().compile_command();
        assert_eq!(serial.rendered(), "cmake --build build --config Debug");

        let parallel = BuildRequest {
            jobs: true,
            ..BuildRequest::default()
        };
        assert_eq!(
            parallel.compile_command().rendered(),
            "cmake --build build --config Debug -- -j"
        );
    }

    #[test]
    fn configure_failure_skips_the_build_step() {
        let mut exec = MockExecutor::returning(&[3]);
        let err = run(&BuildRequest::default(), &mut exec).unwrap_err();
        assert!(matches!(err, LaunchError::ConfigureFailed(3)));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(exec.calls.len(), 1);
    }

    #[test]
    fn configure_success_runs_the_build_step_exactly_once() {
        let mut exec = MockExecutor::returning(&[0, 0]);
        run(&BuildRequest::default(), &mut exec).unwrap();
        assert_eq!(exec.calls.len(), 2);
        let compile = &exec.calls[1];
        assert!(compile.contains("Debug"));
        assert!(compile.contains("build"));
    }

    #[test]
    fn build_failure_becomes_the_final_status() {
        let mut exec = MockExecutor::returning(&[0, 2]);
        let err = run(&BuildRequest::default(), &mut exec).unwrap_err();
        assert!(matches!(err, LaunchError::CompileFailed(2)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn release_with_jobs_end_to_end() {
        let request = BuildRequest {
            config: BuildConfig::Release,
            jobs: true,
            ..BuildRequest::default()
        };
        let mut exec = MockExecutor::returning(&[0, 0]);
        run(&request, &mut exec).unwrap();

        let configure = &exec.calls[0];
        assert!(configure.contains("Release"));
        assert!(!configure.contains("-G"));

        let compile = &exec.calls[1];
        assert!(compile.contains("Release"));
        assert!(compile.contains("-j"));
    }

    #[test]
    fn ensure_build_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("build");

        ensure_build_dir(&target).unwrap();
        ensure_build_dir(&target).unwrap();

        assert!(target.is_dir());
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
