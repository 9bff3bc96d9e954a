//! # poise-build
//!
//! A small launcher for the poise CMake build: it translates a handful of
//! flags into a configure invocation and a build invocation, and runs them in
//! sequence, the build step gated on the configure step succeeding.
//!
//! The sequencing logic lives behind a [`CommandExecutor`] seam so it can be
//! exercised without spawning real processes:
//!
//! ```no_run
//! use poise_build::{ensure_build_dir, run, BuildRequest, ProcessExecutor};
//!
//! let request = BuildRequest::default();
//! ensure_build_dir(&request.build_dir)?;
//! run(&request, &mut ProcessExecutor)?;
//! # Ok::<(), poise_build::LaunchError>(())
//! ```

pub mod cli;
pub mod cmake;
pub mod cmd;
pub mod error;
pub mod launch;

pub use cli::Cli;
pub use cmake::{BuildConfig, PresetFile};
pub use cmd::{CommandExecutor, CommandLine, ProcessExecutor};
pub use error::LaunchError;
pub use launch::{ensure_build_dir, preflight, run, BuildRequest};
