//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::cmake::{self, BuildConfig};
use crate::error::LaunchError;
use crate::launch::{BuildRequest, BUILD_DIR, SOURCE_DIR};

/// Configure and build the poise CMake project.
#[derive(Debug, Parser)]
#[command(name = "poise-build", version, about, long_about = None)]
pub struct Cli {
    /// Build configuration: "Debug" or "Release"
    #[arg(short, long)]
    pub config: Option<String>,

    /// Boost installation to forward to the configure step
    #[arg(short = 'b', long, alias = "boost_path", value_name = "PATH")]
    pub boost_path: Option<PathBuf>,

    /// CMake generator to configure with (e.g. "Ninja")
    #[arg(short, long)]
    pub generator: Option<String>,

    /// Compile with all available parallelism
    #[arg(short = 'j', long)]
    pub jobs: bool,

    /// Configure preset from CMakePresets.json
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Project source directory
    #[arg(long, value_name = "DIR", default_value = SOURCE_DIR)]
    pub source_dir: PathBuf,

    /// Build output directory
    #[arg(long, value_name = "DIR", default_value = BUILD_DIR)]
    pub build_dir: PathBuf,
}

impl Cli {
    /// Validate the raw flag values into a launch request. The preset, if
    /// given, is checked against the source directory's `CMakePresets.json`
    /// here so nothing spawns with a name CMake would reject.
    pub fn into_request(self) -> Result<BuildRequest, LaunchError> {
        let config = BuildConfig::parse(self.config.as_deref())?;
        let preset = match &self.preset {
            Some(name) => Some(cmake::resolve_preset(&self.source_dir, name)?),
            None => None,
        };

        Ok(BuildRequest {
            config,
            boost_path: self.boost_path,
            generator: self.generator,
            jobs: self.jobs,
            preset,
            source_dir: self.source_dir,
            build_dir: self.build_dir,
        })
    }
}
