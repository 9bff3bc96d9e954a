//! CMake-side vocabulary: the build configuration and `CMakePresets.json`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LaunchError;

/// The CMake build configuration, `-DCMAKE_BUILD_TYPE` on the configure step
/// and `--config` on the build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildConfig {
    #[default]
    Debug,
    Release,
}

impl BuildConfig {
    /// Resolve the raw `--config` flag value. An absent flag means Debug;
    /// anything other than the two exact (case-sensitive) names is a
    /// validation error, never a silent default.
    pub fn parse(raw: Option<&str>) -> Result<Self, LaunchError> {
        match raw {
            None => Ok(BuildConfig::Debug),
            Some("Debug") => Ok(BuildConfig::Debug),
            Some("Release") => Ok(BuildConfig::Release),
            Some(other) => Err(LaunchError::InvalidConfig { raw: other.into() }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildConfig::Debug => "Debug",
            BuildConfig::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of `CMakePresets.json` the launcher cares about.
#[derive(Debug, Deserialize)]
pub struct PresetFile {
    #[serde(rename = "configurePresets", default)]
    configure_presets: Vec<ConfigurePreset>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigurePreset {
    name: String,
    #[serde(default)]
    hidden: bool,
}

impl ConfigurePreset {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PresetFile {
    /// Read `CMakePresets.json` from the source directory (or from the file
    /// itself if `path` already points at it).
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self, LaunchError> {
        let path = path.into();
        let path = if path.ends_with("CMakePresets.json") {
            path
        } else {
            path.join("CMakePresets.json")
        };

        let content =
            std::fs::read_to_string(&path).map_err(|source| LaunchError::ReadPresets {
                path: path.clone(),
                source,
            })?;
        content
            .parse()
            .map_err(|source| LaunchError::ParsePresets { path, source })
    }

    /// Look up a configure preset by name. Hidden presets exist only to be
    /// inherited from and cannot be selected directly, so they never match.
    pub fn find(&self, name: &str) -> Option<&ConfigurePreset> {
        self.configure_presets
            .iter()
            .find(|p| !p.hidden && p.name == name)
    }
}

impl std::str::FromStr for PresetFile {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

/// Resolve a user-supplied preset name against the source directory,
/// returning the validated name.
pub fn resolve_preset(source_dir: &Path, name: &str) -> Result<String, LaunchError> {
    let presets = PresetFile::load(source_dir)?;
    let preset = presets
        .find(name)
        .ok_or_else(|| LaunchError::PresetNotFound(name.into()))?;
    Ok(preset.name().to_owned())
}
