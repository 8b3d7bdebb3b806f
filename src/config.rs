//! Generator configuration
//!
//! Settings come from an optional JSON file and from command line flags.
//! Both produce a [`GenConfig`] where every field is optional; layering them
//! with [`GenConfig::merge`] and calling [`GenConfig::validate`] yields a
//! [`PackageConfig`] that the generator can use without further checks.
//!
//! ```json
//! {
//!   "name": "MyApp",
//!   "version": "1.2.0",
//!   "manufacturer": "My Company",
//!   "input_dir": "dist",
//!   "exec": "myapp.exe"
//! }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{GenError, Result};
use crate::output::OutputTarget;

/// Product version used when none is given
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Unvalidated settings from one source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    /// Product name
    pub name: Option<String>,
    /// Product version (x.y.z)
    pub version: Option<String>,
    /// Product manufacturer
    pub manufacturer: Option<String>,
    /// Package comments
    pub comments: Option<String>,
    /// Directory with the files to bundle
    pub input_dir: Option<PathBuf>,
    /// Main executable, relative to `input_dir`
    pub exec: Option<String>,
    /// Icon for the start menu shortcut
    pub icon: Option<PathBuf>,
    /// Output file (stdout when absent)
    pub output: Option<PathBuf>,
}

impl GenConfig {
    /// Load settings from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GenError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| GenError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GenError::Config(e.to_string()))
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: GenConfig) -> GenConfig {
        GenConfig {
            name: overrides.name.or(self.name),
            version: overrides.version.or(self.version),
            manufacturer: overrides.manufacturer.or(self.manufacturer),
            comments: overrides.comments.or(self.comments),
            input_dir: overrides.input_dir.or(self.input_dir),
            exec: overrides.exec.or(self.exec),
            icon: overrides.icon.or(self.icon),
            output: overrides.output.or(self.output),
        }
    }

    /// Command line flags for every missing required setting
    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("--name".to_string());
        }
        if is_blank(&self.manufacturer) {
            missing.push("--manufacturer".to_string());
        }
        if self.input_dir.as_ref().map_or(true, |p| p.as_os_str().is_empty()) {
            missing.push("--dir".to_string());
        }
        if is_blank(&self.exec) {
            missing.push("--exec".to_string());
        }
        missing
    }

    /// Fill defaults and check the filesystem.
    ///
    /// All missing settings are reported together; filesystem checks run
    /// only once the configuration itself is complete.
    pub fn validate(self) -> Result<PackageConfig> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(GenError::MissingArguments(missing));
        }

        let name = self.name.unwrap_or_default();
        let version = self
            .version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let comments = self
            .comments
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("{} installer", name));

        let config = PackageConfig {
            name,
            version,
            manufacturer: self.manufacturer.unwrap_or_default(),
            comments,
            input_dir: self.input_dir.unwrap_or_default(),
            exec: self.exec.unwrap_or_default(),
            icon: self.icon,
            output: self
                .output
                .map(OutputTarget::File)
                .unwrap_or(OutputTarget::Stdout),
        };

        if !config.input_dir.is_dir() {
            return Err(GenError::InputDirNotFound(config.input_dir));
        }

        if !version_looks_valid(&config.version) {
            warn!("version number should be in format x.y.z, got \"{}\"", config.version);
        }

        if !exec_is_relative(&config.exec) {
            return Err(GenError::ExecutableOutsideInput(config.exec));
        }
        let exec_path = config.exec_path();
        if !exec_path.is_file() {
            return Err(GenError::ExecutableNotFound(exec_path));
        }

        if let Some(icon) = &config.icon {
            if !icon.is_file() {
                return Err(GenError::IconNotFound(icon.clone()));
            }
        }

        Ok(config)
    }
}

/// Executable paths may only name entries below the input directory
fn exec_is_relative(exec: &str) -> bool {
    let exec = exec.replace('\\', "/");
    Path::new(&exec)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// True for versions with at least three dot-separated parts
pub fn version_looks_valid(version: &str) -> bool {
    version.matches('.').count() >= 2
}

/// Complete, checked settings for one generation
#[derive(Debug, Clone, PartialEq)]
pub struct PackageConfig {
    pub name: String,
    pub version: String,
    pub manufacturer: String,
    pub comments: String,
    pub input_dir: PathBuf,
    pub exec: String,
    pub icon: Option<PathBuf>,
    pub output: OutputTarget,
}

impl PackageConfig {
    /// Path of the main executable on disk
    pub fn exec_path(&self) -> PathBuf {
        self.input_dir.join(&self.exec)
    }
}
