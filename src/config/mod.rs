// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::SETTINGS_FILE;
pub use self::types::{
    Config, CovTableToml, ReportConfig, RunnerConfig, ScanConfig, PROFILE_PLACEHOLDER,
};
use crate::error::{CoverageError, Result};
use std::path::{Path, PathBuf};

impl Config {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Creates a config for `root` and applies its `covtable.toml`.
    ///
    /// # Errors
    /// Returns error if the settings file exists but cannot be read or parsed.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(root);
        config.load_local_config()?;
        Ok(config)
    }

    /// # Errors
    /// Returns error if the settings file exists but cannot be read or parsed.
    pub fn load_local_config(&mut self) -> Result<()> {
        io::load_toml_config(self)?;
        self.validate()
    }

    /// # Errors
    /// Returns error if `content` is not a valid settings document.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        let origin = self.root.join(SETTINGS_FILE);
        io::parse_toml(self, content, &origin)?;
        self.validate()
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if the runner command is empty, a scan rule is blank, or
    /// a non-counting entry is not a single directory name.
    pub fn validate(&self) -> Result<()> {
        let origin = self.root.join(SETTINGS_FILE);
        if self.runner.command.is_empty() {
            return Err(invalid(&origin, "runner.command must not be empty"));
        }
        if self.scan.extension.is_empty() {
            return Err(invalid(&origin, "scan.extension must not be empty"));
        }
        if self.scan.test_suffix.is_empty() {
            return Err(invalid(&origin, "scan.test_suffix must not be empty"));
        }
        if self.scan.entry_marker.trim().is_empty() {
            return Err(invalid(&origin, "scan.entry_marker must not be blank"));
        }
        for segment in &self.report.non_counting {
            let dir = segment.trim_matches('/');
            if dir.is_empty() || dir.contains('/') {
                return Err(invalid(
                    &origin,
                    &format!("report.non_counting entry {segment:?} must be a single directory name"),
                ));
            }
        }
        Ok(())
    }

    /// Path of the module-definition file.
    #[must_use]
    pub fn module_file(&self) -> PathBuf {
        self.root.join(&self.scan.module_file)
    }
}

fn invalid(path: &Path, message: &str) -> CoverageError {
    CoverageError::Settings {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
