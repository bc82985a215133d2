use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rules deciding which files belong to the coverage universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_module_file")]
    pub module_file: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,
    /// Directories with this exact name are pruned, matching the go tool.
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: String,
    /// A file containing this exact line is an entry point and is skipped.
    #[serde(default = "default_entry_marker")]
    pub entry_marker: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            module_file: default_module_file(),
            extension: default_extension(),
            test_suffix: default_test_suffix(),
            fixture_dir: default_fixture_dir(),
            entry_marker: default_entry_marker(),
        }
    }
}

fn default_module_file() -> String { "go.mod".to_string() }
fn default_extension() -> String { ".go".to_string() }
fn default_test_suffix() -> String { "_test.go".to_string() }
fn default_fixture_dir() -> String { "testdata".to_string() }
fn default_entry_marker() -> String { "package main".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory names whose files never count towards the total.
    #[serde(default = "default_non_counting")]
    pub non_counting: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { non_counting: default_non_counting() }
    }
}

fn default_non_counting() -> Vec<String> {
    vec!["mocks".into()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Program and arguments; `{profile}` is replaced with the output path.
    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { command: default_command() }
    }
}

pub const PROFILE_PLACEHOLDER: &str = "{profile}";

fn default_command() -> Vec<String> {
    ["go", "test", "-coverprofile", PROFILE_PLACEHOLDER, "./..."]
        .into_iter()
        .map(String::from)
        .collect()
}

/// On-disk shape of `covtable.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CovTableToml {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub scan: ScanConfig,
    pub report: ReportConfig,
    pub runner: RunnerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            scan: ScanConfig::default(),
            report: ReportConfig::default(),
            runner: RunnerConfig::default(),
        }
    }
}
