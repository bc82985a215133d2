//! External test execution that produces the coverage profile.

use crate::config::{RunnerConfig, PROFILE_PLACEHOLDER};
use crate::error::{CoverageError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tracing::debug;

/// Produces a coverage profile for every package under `root`, written to
/// `out`. The engine only ever reads `out` afterwards.
pub trait CoverageRunner {
    /// # Errors
    /// Returns error if the profile could not be produced.
    fn produce_profile(&self, root: &Path, out: &Path) -> Result<()>;
}

impl<F> CoverageRunner for F
where
    F: Fn(&Path, &Path) -> Result<()>,
{
    fn produce_profile(&self, root: &Path, out: &Path) -> Result<()> {
        self(root, out)
    }
}

/// Runs the configured test command as a blocking subprocess, with no
/// timeout.
#[derive(Debug, Clone)]
pub struct GoTestRunner {
    command: Vec<String>,
}

impl GoTestRunner {
    #[must_use]
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            command: config.command.clone(),
        }
    }

    /// Command line with the profile placeholder filled in.
    #[must_use]
    pub fn command_line(&self, out: &Path) -> Vec<String> {
        let out = out.to_string_lossy();
        self.command
            .iter()
            .map(|arg| arg.replace(PROFILE_PLACEHOLDER, &out))
            .collect()
    }
}

impl CoverageRunner for GoTestRunner {
    fn produce_profile(&self, root: &Path, out: &Path) -> Result<()> {
        let parts = self.command_line(out);
        let shown = parts.join(" ");
        let Some((program, args)) = parts.split_first() else {
            return Err(CoverageError::Spawn {
                command: shown,
                source: std::io::Error::other("empty command"),
            });
        };

        debug!(command = %shown, cwd = %root.display(), "running tests");
        let start = Instant::now();
        let output = Command::new(program)
            .args(args)
            .current_dir(root)
            .output()
            .map_err(|source| CoverageError::Spawn {
                command: shown.clone(),
                source,
            })?;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(duration_ms, status = %output.status, "tests finished");

        if !output.status.success() {
            return Err(CoverageError::Runner {
                command: shown,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

/// Uses a profile that was produced earlier instead of running tests.
#[derive(Debug, Clone)]
pub struct ExistingProfile {
    path: PathBuf,
}

impl ExistingProfile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CoverageRunner for ExistingProfile {
    fn produce_profile(&self, _root: &Path, out: &Path) -> Result<()> {
        debug!(profile = %self.path.display(), "using existing profile");
        fs::copy(&self.path, out)
            .map(|_| ())
            .map_err(|source| CoverageError::ProfileIo {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(args: &[&str]) -> GoTestRunner {
        GoTestRunner::new(&RunnerConfig {
            command: args.iter().map(ToString::to_string).collect(),
        })
    }

    #[test]
    fn placeholder_is_replaced() {
        let r = GoTestRunner::new(&RunnerConfig::default());
        let line = r.command_line(Path::new("/tmp/m-1.out"));
        assert_eq!(line, vec!["go", "test", "-coverprofile", "/tmp/m-1.out", "./..."]);
    }

    #[test]
    fn placeholder_inside_an_argument() {
        let r = runner(&["go", "test", "-coverprofile={profile}"]);
        let line = r.command_line(Path::new("p.out"));
        assert_eq!(line[2], "-coverprofile=p.out");
    }

    #[test]
    fn successful_command_passes() {
        let d = tempfile::tempdir().unwrap();
        runner(&["true"]).produce_profile(d.path(), &d.path().join("x")).unwrap();
    }

    #[test]
    fn failing_command_is_runner_error() {
        let d = tempfile::tempdir().unwrap();
        let err = runner(&["false"])
            .produce_profile(d.path(), &d.path().join("x"))
            .unwrap_err();
        assert!(matches!(err, CoverageError::Runner { .. }));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let d = tempfile::tempdir().unwrap();
        let err = runner(&["nonexistent_binary_xyz_123"])
            .produce_profile(d.path(), &d.path().join("x"))
            .unwrap_err();
        assert!(matches!(err, CoverageError::Spawn { .. }));
    }

    #[test]
    fn existing_profile_is_copied() {
        let d = tempfile::tempdir().unwrap();
        let src = d.path().join("cover.out");
        fs::write(&src, "mode: set\n").unwrap();
        let out = d.path().join("copy.out");
        ExistingProfile::new(&src).produce_profile(d.path(), &out).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "mode: set\n");
    }

    #[test]
    fn closures_are_runners() {
        let d = tempfile::tempdir().unwrap();
        let out = d.path().join("p.out");
        let fake = |_: &Path, out: &Path| -> Result<()> {
            fs::write(out, "mode: set\n").map_err(CoverageError::TempFile)
        };
        fake.produce_profile(d.path(), &out).unwrap();
        assert!(out.exists());
    }
}
