// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("unable to read module file {path}")]
    Config {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no module directive found in {path}")]
    MissingModuleDirective { path: PathBuf },

    #[error("invalid settings in {path}: {message}")]
    Settings { path: PathBuf, message: String },

    #[error("unable to walk {path}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to read coverage profile {path}")]
    ProfileIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("coverage profile line {line}: {message}")]
    Profile { line: usize, message: String },

    #[error("inconsistent NumStmt in {file_name}: changed from {from} to {to}")]
    InconsistentBlock { file_name: String, from: u64, to: u64 },

    #[error("unknown file in coverage profile: {path} (reported as {file_name}, {known} files scanned)")]
    Mismatch {
        file_name: String,
        path: String,
        known: usize,
    },

    #[error("no counted files remain ({excluded} excluded), aggregate is undefined")]
    EmptyAggregate { excluded: usize },

    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}{}", stderr_tail(.stderr))]
    Runner {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("temporary profile error: {0}")]
    TempFile(std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoverageError>;

// Keep the offending path when a walk fails.
impl From<walkdir::Error> for CoverageError {
    fn from(e: walkdir::Error) -> Self {
        let path = e
            .path()
            .map_or_else(|| PathBuf::from("<unknown>"), std::path::Path::to_path_buf);
        let source = e
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        CoverageError::Scan { path, source }
    }
}

fn stderr_tail(stderr: &str) -> String {
    const MAX_LINES: usize = 20;
    let lines: Vec<&str> = stderr.lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(MAX_LINES);
    format!("\n{}", lines[start..].join("\n"))
}
