// src/exit.rs
//! Standardized process exit codes for `covtable`.
//!
//! Every fatal condition maps to the same non-zero code; scripts only
//! need to distinguish success from failure.

use colored::Colorize;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CovTableExit {
    /// Table rendered.
    Success = 0,
    /// Configuration, scan, profile, runner, or reconciliation failure.
    Error = 1,
}

impl CovTableExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for CovTableExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for CovTableExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => {
                eprintln!("{} {e:#}", "error:".red().bold());
                Self::Error
            }
        }
    }
}
