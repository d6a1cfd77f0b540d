// src/exit.rs
//! Process exit codes for `tidysweep`.
//!
//! Per-batch analyzer failures do not change the exit code; only fatal
//! configuration errors and interruption do.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepExit {
    /// Run completed. Individual batches may still have reported findings.
    Success,
    /// Fatal configuration error detected before analysis started.
    Error,
    /// Run aborted by the user (Ctrl-C).
    Interrupted,
}

impl SweepExit {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Error | Self::Interrupted => 1,
        }
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for SweepExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
