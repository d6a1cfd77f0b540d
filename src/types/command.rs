// src/types/command.rs
//! Result of an external command execution.

/// Exit code reported for an invocation that was killed on timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 1;

/// Result of an external command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The command that was executed (display form).
    command: String,
    /// Process exit code (-1 if unavailable, e.g., killed by signal).
    exit_code: i32,
    /// Standard output.
    stdout: String,
    /// Standard error.
    stderr: String,
    /// Execution time in milliseconds.
    duration_ms: u64,
    /// Whether the process was killed for running past its deadline.
    timed_out: bool,
}

impl CommandResult {
    /// Creates a new command result.
    #[must_use]
    pub fn new(
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            command,
            exit_code,
            stdout,
            stderr,
            duration_ms,
            timed_out: false,
        }
    }

    /// The sentinel for a killed invocation: no output, non-zero exit code.
    #[must_use]
    pub fn timed_out(command: String, duration_ms: u64) -> Self {
        Self {
            command,
            exit_code: TIMEOUT_EXIT_CODE,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms,
            timed_out: true,
        }
    }

    /// The command that was executed.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the command succeeded (exit code 0).
    #[must_use]
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }

    /// Process exit code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Standard output.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Standard error.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Execution time in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_true_when_exit_code_zero() {
        let r = CommandResult::new("echo hello".into(), 0, "hello\n".into(), String::new(), 5);
        assert!(r.passed());
        assert!(!r.is_timeout());
    }

    #[test]
    fn passed_false_when_exit_code_negative() {
        let r = CommandResult::new("killed".into(), -1, String::new(), String::new(), 5);
        assert!(!r.passed());
        assert_eq!(r.exit_code(), -1);
    }

    #[test]
    fn timeout_sentinel_has_empty_output_and_nonzero_code() {
        let r = CommandResult::timed_out("clang-tidy a.cc".into(), 1_200_000);
        assert!(r.is_timeout());
        assert!(!r.passed());
        assert_eq!(r.exit_code(), TIMEOUT_EXIT_CODE);
        assert!(r.stdout().is_empty());
        assert!(r.stderr().is_empty());
    }

    #[test]
    fn accessors_return_correct_values() {
        let r = CommandResult::new(
            "clang-tidy -p bld a.cc".into(),
            0,
            "a.cc:1:1: warning: x".into(),
            "1 warning generated.".into(),
            1234,
        );
        assert_eq!(r.command(), "clang-tidy -p bld a.cc");
        assert_eq!(r.stdout(), "a.cc:1:1: warning: x");
        assert_eq!(r.stderr(), "1 warning generated.");
        assert_eq!(r.duration_ms(), 1234);
    }
}
