// src/shell.rs
//! Synchronous subprocess execution with a hard deadline.
//!
//! Every external invocation (analyzer batches, git queries, the commit
//! pipeline) goes through here. One attempt per call, no retries.

use crate::types::CommandResult;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::error;

/// Upper bound for a single external invocation.
pub const JOB_TIMEOUT: Duration = Duration::from_secs(20 * 60);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs a pipeline through `sh -c`. Reserved for commands that need shell
/// features; everything else should build a [`Command`] and call [`execute`].
#[must_use]
pub fn execute_shell(line: &str, timeout: Duration) -> CommandResult {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    run(&mut cmd, line.to_string(), timeout)
}

/// Runs `cmd`, capturing stdout and stderr separately.
///
/// On timeout the child is killed and the timeout sentinel is returned.
#[must_use]
pub fn execute(cmd: &mut Command, timeout: Duration) -> CommandResult {
    let shown = display_command(cmd);
    run(cmd, shown, timeout)
}

fn run(cmd: &mut Command, shown: String, timeout: Duration) -> CommandResult {
    let start = Instant::now();

    let mut child = match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return CommandResult::new(
                shown,
                -1,
                String::new(),
                format!("Failed to execute: {e}"),
                0,
            );
        }
    };

    let out_thread = child.stdout.take().map(spawn_reader);
    let err_thread = child.stderr.take().map(spawn_reader);

    match wait_with_deadline(&mut child, timeout) {
        Ok(Some(status)) => {
            let stdout = join_reader(out_thread);
            let stderr = join_reader(err_thread);
            CommandResult::new(shown, exit_code(status), stdout, stderr, elapsed_ms(start))
        }
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            // Readers are left detached: grandchildren of `sh -c` may still hold the pipes.
            error!("\nCommand timed out: {shown}");
            CommandResult::timed_out(shown, elapsed_ms(start))
        }
        Err(e) => {
            let _ = child.kill();
            CommandResult::new(
                shown,
                -1,
                String::new(),
                format!("Failed to wait for command: {e}"),
                elapsed_ms(start),
            )
        }
    }
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut input: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = input.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Renders a [`Command`] the way a user would type it.
#[must_use]
pub fn display_command(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    shell_words::join(parts)
}
