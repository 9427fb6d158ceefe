//! Wrapped process execution
//!
//! The child inherits stdin and stdout so prompts like `apply`'s
//! confirmation work untouched. stderr is piped through a [`Tee`] that
//! writes every chunk to the terminal and to an in-memory buffer.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use tfn_core::consts::{LOG_PREFIX, TAIL_LINES};
use tfn_core::format::tail_lines;

/// Exit code used when the child could not be started or was killed
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Outcome of a wrapped run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Exit code to hand back to the OS
    pub exit_code: i32,
    /// Last non-empty stderr lines, newline-joined
    pub stderr_tail: String,
}

impl RunResult {
    fn launch_failure() -> Self {
        Self {
            exit_code: FAILURE_EXIT_CODE,
            stderr_tail: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Writer that forwards every write to two sinks in order
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

/// Run `program` with `args`, blocking until it exits.
///
/// Arguments are handed to the child as-is, including non-UTF-8 bytes.
/// Never fails: a launch failure or abnormal termination becomes exit code 1.
pub fn run<S: AsRef<OsStr>>(program: &str, args: &[S]) -> RunResult {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            eprintln!("{} failed to start {}: {}", LOG_PREFIX, program, err);
            return RunResult::launch_failure();
        }
    };

    let mut captured = Vec::new();
    if let Some(mut pipe) = child.stderr.take() {
        let stderr = io::stderr();
        let mut tee = Tee::new(stderr.lock(), &mut captured);
        if let Err(err) = io::copy(&mut pipe, &mut tee) {
            tracing::debug!(error = %err, "stderr passthrough interrupted");
            // Keep draining so the child never blocks on a full pipe.
            let _ = io::copy(&mut pipe, &mut io::sink());
        }
    }

    let exit_code = match child.wait() {
        Ok(status) => exit_code(status),
        Err(err) => {
            tracing::debug!(error = %err, "failed to wait for {}", program);
            FAILURE_EXIT_CODE
        }
    };

    RunResult {
        exit_code,
        stderr_tail: tail_lines(&String::from_utf8_lossy(&captured), TAIL_LINES),
    }
}

/// Normal exits keep their status; signal deaths map to 1
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(FAILURE_EXIT_CODE)
}
