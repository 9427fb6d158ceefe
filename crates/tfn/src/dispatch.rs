//! Run terraform and decide whether to notify
//!
//! The exit code returned by [`Dispatcher::dispatch`] is always the wrapped
//! process's own code. Notification problems are reported on stderr and
//! otherwise ignored.

use std::ffi::OsStr;
use std::time::Instant;

use tfn_core::consts::{LOG_PREFIX, NOTIFY_COMMANDS, PROGRAM};
use tfn_core::format::{self, UNKNOWN_DIR};

use crate::config::Credentials;
use crate::message::{format_message, Locale, Payload};
use crate::runner;
use crate::telegram::Notifier;

const CHDIR_FLAG: &str = "-chdir=";

/// First argument that is not a flag
pub fn detect_subcommand(args: &[String]) -> Option<&str> {
    args.iter()
        .map(String::as_str)
        .find(|arg| !arg.starts_with('-'))
}

/// Path given with `-chdir=<path>`, if any
pub fn chdir_arg(args: &[String]) -> Option<&str> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(CHDIR_FLAG))
        .find(|path| !path.is_empty())
}

/// Directory label for the notification.
///
/// Uses the last component of `-chdir=`, else the current directory's name.
pub fn work_dir_label(args: &[String]) -> String {
    if let Some(path) = chdir_arg(args) {
        return format::last_component(path).to_string();
    }

    match std::env::current_dir() {
        Ok(dir) => format::dir_label(&dir),
        Err(_) => UNKNOWN_DIR.to_string(),
    }
}

/// Wraps one terraform invocation
pub struct Dispatcher<N> {
    program: String,
    notify_commands: &'static [&'static str],
    notifier: N,
    locale: Locale,
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            program: PROGRAM.to_string(),
            notify_commands: NOTIFY_COMMANDS,
            notifier,
            locale: Locale::default(),
        }
    }

    /// Run a different executable instead of terraform
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_notify_commands(mut self, commands: &'static [&'static str]) -> Self {
        self.notify_commands = commands;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn should_notify(&self, subcommand: &str) -> bool {
        self.notify_commands.iter().any(|c| *c == subcommand)
    }

    /// Run the wrapped program with `args` and return its exit code.
    ///
    /// `args` reach the child untouched. A lossy UTF-8 copy is only used for
    /// subcommand detection and the message text. `credentials` is only
    /// called when the subcommand notifies.
    pub fn dispatch<S, F>(&self, args: &[S], credentials: F) -> i32
    where
        S: AsRef<OsStr>,
        F: FnOnce() -> Credentials,
    {
        if args.is_empty() {
            return runner::run(&self.program, args).exit_code;
        }

        let start = Instant::now();
        let result = runner::run(&self.program, args);
        let elapsed = start.elapsed();

        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.as_ref().to_string_lossy().into_owned())
            .collect();
        let subcommand = detect_subcommand(&args);

        tracing::debug!(
            subcommand = subcommand.unwrap_or(""),
            exit_code = result.exit_code,
            elapsed_secs = elapsed.as_secs_f64(),
            "{} finished",
            self.program
        );

        if let Some(subcommand) = subcommand.filter(|s| self.should_notify(s)) {
            let payload = Payload {
                subcommand: subcommand.to_string(),
                args: args.clone(),
                work_dir: work_dir_label(&args),
                exit_code: result.exit_code,
                elapsed,
                stderr_tail: result.stderr_tail.clone(),
            };
            self.notify(&payload, credentials());
        }

        result.exit_code
    }

    fn notify(&self, payload: &Payload, credentials: Credentials) {
        if !credentials.is_valid() {
            tracing::debug!("telegram credentials incomplete, skipping notification");
            return;
        }

        let text = format_message(payload, self.locale);
        if let Err(err) = self.notifier.send(&credentials, &text) {
            eprintln!("{} notification failed: {}", LOG_PREFIX, err);
        }
    }
}
