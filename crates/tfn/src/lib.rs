//! tfn - Terraform with Telegram notifications
//!
//! Runs terraform with the given arguments untouched, streaming its output to
//! the terminal, and posts a summary to a Telegram chat when `plan`, `apply`,
//! `init` or `validate` finishes. The process exits with terraform's own
//! exit code whether or not the notification goes through.

pub mod config;
pub mod dispatch;
pub mod message;
pub mod runner;
pub mod telegram;

pub use config::Credentials;
pub use dispatch::{detect_subcommand, work_dir_label, Dispatcher};
pub use message::{escape, escape_code_block, format_message, Locale, Payload};
pub use runner::{run, RunResult, Tee};
pub use telegram::{Notifier, NotifyError, TelegramClient};
