//! tfn - Terraform with Telegram notifications
//!
//! Usage is identical to terraform: `tfn -chdir=infra apply`.
//! Credentials come from TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID or ~/.tfn.env.

use std::ffi::OsString;

use tracing_subscriber::EnvFilter;

use tfn::{Credentials, Dispatcher, Locale, TelegramClient};

fn main() {
    // Logs go to stderr so terraform's stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Raw OS strings, so non-UTF-8 arguments still reach terraform
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let dispatcher = Dispatcher::new(TelegramClient::new()).with_locale(Locale::from_env());
    let code = dispatcher.dispatch(&args, Credentials::load);

    std::process::exit(code);
}
