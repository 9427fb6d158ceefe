//! Fixed names used across tfn

/// Executable that every invocation is forwarded to
pub const PROGRAM: &str = "terraform";

/// Name shown in notification headers
pub const DISPLAY_NAME: &str = "Terraform";

/// Subcommands that trigger a notification when they finish
pub const NOTIFY_COMMANDS: &[&str] = &["plan", "apply", "init", "validate"];

/// Credential dotfile, relative to the home directory
pub const ENV_FILE: &str = ".tfn.env";

/// Environment variable carrying the bot token
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable carrying the target chat id
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Environment variable selecting the label language
pub const LOCALE_VAR: &str = "TFN_LOCALE";

/// Bot API base URL
pub const API_BASE: &str = "https://api.telegram.org";

/// Markup dialect requested from the Bot API
pub const PARSE_MODE: &str = "MarkdownV2";

/// Number of stderr lines kept for the failure summary
pub const TAIL_LINES: usize = 10;

/// Prefix for operator-facing diagnostics
pub const LOG_PREFIX: &str = "[tfn]";
