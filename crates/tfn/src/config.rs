//! Credential loading
//!
//! Credentials come from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` first and
//! fall back to `~/.tfn.env`. Each field is merged independently, so the
//! environment can supply the token while the dotfile supplies the chat id.

use std::fs;
use std::path::Path;

use tfn_core::consts::{CHAT_ID_VAR, TOKEN_VAR};
use tfn_core::Paths;

/// Telegram bot credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Bot API token
    pub bot_token: String,
    /// Target chat id
    pub chat_id: String,
}

impl Credentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Both fields are set
    pub fn is_valid(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    /// Load from the process environment, falling back to the dotfile
    pub fn load() -> Self {
        Self::resolve(Self::from_env(), &Paths::new())
    }

    /// Merge environment credentials with the dotfile under `paths`.
    ///
    /// The dotfile is only read when the environment is incomplete.
    pub fn resolve(env: Credentials, paths: &Paths) -> Self {
        if env.is_valid() {
            return env;
        }

        let file = paths
            .env_file()
            .map(|path| Self::from_file(&path))
            .unwrap_or_default();

        env.or(file)
    }

    /// Read the two credential variables; unset reads as empty
    pub fn from_env() -> Self {
        Self {
            bot_token: std::env::var(TOKEN_VAR).unwrap_or_default(),
            chat_id: std::env::var(CHAT_ID_VAR).unwrap_or_default(),
        }
    }

    /// Read a KEY=VALUE dotfile; a missing or unreadable file yields empty credentials
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "credential file not read");
                Self::default()
            }
        }
    }

    /// Parse dotfile contents, recognizing only the two credential keys
    pub fn parse(content: &str) -> Self {
        let mut creds = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim());

            match key.trim() {
                TOKEN_VAR => creds.bot_token = value.to_string(),
                CHAT_ID_VAR => creds.chat_id = value.to_string(),
                _ => {}
            }
        }

        creds
    }

    /// Fill empty fields of `self` from `fallback`
    fn or(self, fallback: Credentials) -> Self {
        Self {
            bot_token: if self.bot_token.is_empty() {
                fallback.bot_token
            } else {
                self.bot_token
            },
            chat_id: if self.chat_id.is_empty() {
                fallback.chat_id
            } else {
                self.chat_id
            },
        }
    }
}

/// Strip one layer of matching single or double quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_validity() {
        assert!(Credentials::new("t", "c").is_valid());
        assert!(!Credentials::new("t", "").is_valid());
        assert!(!Credentials::new("", "c").is_valid());
        assert!(!Credentials::default().is_valid());
    }

    #[test]
    fn test_parse_env_file() {
        let content = r#"
# telegram settings
TELEGRAM_BOT_TOKEN = "123:abc"

TELEGRAM_CHAT_ID='-100200'
OTHER_KEY=ignored
not a pair
"#;
        let creds = Credentials::parse(content);
        assert_eq!(creds.bot_token, "123:abc");
        assert_eq!(creds.chat_id, "-100200");
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let creds = Credentials::parse("TELEGRAM_BOT_TOKEN=abc=def==\n");
        assert_eq!(creds.bot_token, "abc=def==");
    }

    #[test]
    fn test_unquote_one_layer() {
        assert_eq!(unquote("\"value\""), "value");
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote("\"'value'\""), "'value'");
        assert_eq!(unquote("\"unterminated"), "\"unterminated");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_env_wins_when_complete() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".tfn.env"),
            "TELEGRAM_BOT_TOKEN=file-token\nTELEGRAM_CHAT_ID=file-chat\n",
        )
        .unwrap();

        let creds = Credentials::resolve(
            Credentials::new("env-token", "env-chat"),
            &Paths::with_home(dir.path()),
        );
        assert_eq!(creds, Credentials::new("env-token", "env-chat"));
    }

    #[test]
    fn test_merge_per_field() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".tfn.env"),
            "TELEGRAM_BOT_TOKEN=file-token\nTELEGRAM_CHAT_ID=file-chat\n",
        )
        .unwrap();

        let creds = Credentials::resolve(
            Credentials::new("env-token", ""),
            &Paths::with_home(dir.path()),
        );
        assert_eq!(creds, Credentials::new("env-token", "file-chat"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let creds = Credentials::resolve(Credentials::default(), &Paths::with_home(dir.path()));
        assert_eq!(creds, Credentials::default());
        assert!(!creds.is_valid());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_both_vars() {
        std::env::set_var(TOKEN_VAR, "env-token");
        std::env::set_var(CHAT_ID_VAR, "env-chat");
        let creds = Credentials::from_env();
        std::env::remove_var(TOKEN_VAR);
        std::env::remove_var(CHAT_ID_VAR);

        assert_eq!(creds, Credentials::new("env-token", "env-chat"));
    }

    #[test]
    #[serial]
    fn test_from_env_unset_is_empty() {
        std::env::remove_var(TOKEN_VAR);
        std::env::remove_var(CHAT_ID_VAR);
        assert_eq!(Credentials::from_env(), Credentials::default());
    }

    #[test]
    #[serial]
    fn test_empty_env_var_falls_back_to_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".tfn.env"), "TELEGRAM_CHAT_ID=file-chat\n").unwrap();

        std::env::set_var(TOKEN_VAR, "env-token");
        std::env::set_var(CHAT_ID_VAR, "");
        let creds = Credentials::resolve(Credentials::from_env(), &Paths::with_home(dir.path()));
        std::env::remove_var(TOKEN_VAR);
        std::env::remove_var(CHAT_ID_VAR);

        assert_eq!(creds, Credentials::new("env-token", "file-chat"));
    }

    #[test]
    fn test_no_home_keeps_env() {
        let creds = Credentials::resolve(Credentials::new("env-token", ""), &Paths { home: None });
        assert_eq!(creds, Credentials::new("env-token", ""));
    }
}
