//! Telegram MarkdownV2 message rendering
//!
//! See <https://core.telegram.org/bots/api#markdownv2-style> for the escaping
//! rules. Every line outside the code fence goes through [`escape`]; the
//! stderr tail inside the fence goes through [`escape_code_block`].

use std::time::Duration;

use tfn_core::consts::{DISPLAY_NAME, LOCALE_VAR, PROGRAM};
use tfn_core::format;

/// Characters that must be backslash-escaped outside code entities
const SPECIAL_CHARS: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
    '!',
];

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Everything needed to describe one finished run
#[derive(Debug, Clone)]
pub struct Payload {
    /// Detected terraform subcommand
    pub subcommand: String,
    /// Full argument list as passed to terraform
    pub args: Vec<String>,
    /// Working directory label
    pub work_dir: String,
    /// Wrapped process exit code
    pub exit_code: i32,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
    /// Tail of stderr
    pub stderr_tail: String,
}

/// Label language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Korean,
    English,
}

struct Labels {
    succeeded: &'static str,
    failed: &'static str,
    directory: &'static str,
    elapsed: &'static str,
    command: &'static str,
    error_summary: &'static str,
}

const KOREAN: Labels = Labels {
    succeeded: "성공",
    failed: "실패",
    directory: "디렉토리:",
    elapsed: "소요시간:",
    command: "명령어:",
    error_summary: "에러 요약:",
};

const ENGLISH: Labels = Labels {
    succeeded: "succeeded",
    failed: "failed",
    directory: "directory:",
    elapsed: "elapsed:",
    command: "command:",
    error_summary: "error summary:",
};

impl Locale {
    /// Parse a locale name; unknown names return None
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Some(Self::Korean),
            "en" | "english" => Some(Self::English),
            _ => None,
        }
    }

    /// Locale from `TFN_LOCALE`, defaulting to Korean
    pub fn from_env() -> Self {
        std::env::var(LOCALE_VAR)
            .ok()
            .and_then(|name| Self::parse(&name))
            .unwrap_or_default()
    }

    fn labels(self) -> &'static Labels {
        match self {
            Self::Korean => &KOREAN,
            Self::English => &ENGLISH,
        }
    }
}

/// Render the notification text for a finished run
pub fn format_message(payload: &Payload, locale: Locale) -> String {
    let labels = locale.labels();

    let header = if payload.exit_code == 0 {
        format!("✅ {} {} {}", DISPLAY_NAME, payload.subcommand, labels.succeeded)
    } else {
        format!("❌ {} {} {}", DISPLAY_NAME, payload.subcommand, labels.failed)
    };

    let lines = [
        header,
        DIVIDER.to_string(),
        format!("📁 {} {}", labels.directory, payload.work_dir),
        format!("⏱ {} {}", labels.elapsed, format::seconds(payload.elapsed)),
        format!("💻 {} {} {}", labels.command, PROGRAM, payload.args.join(" ")),
    ];

    let mut text = lines
        .iter()
        .map(|line| escape(line))
        .collect::<Vec<_>>()
        .join("\n");

    if payload.exit_code != 0 && !payload.stderr_tail.is_empty() {
        text.push_str("\n\n");
        text.push_str(&escape(&format!("📋 {}", labels.error_summary)));
        text.push('\n');
        text.push_str("```\n");
        text.push_str(&escape_code_block(&payload.stderr_tail));
        text.push_str("\n```");
    }

    text
}

/// Escape text for MarkdownV2 outside of code entities
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape text placed inside a fenced code block, where only `\` and `` ` `` are special
pub fn escape_code_block(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == '`' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
