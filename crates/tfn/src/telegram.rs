//! Telegram Bot API delivery
//!
//! One synchronous `sendMessage` POST per run. Failures are returned to the
//! caller, never retried.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tfn_core::consts::{API_BASE, PARSE_MODE};

use crate::config::Credentials;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delivery errors, one variant per stage
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("marshal message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("telegram API returned status {code}{}", describe(.description))]
    Status { code: u16, description: Option<String> },
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

/// Something that can deliver rendered message text
pub trait Notifier {
    fn send(&self, credentials: &Credentials, text: &str) -> Result<(), NotifyError>;
}

/// `sendMessage` request body
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Error body returned by the Bot API
#[derive(Debug, Deserialize)]
struct ApiError {
    description: Option<String>,
}

/// Bot API client
#[derive(Debug, Clone)]
pub struct TelegramClient {
    api_base: String,
}

impl Default for TelegramClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TelegramClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    /// Client talking to a different API host
    pub fn with_base_url(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    fn endpoint(&self, token: &str) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            token
        )
    }
}

impl Notifier for TelegramClient {
    fn send(&self, credentials: &Credentials, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(&SendMessage {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: PARSE_MODE,
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("tfn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NotifyError::Client)?;

        // The URL embeds the bot token; keep it out of error messages.
        let response = client
            .post(self.endpoint(&credentials.bot_token))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| NotifyError::Request(err.without_url()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let description = response
                .text()
                .ok()
                .and_then(|body| serde_json::from_str::<ApiError>(&body).ok())
                .and_then(|err| err.description);
            return Err(NotifyError::Status {
                code: status.as_u16(),
                description,
            });
        }

        tracing::debug!(chat_id = %credentials.chat_id, "notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn creds() -> Credentials {
        Credentials::new("123:abc", "-100200")
    }

    #[test]
    fn test_endpoint() {
        let client = TelegramClient::new();
        assert_eq!(
            client.endpoint("123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        let client = TelegramClient::with_base_url("http://localhost:8080/");
        assert_eq!(
            client.endpoint("t"),
            "http://localhost:8080/bott/sendMessage"
        );
    }

    #[test]
    fn test_send_posts_json() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "chat_id": "-100200",
                "text": "✅ hello\\.",
                "parse_mode": "MarkdownV2",
            })))
            .with_status(200)
            .with_body(r#"{"ok":true,"result":{}}"#)
            .create();

        let client = TelegramClient::with_base_url(server.url());
        client.send(&creds(), "✅ hello\\.").unwrap();
        mock.assert();
    }

    #[test]
    fn test_non_200_is_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(400)
            .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: can't parse entities"}"#)
            .create();

        let client = TelegramClient::with_base_url(server.url());
        let err = client.send(&creds(), "text").unwrap_err();
        mock.assert();

        match &err {
            NotifyError::Status { code, description } => {
                assert_eq!(*code, 400);
                assert_eq!(
                    description.as_deref(),
                    Some("Bad Request: can't parse entities")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "telegram API returned status 400: Bad Request: can't parse entities"
        );
    }

    #[test]
    fn test_non_200_without_json_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create();

        let client = TelegramClient::with_base_url(server.url());
        let err = client.send(&creds(), "text").unwrap_err();
        assert_eq!(err.to_string(), "telegram API returned status 502");
    }

    #[test]
    fn test_transport_failure_hides_token() {
        let client = TelegramClient::with_base_url("http://127.0.0.1:1");
        let err = client.send(&creds(), "text").unwrap_err();
        assert!(matches!(err, NotifyError::Request(_)));
        assert!(err.to_string().starts_with("send request: "));
        assert!(!err.to_string().contains("123:abc"));
    }
}
