// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Telegram Bot API.
//!
//! Long polling via `getUpdates` with offset tracking left to the caller,
//! and `sendMessage` with rendered reply keyboards.

use std::time::Duration;

use kapterka_core::types::Keyboard;
use kapterka_core::KapterkaError;
use tracing::debug;

use crate::render;
use crate::types::{ApiResponse, Update};

const API_BASE_URL: &str = "https://api.telegram.org";

/// Bot API client bound to one bot token.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Creates a client. The HTTP timeout is the long-poll timeout plus
    /// headroom so a quiet poll is not cut short.
    pub fn new(token: &str, poll_timeout_secs: u64) -> Result<Self, KapterkaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()
            .map_err(|e| KapterkaError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            token: token.to_string(),
            poll_timeout_secs,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Long-polls for updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, KapterkaError> {
        let response = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&[
                ("timeout", self.poll_timeout_secs.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        let parsed: ApiResponse<Vec<Update>> =
            response.json().await.map_err(transport_error)?;
        if !parsed.ok {
            return Err(api_error("getUpdates", parsed.description));
        }
        let updates = parsed.result.unwrap_or_default();
        debug!(count = updates.len(), offset, "polled updates");
        Ok(updates)
    }

    /// Sends a text message with an optional reply keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<(), KapterkaError> {
        let mut payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(markup) = render::reply_markup(keyboard) {
            payload["reply_markup"] = markup;
        }

        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        let parsed: ApiResponse<serde_json::Value> =
            response.json().await.map_err(transport_error)?;
        if !parsed.ok {
            return Err(api_error("sendMessage", parsed.description));
        }
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> KapterkaError {
    KapterkaError::Transport {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

fn api_error(method: &str, description: Option<String>) -> KapterkaError {
    KapterkaError::Transport {
        message: format!(
            "{method} rejected: {}",
            description.unwrap_or_else(|| "no description".to_string())
        ),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TelegramClient {
        TelegramClient::new("TEST:TOKEN", 1)
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn get_updates_parses_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/botTEST:TOKEN/getUpdates"))
            .and(query_param("offset", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": [{
                    "update_id": 8,
                    "message": {
                        "message_id": 1,
                        "chat": {"id": 55},
                        "from": {"id": 42, "username": "pilot"},
                        "text": "Меню"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let updates = client(&server).get_updates(7).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_id, 8);
    }

    #[tokio::test]
    async fn send_message_includes_rendered_keyboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/botTEST:TOKEN/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": 55,
                "text": "Выберите действие:",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .send_message(
                55,
                "Выберите действие:",
                &Keyboard::grid(&[&["Оставить заявку"]]),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn api_level_failure_surfaces_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/botTEST:TOKEN/getUpdates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "description": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let err = client(&server).get_updates(0).await.unwrap_err();
        assert!(matches!(err, KapterkaError::Transport { .. }));
        assert!(err.to_string().contains("Unauthorized"));
    }
}
