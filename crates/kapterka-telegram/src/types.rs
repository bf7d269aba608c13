// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot API wire types (the handful of fields the desk consumes).

use serde::Deserialize;

/// Envelope every Bot API method returns.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One long-poll update.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

/// An inbound message. Non-text messages arrive with `text: None` and are
/// ignored by the serve loop.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<TgUser>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TgUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Builds the reporter identity string stored with every record:
/// `@username` when available, otherwise the display name with a
/// `tg://user?id=` link so the row stays traceable to an account.
pub fn build_reporter(user: &TgUser) -> String {
    if let Some(username) = user.username.as_deref()
        && !username.trim().is_empty()
    {
        return format!("@{username}");
    }

    let display_name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if display_name.is_empty() {
        format!("tg://user?id={}", user.id)
    } else {
        format!("{display_name} (tg://user?id={})", user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: Option<&str>, first: Option<&str>, last: Option<&str>) -> TgUser {
        TgUser {
            id: 42,
            username: username.map(str::to_string),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn reporter_prefers_username() {
        assert_eq!(
            build_reporter(&user(Some("pilot"), Some("Имя"), None)),
            "@pilot"
        );
    }

    #[test]
    fn reporter_falls_back_to_display_name_with_link() {
        assert_eq!(
            build_reporter(&user(None, Some("Имя"), Some("Фамилия"))),
            "Имя Фамилия (tg://user?id=42)"
        );
    }

    #[test]
    fn reporter_falls_back_to_bare_link() {
        assert_eq!(build_reporter(&user(None, None, None)), "tg://user?id=42");
    }

    #[test]
    fn update_deserializes_from_bot_api_json() {
        let raw = r#"{
            "update_id": 100,
            "message": {
                "message_id": 5,
                "chat": {"id": 77},
                "from": {"id": 42, "username": "pilot"},
                "text": "Меню"
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 100);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 77);
        assert_eq!(message.text.as_deref(), Some("Меню"));
    }
}
