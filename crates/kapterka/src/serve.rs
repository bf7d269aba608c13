// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kapterka serve` command implementation.
//!
//! Wires the desk to the Telegram long-poll loop. One logical worker
//! processes inbound messages to completion, in order; notification fan-out
//! runs as a spawned task and serializes against the handler through the
//! per-store locks. A failed poll or a failed handler logs and continues --
//! the loop itself never exits on a per-message error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use kapterka_config::KapterkaConfig;
use kapterka_core::types::{Keyboard, UserId};
use kapterka_core::KapterkaError;
use kapterka_desk::Desk;
use kapterka_telegram::{build_reporter, TelegramClient};

/// Runs the `kapterka serve` command. Never returns except on startup
/// failure (missing token, unreadable tables directory).
pub async fn run_serve(config: KapterkaConfig) -> Result<(), KapterkaError> {
    init_tracing(&config.service.log_level);

    let Some(token) = config.telegram.bot_token.clone() else {
        return Err(KapterkaError::Config(
            "telegram.bot_token is required to serve".to_string(),
        ));
    };

    std::fs::create_dir_all(&config.tables.dir).map_err(|e| {
        KapterkaError::Config(format!(
            "cannot create tables dir {}: {e}",
            config.tables.dir
        ))
    })?;

    let desk = Arc::new(Desk::open(&config)?);
    let client = TelegramClient::new(&token, config.telegram.poll_timeout_secs)?;
    info!(name = %config.service.name, "request desk started");

    let mut offset = 0i64;
    loop {
        let updates = match client.get_updates(offset).await {
            Ok(updates) => updates,
            Err(error) => {
                error!(%error, "getUpdates failed");
                tokio::time::sleep(Duration::from_secs(2)).await;
                continue;
            }
        };

        for update in updates {
            offset = update.update_id + 1;

            let Some(message) = update.message else {
                continue;
            };
            let Some(from) = message.from.as_ref() else {
                continue;
            };
            let Some(text) = message.text.as_deref() else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }

            let user = UserId(from.id);
            let reporter = build_reporter(from);

            let response = match desk.handle_text(user, &reporter, text) {
                Ok(response) => response,
                Err(error) => {
                    // Store corruption and the like: fatal for this message,
                    // never for the process.
                    error!(%error, %user, "message handling failed");
                    if let Err(error) = client
                        .send_message(
                            message.chat.id,
                            "Произошла ошибка при обработке сообщения. Попробуйте ещё раз.",
                            &Keyboard::None,
                        )
                        .await
                    {
                        error!(%error, "error reply delivery failed");
                    }
                    continue;
                }
            };

            for reply in &response.replies {
                if let Err(error) = client
                    .send_message(message.chat.id, &reply.text, &reply.keyboard)
                    .await
                {
                    error!(%error, "reply delivery failed");
                }
            }

            if !response.notifications.is_empty() {
                let client = client.clone();
                let notifications = response.notifications;
                tokio::spawn(async move {
                    for notification in notifications {
                        // Per-recipient failures are logged and skipped; the
                        // batch keeps going.
                        if let Err(error) = client
                            .send_message(notification.recipient.0, &notification.text, &Keyboard::None)
                            .await
                        {
                            warn!(
                                %error,
                                recipient = %notification.recipient,
                                "notification delivery failed"
                            );
                        }
                    }
                });
            }
        }
    }
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
