// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request desk: routing, permissions, sessions, and flow completion.
//!
//! One [`Desk`] per process. Dispatch order for an inbound text: display-name
//! refresh, use-bot gate, cancellation, manual-input guard, menu commands,
//! completion commands, flow entry points, then the in-progress session.
//! Every reachable failure produces a reply to the originating user.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info};

use kapterka_access::AccessOverlay;
use kapterka_config::KapterkaConfig;
use kapterka_core::model::Status;
use kapterka_core::types::{Capability, Keyboard, Reply, UserId};
use kapterka_core::KapterkaError;
use kapterka_flow::handle::{AccessAction, AccessCommand, FlowOutput, Outcome};
use kapterka_flow::{catalog, handle::handle, keyboards, Session};
use kapterka_storage::{AccessStore, ConsumablesStore, RepairStore, RequestStore};

use crate::format;

/// One outbound notification produced by a handled message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: UserId,
    pub text: String,
}

/// Everything a handled message produces: replies to the sender and
/// notifications the transport fans out best-effort.
#[derive(Debug, Default)]
pub struct Response {
    pub replies: Vec<Reply>,
    pub notifications: Vec<Notification>,
}

impl Response {
    fn reply_only(reply: Reply) -> Self {
        Response {
            replies: vec![reply],
            notifications: Vec::new(),
        }
    }
}

/// The request desk.
pub struct Desk {
    requests: RequestStore,
    repairs: RepairStore,
    consumables: ConsumablesStore,
    access: AccessStore,
    overlay: AccessOverlay,
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl Desk {
    /// Opens the four stores, applies the bootstrap grants, and hydrates the
    /// overlay from the users table unioned with the bootstrap ids.
    pub fn open(config: &KapterkaConfig) -> Result<Self, KapterkaError> {
        let requests = RequestStore::open(config.tables.requests_path())?;
        let repairs = RepairStore::open(config.tables.repairs_path())?;
        let consumables = ConsumablesStore::open(config.tables.consumables_path())?;
        let access = AccessStore::open(
            config.tables.users_path(),
            config.tables.recommendations_path(),
        )?;

        let bootstrap = config.access.bootstrap_sets();
        let borrowed: Vec<(Capability, &[UserId])> = bootstrap
            .iter()
            .map(|(capability, ids)| (*capability, ids.as_slice()))
            .collect();
        access.bootstrap(&borrowed)?;

        let overlay = AccessOverlay::hydrate(&access.all_users()?, &bootstrap);
        info!(dir = %config.tables.dir, "desk opened");

        Ok(Self {
            requests,
            repairs,
            consumables,
            access,
            overlay,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Handles one inbound `(user, text)` pair. The reporter string is the
    /// identity stored with any record this message completes.
    pub fn handle_text(
        &self,
        user: UserId,
        reporter: &str,
        text: &str,
    ) -> Result<Response, KapterkaError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Response::default());
        }

        self.access.touch_display_name(user, reporter)?;

        if !self.overlay.allows(user, Capability::UseBot) {
            debug!(%user, "denied: no use-bot capability");
            return Ok(Response::reply_only(Reply::new(
                "У вас нет доступа к боту.",
                Keyboard::None,
            )));
        }

        if text == catalog::BTN_CANCEL {
            let removed = self.lock_sessions().remove(&user).is_some();
            let message = if removed {
                "Заявка отменена."
            } else {
                "Нет активной заявки для отмены."
            };
            return Ok(Response::reply_only(self.menu_reply(user, message)));
        }

        // A pending free-text step swallows menu words so they cannot be
        // captured as field values or abandon the flow by accident.
        {
            let sessions = self.lock_sessions();
            if let Some(session) = sessions.get(&user)
                && session.is_manual_input()
                && catalog::is_menu_command(text)
            {
                return Ok(Response::reply_only(Reply::new(
                    "Сейчас идёт ручной ввод. Завершите текущий шаг, чтобы открыть меню.",
                    keyboards::for_session(session),
                )));
            }
        }

        if text == catalog::CMD_START || text == catalog::CMD_MENU {
            self.lock_sessions().remove(&user);
            return Ok(Response::reply_only(
                self.menu_reply(user, "Выберите действие:"),
            ));
        }

        if text == catalog::BTN_NEW_REQUEST {
            return Ok(self.start_session(user, Session::flow_select(), "Выберите тип заявки:"));
        }

        if text == catalog::BTN_ACTIVE {
            return self.listing(user, Status::Active);
        }

        if text == catalog::BTN_COMPLETED {
            return self.listing(user, Status::Completed);
        }

        if let Some(parsed) = parse_complete_command(text, "/complete_repair") {
            if !self.overlay.allows(user, Capability::Complete) {
                return Ok(Response::reply_only(
                    self.menu_reply(user, "У вас нет прав завершать ремонты."),
                ));
            }
            let message = match parsed {
                Err(()) => "Использование: /complete_repair <id>".to_string(),
                Ok(id) => {
                    if self.repairs.complete(id)? {
                        info!(id, %user, "repair completed");
                        format!("Ремонт #{id} завершён.")
                    } else {
                        format!("Заявка на ремонт #{id} не найдена или уже завершена.")
                    }
                }
            };
            return Ok(Response::reply_only(self.menu_reply(user, &message)));
        }

        if let Some(parsed) = parse_complete_command(text, "/complete_consumables") {
            if !self.overlay.allows(user, Capability::Complete) {
                return Ok(Response::reply_only(
                    self.menu_reply(user, "У вас нет прав завершать заявки."),
                ));
            }
            let message = match parsed {
                Err(()) => "Использование: /complete_consumables <id>".to_string(),
                Ok(id) => {
                    if self.consumables.complete(id)? {
                        info!(id, %user, "consumable request completed");
                        format!("Заявка на комплектующие #{id} завершена.")
                    } else {
                        format!("Заявка на комплектующие #{id} не найдена или уже завершена.")
                    }
                }
            };
            return Ok(Response::reply_only(self.menu_reply(user, &message)));
        }

        if let Some(parsed) = parse_complete_command(text, "/complete") {
            if !self.overlay.allows(user, Capability::Complete) {
                return Ok(Response::reply_only(
                    self.menu_reply(user, "У вас нет прав завершать заявки."),
                ));
            }
            let message = match parsed {
                Err(()) => "Использование: /complete <id>".to_string(),
                Ok(id) => {
                    if self.requests.complete(id)? {
                        info!(id, %user, "equipment request completed");
                        format!("Заявка #{id} завершена.")
                    } else {
                        format!("Активная заявка #{id} не найдена.")
                    }
                }
            };
            return Ok(Response::reply_only(self.menu_reply(user, &message)));
        }

        if text == catalog::BTN_ACCESS {
            if !self.overlay.allows(user, Capability::ManageAccess) {
                return Ok(Response::reply_only(
                    self.menu_reply(user, "У вас нет прав управлять доступом."),
                ));
            }
            return Ok(self.start_session(
                user,
                Session::access_admin(),
                "ID пользователя: (Ручной ввод)",
            ));
        }

        if text == catalog::BTN_REFERRAL {
            return Ok(self.start_session(
                user,
                Session::referral(),
                "ID кандидата: (Ручной ввод)",
            ));
        }

        // Everything else is input to the session in progress, if any.
        let mut sessions = self.lock_sessions();
        let Some(session) = sessions.get_mut(&user) else {
            return Ok(Response::reply_only(
                self.menu_reply(user, "Не понял команду. Нажмите /start"),
            ));
        };
        match handle(session, text) {
            Outcome::Stay { prompt } | Outcome::Advance { prompt } => {
                let keyboard = keyboards::for_session(session);
                Ok(Response::reply_only(Reply::new(prompt, keyboard)))
            }
            Outcome::Done(output) => {
                sessions.remove(&user);
                drop(sessions);
                self.finish_flow(user, reporter, output)
            }
        }
    }

    /// Starting a flow silently discards any prior unfinished session.
    fn start_session(&self, user: UserId, session: Session, prompt: &str) -> Response {
        let keyboard = keyboards::for_session(&session);
        self.lock_sessions().insert(user, session);
        Response::reply_only(Reply::new(prompt, keyboard))
    }

    fn finish_flow(
        &self,
        user: UserId,
        reporter: &str,
        output: FlowOutput,
    ) -> Result<Response, KapterkaError> {
        match output {
            FlowOutput::Equipment(request) => {
                let id = self.requests.add(reporter, &request)?;
                let stored = self.requests.get(id)?.ok_or_else(|| {
                    KapterkaError::Internal(format!("request {id} missing right after append"))
                })?;
                info!(id, %user, "equipment request created");
                let card = format::request_card(&stored);
                Ok(Response {
                    replies: vec![self.menu_reply(user, &format!("Заявка создана!\n\n{card}"))],
                    notifications: self.notify(
                        user,
                        Capability::NotifyRequests,
                        &format!("Новая заявка!\n\n{card}"),
                    ),
                })
            }
            FlowOutput::Repair(repair) => {
                let id = self.repairs.add(reporter, &repair)?;
                let stored = self.repairs.get(id)?.ok_or_else(|| {
                    KapterkaError::Internal(format!("repair {id} missing right after append"))
                })?;
                info!(id, %user, "repair created");
                let card = format::repair_card(&stored);
                Ok(Response {
                    replies: vec![
                        self.menu_reply(user, &format!("Заявка на ремонт создана!\n\n{card}")),
                    ],
                    notifications: self.notify(
                        user,
                        Capability::NotifyRequests,
                        &format!("Новая заявка на ремонт!\n\n{card}"),
                    ),
                })
            }
            FlowOutput::Consumable(consumable) => {
                let id = self.consumables.add(reporter, &consumable)?;
                let stored = self.consumables.get(id)?.ok_or_else(|| {
                    KapterkaError::Internal(format!("consumable {id} missing right after append"))
                })?;
                info!(id, %user, "consumable request created");
                let card = format::consumable_card(&stored);
                Ok(Response {
                    replies: vec![self.menu_reply(
                        user,
                        &format!("Заявка на комплектующие создана!\n\n{card}"),
                    )],
                    notifications: self.notify(
                        user,
                        Capability::NotifyRequests,
                        &format!("Новая заявка на комплектующие!\n\n{card}"),
                    ),
                })
            }
            FlowOutput::Access(command) => self.apply_access(user, command),
            FlowOutput::Referral(recommendation) => {
                let id = self.access.add_recommendation(reporter, &recommendation)?;
                let stored = self.access.recommendation(id)?.ok_or_else(|| {
                    KapterkaError::Internal(format!(
                        "recommendation {id} missing right after append"
                    ))
                })?;
                info!(id, %user, "recommendation created");
                let card = format::recommendation_card(&stored);
                Ok(Response {
                    replies: vec![
                        self.menu_reply(user, &format!("Рекомендация записана!\n\n{card}")),
                    ],
                    notifications: self.notify(
                        user,
                        Capability::NotifyRecommendations,
                        &format!("Новая рекомендация!\n\n{card}"),
                    ),
                })
            }
        }
    }

    /// Applies one access change to the store and the overlay in lockstep.
    fn apply_access(
        &self,
        user: UserId,
        command: AccessCommand,
    ) -> Result<Response, KapterkaError> {
        let target = command.target;
        let message = match command.action {
            AccessAction::Grant(capability) => {
                self.access.set_flag(target, capability, true)?;
                self.overlay.grant(target, capability);
                format!("Пользователю {target} выдано: {}.", capability.label())
            }
            AccessAction::Revoke(capability) => {
                self.access.set_flag(target, capability, false)?;
                self.overlay.revoke(target, capability);
                format!("У пользователя {target} забрано: {}.", capability.label())
            }
            AccessAction::RevokeAll => {
                self.access.revoke_all(target)?;
                self.overlay.revoke_all(target);
                format!("У пользователя {target} забран весь доступ.")
            }
        };
        info!(%user, %target, "access updated");
        Ok(Response::reply_only(self.menu_reply(user, &message)))
    }

    fn listing(&self, user: UserId, status: Status) -> Result<Response, KapterkaError> {
        let requests = self.requests.by_status(status)?;
        let repairs = self.repairs.by_status(status)?;
        let total = requests.len() + repairs.len();

        let (empty_message, header) = match status {
            Status::Active => ("Активных заявок пока нет.", "Активные заявки (всего)"),
            Status::Completed => ("Завершённых заявок пока нет.", "Завершённые заявки (всего)"),
        };
        if total == 0 {
            return Ok(Response::reply_only(self.menu_reply(user, empty_message)));
        }

        let mut replies = vec![self.menu_reply(user, &format!("{header}: {total}"))];
        replies.push(self.menu_reply(user, &format!("🛩 Заявки на дроны: {}", requests.len())));
        for request in &requests {
            replies.push(self.menu_reply(user, &format::request_card(request)));
        }
        replies.push(self.menu_reply(user, &format!("🛠 Ремонт: {}", repairs.len())));
        for repair in &repairs {
            replies.push(self.menu_reply(user, &format::repair_card(repair)));
        }
        Ok(Response {
            replies,
            notifications: Vec::new(),
        })
    }

    /// Notification targets: every member of the capability set except the
    /// originating user.
    fn notify(&self, sender: UserId, capability: Capability, text: &str) -> Vec<Notification> {
        self.overlay
            .members(capability)
            .into_iter()
            .filter(|recipient| *recipient != sender)
            .map(|recipient| Notification {
                recipient,
                text: text.to_string(),
            })
            .collect()
    }

    fn menu_reply(&self, user: UserId, text: &str) -> Reply {
        let show_access_admin = self.overlay.allows(user, Capability::ManageAccess);
        Reply::new(text, keyboards::main_menu(show_access_admin))
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, Session>> {
        self.sessions.lock().expect("session map poisoned")
    }
}

/// Matches `command` or `command <id>` (command token case-insensitive).
/// `None` when the text is some other command; `Some(Err(()))` when the
/// arguments are malformed.
fn parse_complete_command(text: &str, command: &str) -> Option<Result<i64, ()>> {
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    if !first.eq_ignore_ascii_case(command) {
        return None;
    }
    match (parts.next(), parts.next()) {
        (Some(id), None) => match id.parse::<i64>() {
            Ok(id) => Some(Ok(id)),
            Err(_) => Some(Err(())),
        },
        _ => Some(Err(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_command_parses_id() {
        assert_eq!(parse_complete_command("/complete 7", "/complete"), Some(Ok(7)));
        assert_eq!(
            parse_complete_command("/COMPLETE 7", "/complete"),
            Some(Ok(7))
        );
        assert_eq!(parse_complete_command("/complete", "/complete"), Some(Err(())));
        assert_eq!(
            parse_complete_command("/complete seven", "/complete"),
            Some(Err(()))
        );
        assert_eq!(
            parse_complete_command("/complete 1 2", "/complete"),
            Some(Err(()))
        );
    }

    #[test]
    fn complete_command_does_not_shadow_longer_commands() {
        assert_eq!(
            parse_complete_command("/complete_repair 7", "/complete"),
            None
        );
        assert_eq!(
            parse_complete_command("/complete_repair 7", "/complete_repair"),
            Some(Ok(7))
        );
    }
}
