// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

use flashdecks_core::Card;
use flashdecks_core::DeckId;
use flashdecks_core::Timestamp;

use crate::cmd::serve::get::DeckFormView;
use crate::cmd::serve::get::lookup_deck;
use crate::cmd::serve::get::render_deck_form;
use crate::cmd::serve::get::render_quiz;
use crate::cmd::serve::state::DialogState;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;

#[derive(Deserialize)]
pub struct MainAction {
    action: String,
    id: Option<String>,
}

#[derive(Deserialize)]
pub struct DeckForm {
    title: String,
    cards: String,
}

#[derive(Deserialize)]
pub struct QuizAction {
    action: String,
}

#[derive(Deserialize)]
pub struct SettingsForm {
    enabled: Option<String>,
}

/// Main screen actions: the confirm-delete dialog state machine and the
/// delete itself.
pub async fn main_action(
    State(state): State<ServerState>,
    Form(form): Form<MainAction>,
) -> Response {
    let mut mutable = state.mutable.lock().unwrap();
    match form.action.as_str() {
        "ask-delete" => {
            let Some(raw_id) = form.id else {
                return bad_request("missing deck id");
            };
            let id = match DeckId::from_hex(&raw_id) {
                Ok(id) => id,
                Err(e) => return bad_request(e.to_string()),
            };
            if let Err(e) = mutable.store.get(id) {
                return (StatusCode::NOT_FOUND, e.to_string()).into_response();
            }
            mutable.dialog = DialogState::ConfirmingDelete(id);
            Redirect::to("/").into_response()
        }
        "cancel-delete" => {
            mutable.dialog = DialogState::None;
            Redirect::to("/").into_response()
        }
        "delete" => {
            // The id comes from the dialog state, not the form: only an
            // open dialog can confirm a delete.
            let DialogState::ConfirmingDelete(id) = mutable.dialog else {
                return bad_request("no delete is pending confirmation");
            };
            mutable.dialog = DialogState::None;
            if let Err(e) = mutable.store.mark_pending(id) {
                return (StatusCode::NOT_FOUND, e.to_string()).into_response();
            }
            match mutable.db.delete_deck(id) {
                Ok(()) => {
                    if let Err(e) = mutable.store.delete(id) {
                        return internal(e);
                    }
                    mutable.flash = Some("Deck has been successfully deleted".to_string());
                }
                Err(e) => {
                    // The deck stays visible, carrying the failure reason.
                    log::error!("deleting deck {id} failed: {e}");
                    if let Err(e) = mutable.store.resolve(id, Err(e.to_string())) {
                        return internal(e);
                    }
                    mutable.flash = Some("Could not delete deck".to_string());
                }
            }
            Redirect::to("/").into_response()
        }
        _ => bad_request("unknown action"),
    }
}

pub async fn create_action(
    State(state): State<ServerState>,
    Form(form): Form<DeckForm>,
) -> Response {
    let mut mutable = state.mutable.lock().unwrap();
    let (title, cards) = match validate_form(&form) {
        Ok(parsed) => parsed,
        Err(error) => return form_error("New deck", "/decks/new", &form, error),
    };
    // Optimistic insert, then write through and reconcile.
    let id = mutable.store.create(title, cards).id();
    if let Err(e) = mutable.store.mark_pending(id) {
        return internal(e);
    }
    let deck = match mutable.store.get(id) {
        Ok(deck) => deck.clone(),
        Err(e) => return internal(e),
    };
    match mutable.db.insert_deck(&deck, Timestamp::now()) {
        Ok(()) => {
            if let Err(e) = mutable.store.resolve(id, Ok(())) {
                return internal(e);
            }
            mutable.flash = Some("Deck has been successfully created".to_string());
            Redirect::to("/").into_response()
        }
        Err(e) => {
            // Roll the optimistic insert back; the form stays open with
            // the entered data so the user can retry.
            log::error!("creating deck failed: {e}");
            if let Err(e) = mutable.store.delete(id) {
                return internal(e);
            }
            form_error(
                "New deck",
                "/decks/new",
                &form,
                format!("Could not save deck: {e}"),
            )
        }
    }
}

pub async fn edit_action(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    Form(form): Form<DeckForm>,
) -> Response {
    let mut mutable = state.mutable.lock().unwrap();
    let previous = match lookup_deck(&mutable, &raw_id) {
        Ok(deck) => deck.clone(),
        Err(response) => return response,
    };
    let id = previous.id();
    let post_to = format!("/decks/{id}");
    let (title, cards) = match validate_form(&form) {
        Ok(parsed) => parsed,
        Err(error) => return form_error("Edit deck", &post_to, &form, error),
    };
    if let Err(e) = mutable.store.update(id, title, cards) {
        return internal(e);
    }
    if let Err(e) = mutable.store.mark_pending(id) {
        return internal(e);
    }
    let updated = match mutable.store.get(id) {
        Ok(deck) => deck.clone(),
        Err(e) => return internal(e),
    };
    match mutable.db.update_deck(&updated) {
        Ok(()) => {
            if let Err(e) = mutable.store.resolve(id, Ok(())) {
                return internal(e);
            }
            mutable.flash = Some("Deck has been successfully updated".to_string());
            Redirect::to("/").into_response()
        }
        Err(e) => {
            // Restore the pre-edit contents so no partial mutation is
            // visible, and keep the form open with the entered data.
            log::error!("updating deck {id} failed: {e}");
            let rollback = mutable
                .store
                .update(id, previous.title().to_string(), previous.cards().to_vec());
            if let Err(e) = rollback {
                return internal(e);
            }
            if let Err(e2) = mutable.store.resolve(id, Err(e.to_string())) {
                return internal(e2);
            }
            form_error(
                "Edit deck",
                &post_to,
                &form,
                format!("Could not save deck: {e}"),
            )
        }
    }
}

/// Quiz commands against the active session. Renders the next view
/// directly rather than redirecting, so a page refresh cannot restart the
/// session by accident.
pub async fn quiz_action(
    State(state): State<ServerState>,
    Form(form): Form<QuizAction>,
) -> Response {
    let mut mutable = state.mutable.lock().unwrap();
    let Some(session) = mutable.session.as_mut() else {
        return Redirect::to("/").into_response();
    };
    let result = match form.action.as_str() {
        "reveal" => session.reveal(),
        "correct" => session.score_positive().and_then(|()| session.advance()),
        "incorrect" => session.score_negative().and_then(|()| session.advance()),
        "restart" => {
            session.restart();
            Ok(())
        }
        _ => return bad_request("unknown action"),
    };
    match result {
        Ok(()) => Html(render_quiz(session).into_string()).into_response(),
        Err(e) => (StatusCode::CONFLICT, e.to_string()).into_response(),
    }
}

pub async fn settings_action(
    State(state): State<ServerState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let mut mutable = state.mutable.lock().unwrap();
    let enabled = form.enabled.is_some();
    if enabled != mutable.reminder.enabled() {
        // Persist first; the scheduler is only touched once the flag is
        // durably written.
        if let Err(e) = mutable.db.set_reminder_enabled(enabled) {
            log::error!("saving reminder setting failed: {e}");
            mutable.flash = Some("Could not save settings".to_string());
            return Redirect::to("/settings").into_response();
        }
        let MutableState {
            reminder,
            scheduler,
            ..
        } = &mut *mutable;
        reminder.set(enabled, scheduler);
        mutable.flash = Some("Settings saved".to_string());
    }
    Redirect::to("/settings").into_response()
}

fn validate_form(form: &DeckForm) -> Result<(String, Vec<Card>), String> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err("Title must not be empty.".to_string());
    }
    let cards = parse_cards(&form.cards)?;
    Ok((title.to_string(), cards))
}

/// Parses the textarea form of a deck's cards: one `question | answer` per
/// line, blank lines skipped.
fn parse_cards(text: &str) -> Result<Vec<Card>, String> {
    let mut cards = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((question, answer)) = line.split_once('|') else {
            return Err(format!("Line {} is not in 'question | answer' form.", n + 1));
        };
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(format!("Line {} is not in 'question | answer' form.", n + 1));
        }
        cards.push(Card::new(question, answer));
    }
    Ok(cards)
}

fn form_error(
    heading: &'static str,
    post_to: &str,
    form: &DeckForm,
    error: String,
) -> Response {
    let view = DeckFormView {
        heading,
        post_to: post_to.to_string(),
        title: form.title.clone(),
        cards: form.cards.clone(),
        error: Some(error),
    };
    Html(render_deck_form(&view).into_string()).into_response()
}

fn bad_request(msg: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, msg.into()).into_response()
}

fn internal(e: impl Display) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
