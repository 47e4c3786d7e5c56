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

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use maud::Markup;
use maud::html;

use flashdecks_core::Deck;
use flashdecks_core::DeckId;
use flashdecks_core::QuizSession;
use flashdecks_core::SessionState;

use crate::cmd::serve::state::DialogState;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::flash_bar;
use crate::cmd::serve::template::page_template;

/// Main screen: the deck list, the optional snackbar, and the
/// confirm-delete dialog when one is open.
pub async fn main_page(State(state): State<ServerState>) -> Html<String> {
    let mut mutable = state.mutable.lock().unwrap();
    let flash = mutable.take_flash();
    Html(render_main(&mutable, flash.as_deref()).into_string())
}

pub fn render_main(mutable: &MutableState, flash: Option<&str>) -> Markup {
    page_template(html! {
        div class="page" {
            header {
                h1 { "flashdecks" }
                nav {
                    a href="/decks/new" { "New Deck" }
                    a href="/settings" { "Settings" }
                }
            }
            (flash_bar(flash))
            @if mutable.store.is_empty() {
                p class="empty" { "No decks yet. Create your first deck to start studying." }
            }
            ul class="deck-list" {
                @for entry in mutable.store.entries() {
                    @let deck = entry.deck();
                    li class="deck" {
                        div class="deck-info" {
                            span class="deck-title" { (deck.title()) }
                            span class="deck-count" { (card_count_label(deck.card_count())) }
                            @if entry.status().is_pending() {
                                span class="deck-pending" { "saving..." }
                            }
                            @if let Some(reason) = entry.status().failure() {
                                span class="deck-error" { (reason) }
                            }
                        }
                        div class="deck-actions" {
                            a href=(format!("/decks/{}/quiz", deck.id())) { "Study" }
                            a href=(format!("/decks/{}", deck.id())) { "Edit" }
                            form method="post" action="/" {
                                input type="hidden" name="action" value="ask-delete";
                                input type="hidden" name="id" value=(deck.id());
                                button type="submit" class="danger" { "Delete" }
                            }
                        }
                    }
                }
            }
            @if let DialogState::ConfirmingDelete(_) = mutable.dialog {
                (confirm_delete_dialog())
            }
        }
    })
}

fn confirm_delete_dialog() -> Markup {
    html! {
        div class="dialog-backdrop" {
            div class="dialog" {
                h2 { "Delete deck?" }
                p {
                    "This deck and all it cards will be deleted. \
                     You can edit this deck if you want to change something."
                }
                div class="dialog-actions" {
                    form method="post" action="/" {
                        input type="hidden" name="action" value="delete";
                        button type="submit" class="danger" { "Delete" }
                    }
                    form method="post" action="/" {
                        input type="hidden" name="action" value="cancel-delete";
                        button type="submit" { "Cancel" }
                    }
                }
            }
        }
    }
}

fn card_count_label(count: usize) -> String {
    if count == 1 {
        "1 card".to_string()
    } else {
        format!("{count} cards")
    }
}

/// The create/edit form, also re-rendered on validation and persistence
/// failures with the entered data retained.
pub struct DeckFormView {
    pub heading: &'static str,
    pub post_to: String,
    pub title: String,
    pub cards: String,
    pub error: Option<String>,
}

pub fn render_deck_form(view: &DeckFormView) -> Markup {
    page_template(html! {
        div class="page" {
            header { h1 { (view.heading) } }
            @if let Some(error) = &view.error {
                p class="error" { (error) }
            }
            form method="post" action=(view.post_to) class="deck-form" {
                label for="title" { "Title" }
                input type="text" id="title" name="title" value=(view.title);
                label for="cards" { "Cards" }
                textarea id="cards" name="cards" rows="12" { (view.cards) }
                p class="hint" { "One card per line: question | answer" }
                div class="form-actions" {
                    button type="submit" { "Save" }
                    a href="/" { "Cancel" }
                }
            }
        }
    })
}

pub async fn create_page() -> Html<String> {
    let view = DeckFormView {
        heading: "New deck",
        post_to: "/decks/new".to_string(),
        title: String::new(),
        cards: String::new(),
        error: None,
    };
    Html(render_deck_form(&view).into_string())
}

pub async fn edit_page(State(state): State<ServerState>, Path(id): Path<String>) -> Response {
    let mutable = state.mutable.lock().unwrap();
    let deck = match lookup_deck(&mutable, &id) {
        Ok(deck) => deck,
        Err(response) => return response,
    };
    let view = DeckFormView {
        heading: "Edit deck",
        post_to: format!("/decks/{}", deck.id()),
        title: deck.title().to_string(),
        cards: cards_to_text(deck),
        error: None,
    };
    Html(render_deck_form(&view).into_string()).into_response()
}

/// Starts a fresh quiz session from the current store snapshot of the deck.
pub async fn quiz_page(State(state): State<ServerState>, Path(id): Path<String>) -> Response {
    let mut mutable = state.mutable.lock().unwrap();
    let deck = match lookup_deck(&mutable, &id) {
        Ok(deck) => deck.clone(),
        Err(response) => return response,
    };
    let session = QuizSession::start(deck, state.policy);
    let page = render_quiz(&session);
    mutable.session = Some(session);
    Html(page.into_string()).into_response()
}

pub fn render_quiz(session: &QuizSession) -> Markup {
    page_template(html! {
        div class="page" {
            header { h1 { (session.deck().title()) } }
            @match session.state() {
                SessionState::Complete => { (render_summary(session)) },
                SessionState::InProgress => { (render_card(session)) },
            }
        }
    })
}

fn render_card(session: &QuizSession) -> Markup {
    html! {
        p class="progress" {
            "Card " (session.current_index()) " of " (session.total())
        }
        div class="question" {
            // In-progress state always has a current card.
            @if let Some(card) = session.current_card() { (card.question()) }
        }
        @if let Some(answer) = session.revealed_answer() {
            div class="answer" { (answer) }
        } @else {
            form method="post" action="/quiz" {
                input type="hidden" name="action" value="reveal";
                button type="submit" { "Show answer" }
            }
        }
        div class="score-actions" {
            form method="post" action="/quiz" {
                input type="hidden" name="action" value="correct";
                button type="submit" class="correct" { "Correct" }
            }
            form method="post" action="/quiz" {
                input type="hidden" name="action" value="incorrect";
                button type="submit" class="incorrect" { "Incorrect" }
            }
        }
        p class="tallies" {
            "Correct: " (session.correct()) " / Incorrect: " (session.incorrect())
        }
    }
}

fn render_summary(session: &QuizSession) -> Markup {
    // state() is Complete here, so the summary exists.
    let summary = session.summary().expect("complete session has a summary");
    html! {
        div class="summary" {
            h2 { "Quiz complete" }
            p {
                "You got " (summary.correct) " out of "
                (summary.total) " correct."
            }
            p { "Incorrect: " (summary.incorrect) }
            div class="summary-actions" {
                form method="post" action="/quiz" {
                    input type="hidden" name="action" value="restart";
                    button type="submit" { "Restart quiz" }
                }
                a href="/" { "Back to decks" }
            }
        }
    }
}

pub async fn settings_page(State(state): State<ServerState>) -> Html<String> {
    let mut mutable = state.mutable.lock().unwrap();
    let flash = mutable.take_flash();
    let enabled = mutable.reminder.enabled();
    Html(
        page_template(html! {
            div class="page" {
                header { h1 { "Settings" } }
                (flash_bar(flash.as_deref()))
                form method="post" action="/settings" class="settings-form" {
                    label {
                        input type="checkbox" name="enabled" value="on" checked[enabled];
                        " Remind me to study every day"
                    }
                    button type="submit" { "Save" }
                }
                a href="/" { "Back to decks" }
            }
        })
        .into_string(),
    )
}

/// Resolves a deck id from a URL path segment against the store.
pub fn lookup_deck<'a>(mutable: &'a MutableState, raw_id: &str) -> Result<&'a Deck, Response> {
    let id = match DeckId::from_hex(raw_id) {
        Ok(id) => id,
        Err(e) => return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response()),
    };
    match mutable.store.get(id) {
        Ok(deck) => Ok(deck),
        Err(e) => Err((StatusCode::NOT_FOUND, e.to_string()).into_response()),
    }
}

/// The textarea form of a deck's cards, one `question | answer` per line.
pub fn cards_to_text(deck: &Deck) -> String {
    deck.cards()
        .iter()
        .map(|card| format!("{} | {}", card.question(), card.answer()))
        .collect::<Vec<_>>()
        .join("\n")
}
