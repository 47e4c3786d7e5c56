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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::signal;

use flashdecks_core::DeckStore;
use flashdecks_core::ReminderPreference;

use crate::cmd::serve::get::create_page;
use crate::cmd::serve::get::edit_page;
use crate::cmd::serve::get::main_page;
use crate::cmd::serve::get::quiz_page;
use crate::cmd::serve::get::settings_page;
use crate::cmd::serve::post::create_action;
use crate::cmd::serve::post::edit_action;
use crate::cmd::serve::post::main_action;
use crate::cmd::serve::post::quiz_action;
use crate::cmd::serve::post::settings_action;
use crate::cmd::serve::state::DialogState;
use crate::cmd::serve::state::LogScheduler;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::config::Config;
use crate::db::DB_FILE;
use crate::db::Database;
use crate::error::Fallible;
use crate::utils::CACHE_CONTROL_IMMUTABLE;
use crate::utils::data_dir;

pub struct ServerConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let directory = data_dir(config.directory)?;
    let app_config = Config::load(&directory)?;
    let db = Database::open(&directory.join(DB_FILE))?;

    // Initial fetch-all: the store is the authoritative in-process copy
    // from here on; the database only sees write-through mutations.
    let decks = db.fetch_decks()?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    let mut store = DeckStore::with_seed(seed);
    store.replace_all(decks);
    log::debug!("loaded {} decks", store.len());

    let reminder = ReminderPreference::new(db.reminder_enabled()?);

    let state = ServerState {
        policy: app_config.scoring_policy(),
        mutable: Arc::new(Mutex::new(MutableState {
            db,
            store,
            session: None,
            dialog: DialogState::None,
            flash: None,
            reminder,
            scheduler: LogScheduler,
        })),
    };

    let app = Router::new();
    let app = app.route("/", get(main_page));
    let app = app.route("/", post(main_action));
    let app = app.route("/decks/new", get(create_page));
    let app = app.route("/decks/new", post(create_action));
    let app = app.route("/decks/{id}", get(edit_page));
    let app = app.route("/decks/{id}", post(edit_action));
    let app = app.route("/decks/{id}/quiz", get(quiz_page));
    let app = app.route("/quiz", post(quiz_action));
    let app = app.route("/settings", get(settings_page));
    let app = app.route("/settings", post(settings_action));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Serve until Ctrl+C.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    log::debug!("Received Ctrl+C, shutting down gracefully");
}
