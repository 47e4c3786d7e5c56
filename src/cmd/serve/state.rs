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

use flashdecks_core::DeckId;
use flashdecks_core::DeckStore;
use flashdecks_core::QuizSession;
use flashdecks_core::ReminderPreference;
use flashdecks_core::ReminderScheduler;
use flashdecks_core::ScoringPolicy;

use crate::db::Database;

/// Which dialog the main screen is showing. A single tagged state instead
/// of per-dialog visibility booleans, so two dialogs can never be open at
/// the same time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    None,
    ConfirmingDelete(DeckId),
}

#[derive(Clone)]
pub struct ServerState {
    pub policy: ScoringPolicy,
    pub mutable: Arc<Mutex<MutableState>>,
}

/// Everything a command may mutate. One handler locks this, runs its
/// command to completion, and unlocks: no overlapping in-flight mutations.
pub struct MutableState {
    pub db: Database,
    pub store: DeckStore,
    pub session: Option<QuizSession>,
    pub dialog: DialogState,
    pub flash: Option<String>,
    pub reminder: ReminderPreference,
    pub scheduler: LogScheduler,
}

impl MutableState {
    /// Takes the queued snackbar message, clearing it.
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }
}

/// Stand-in for the platform notification scheduler. The recurring
/// reminder has nowhere to fire in a local server, so arming and disarming
/// only show up in the logs.
#[derive(Default)]
pub struct LogScheduler;

impl ReminderScheduler for LogScheduler {
    fn schedule_reminder(&mut self) {
        log::info!("study reminder armed");
    }

    fn clear_reminder(&mut self) {
        log::info!("study reminder disarmed");
    }
}
