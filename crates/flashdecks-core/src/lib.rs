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

//! flashdecks-core: Core library for the flashdecks study app.
//!
//! This library provides the pure, I/O-free state model:
//! - Card and Deck data types
//! - The deck store (keyed CRUD collection with mutation status tracking)
//! - The quiz session state machine
//! - The study reminder bridge contract

pub mod error;
pub mod reminder;
pub mod session;
pub mod status;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use error::{IdParseError, SessionError, StoreError};
pub use reminder::{ReminderPreference, ReminderScheduler};
pub use session::{QuizSession, ScoringPolicy, SessionState, Summary};
pub use status::MutationStatus;
pub use store::{DeckEntry, DeckStore};
pub use types::card::Card;
pub use types::deck::Deck;
pub use types::deck_id::DeckId;
pub use types::timestamp::Timestamp;
