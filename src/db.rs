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

use std::path::Path;

use flashdecks_core::Card;
use flashdecks_core::Deck;
use flashdecks_core::DeckId;
use flashdecks_core::Timestamp;
use rusqlite::Connection;
use rusqlite::params;

use crate::error::Fallible;
use crate::error::fail;

pub const DB_FILE: &str = "flashdecks.db";

const REMINDER_KEY: &str = "reminder_enabled";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS decks (
    id         TEXT PRIMARY KEY,
    title      TEXT NOT NULL,
    cards      TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// SQLite persistence for decks and settings. Cards are stored as a JSON
/// column; rowid order is insertion order, which the store's listing keeps.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// The whole deck collection, in insertion order.
    pub fn fetch_decks(&self) -> Fallible<Vec<Deck>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, cards FROM decks ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut decks = Vec::new();
        for row in rows {
            let (id, title, cards) = row?;
            let id = DeckId::from_hex(&id)?;
            let cards: Vec<Card> = serde_json::from_str(&cards)?;
            decks.push(Deck::new(id, title, cards));
        }
        Ok(decks)
    }

    pub fn insert_deck(&self, deck: &Deck, created_at: Timestamp) -> Fallible<()> {
        let cards = serde_json::to_string(deck.cards())?;
        self.conn.execute(
            "INSERT INTO decks (id, title, cards, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                deck.id().to_hex(),
                deck.title(),
                cards,
                created_at.to_string()
            ],
        )?;
        Ok(())
    }

    pub fn update_deck(&self, deck: &Deck) -> Fallible<()> {
        let cards = serde_json::to_string(deck.cards())?;
        let changed = self.conn.execute(
            "UPDATE decks SET title = ?2, cards = ?3 WHERE id = ?1",
            params![deck.id().to_hex(), deck.title(), cards],
        )?;
        if changed == 0 {
            return fail(format!("deck {} is not in the database", deck.id()));
        }
        Ok(())
    }

    pub fn delete_deck(&self, id: DeckId) -> Fallible<()> {
        let changed = self
            .conn
            .execute("DELETE FROM decks WHERE id = ?1", params![id.to_hex()])?;
        if changed == 0 {
            return fail(format!("deck {id} is not in the database"));
        }
        Ok(())
    }

    /// The persisted reminder flag. Defaults to false when never written.
    pub fn reminder_enabled(&self) -> Fallible<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![REMINDER_KEY], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(value) => Ok(value? == "true"),
            None => Ok(false),
        }
    }

    pub fn set_reminder_enabled(&self, enabled: bool) -> Fallible<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
            params![REMINDER_KEY, if enabled { "true" } else { "false" }],
        )?;
        Ok(())
    }
}
