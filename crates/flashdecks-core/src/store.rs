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

use std::collections::HashMap;

use crate::error::StoreError;
use crate::status::MutationStatus;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::deck_id::DeckId;

/// An entry in the deck store: the deck plus the persistence status of the
/// most recent mutation against it.
#[derive(Clone, Debug)]
pub struct DeckEntry {
    deck: Deck,
    status: MutationStatus,
}

impl DeckEntry {
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn status(&self) -> &MutationStatus {
        &self.status
    }
}

/// The authoritative in-process collection of decks, keyed by id.
///
/// Insertion order is preserved for listing. The store is the only
/// allocator of deck ids. The allocation counter never decreases and every
/// candidate id is checked against the live set, so an id is never handed
/// out twice within one store's lifetime, even after deletes or a
/// `replace_all` from the backend.
pub struct DeckStore {
    entries: HashMap<DeckId, DeckEntry>,
    order: Vec<DeckId>,
    seed: u64,
    allocated: u64,
}

impl DeckStore {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// A store whose derived ids are salted with `seed`, so that ids from
    /// separate runs against the same backend cannot collide.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            seed,
            allocated: 0,
        }
    }

    /// Fetch-all population: replaces the entire contents of the store.
    /// Entry statuses reset to `Idle`; the id allocation counter is kept.
    pub fn replace_all(&mut self, decks: Vec<Deck>) {
        self.entries.clear();
        self.order.clear();
        for deck in decks {
            let id = deck.id();
            self.entries.insert(
                id,
                DeckEntry {
                    deck,
                    status: MutationStatus::Idle,
                },
            );
            self.order.push(id);
        }
    }

    fn allocate_id(&mut self, title: &str) -> DeckId {
        loop {
            self.allocated += 1;
            let id = DeckId::derive(self.seed, self.allocated, title);
            if !self.entries.contains_key(&id) {
                return id;
            }
        }
    }

    /// Creates a deck with a fresh id and appends it to the listing order.
    /// Title validation is the form's concern, not the store's.
    pub fn create(&mut self, title: impl Into<String>, cards: Vec<Card>) -> &Deck {
        let title = title.into();
        let id = self.allocate_id(&title);
        self.entries.insert(
            id,
            DeckEntry {
                deck: Deck::new(id, title, cards),
                status: MutationStatus::Idle,
            },
        );
        self.order.push(id);
        &self.entries[&id].deck
    }

    /// Replaces the title and cards of an existing deck. The id and the
    /// deck's position in the listing order are unchanged.
    pub fn update(
        &mut self,
        id: DeckId,
        title: impl Into<String>,
        cards: Vec<Card>,
    ) -> Result<&Deck, StoreError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        entry.deck = Deck::new(id, title, cards);
        Ok(&entry.deck)
    }

    /// Removes a deck, returning it. Deleting an id that is already gone is
    /// `NotFound`, not a silent no-op: callers must guard against issuing
    /// the same delete twice.
    pub fn delete(&mut self, id: DeckId) -> Result<Deck, StoreError> {
        let entry = self.entries.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.order.retain(|other| *other != id);
        Ok(entry.deck)
    }

    pub fn get(&self, id: DeckId) -> Result<&Deck, StoreError> {
        self.entries
            .get(&id)
            .map(|entry| &entry.deck)
            .ok_or(StoreError::NotFound(id))
    }

    /// Marks an entry `Pending` while a backend write is in flight.
    pub fn mark_pending(&mut self, id: DeckId) -> Result<(), StoreError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        entry.status = MutationStatus::Pending;
        Ok(())
    }

    /// Reconciles an entry once its backend write resolves.
    pub fn resolve(&mut self, id: DeckId, result: Result<(), String>) -> Result<(), StoreError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        entry.status = match result {
            Ok(()) => MutationStatus::Succeeded,
            Err(reason) => MutationStatus::Failed(reason),
        };
        Ok(())
    }

    /// All decks in listing order.
    pub fn decks(&self) -> impl Iterator<Item = &Deck> {
        self.order.iter().map(|id| &self.entries[id].deck)
    }

    /// All entries in listing order, including mutation status.
    pub fn entries(&self) -> impl Iterator<Item = &DeckEntry> {
        self.order.iter().map(|id| &self.entries[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for DeckStore {
    fn default() -> Self {
        Self::new()
    }
}
