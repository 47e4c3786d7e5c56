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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::deck_id::DeckId;

/// A named, ordered collection of cards.
///
/// The id never changes after creation. Card order is significant: a quiz
/// session traverses the cards in storage order. Decks are normally created
/// through the deck store, which allocates the id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    id: DeckId,
    title: String,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(id: DeckId, title: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id,
            title: title.into(),
            cards,
        }
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_order_is_preserved() {
        let id = DeckId::derive(0, 1, "History");
        let deck = Deck::new(
            id,
            "History",
            vec![Card::new("q1", "a1"), Card::new("q2", "a2")],
        );
        assert_eq!(deck.card_count(), 2);
        assert_eq!(deck.cards()[0].question(), "q1");
        assert_eq!(deck.cards()[1].question(), "q2");
    }

    #[test]
    fn test_serialize_round_trip() {
        let id = DeckId::derive(0, 1, "History");
        let deck = Deck::new(id, "History", vec![Card::new("q", "a")]);
        let json = serde_json::to_string(&deck).unwrap();
        let back: Deck = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deck);
    }
}
