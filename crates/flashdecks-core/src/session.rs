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

use crate::error::SessionError;
use crate::types::card::Card;
use crate::types::deck::Deck;

/// Whether a card may be scored more than once before advancing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// Every score command counts, including repeated ones for the same
    /// card: the user can change their mind before moving on.
    #[default]
    AllowRescore,
    /// At most one score per card; a second attempt is rejected with
    /// `AlreadyScored`.
    SinglePerCard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Complete,
}

/// Terminal tallies exposed once the session is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub correct: u32,
    pub incorrect: u32,
    pub total: usize,
}

/// A single pass through one deck's cards, front to back, with running
/// correct/incorrect tallies.
///
/// The deck is a snapshot taken at start and is never re-synced with the
/// store; edits made while the session runs are not picked up. The position
/// is 1-based and the session is complete once it moves past the last card,
/// so a zero-card deck completes trivially. Sessions are transient: they
/// are never persisted.
pub struct QuizSession {
    deck: Deck,
    current_index: usize,
    correct: u32,
    incorrect: u32,
    revealed: bool,
    scored_current: bool,
    policy: ScoringPolicy,
}

impl QuizSession {
    pub fn start(deck: Deck, policy: ScoringPolicy) -> Self {
        Self {
            deck,
            current_index: 1,
            correct: 0,
            incorrect: 0,
            revealed: false,
            scored_current: false,
            policy,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.current_index > self.deck.card_count() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    fn check_in_progress(&self) -> Result<(), SessionError> {
        match self.state() {
            SessionState::InProgress => Ok(()),
            SessionState::Complete => Err(SessionError::SessionComplete),
        }
    }

    /// Shows the current card's answer. A no-op if already revealed; does
    /// not advance the position.
    pub fn reveal(&mut self) -> Result<(), SessionError> {
        self.check_in_progress()?;
        self.revealed = true;
        Ok(())
    }

    /// Marks the current card correct. Scoring is allowed before reveal,
    /// and does not itself advance the position.
    pub fn score_positive(&mut self) -> Result<(), SessionError> {
        self.record_score()?;
        self.correct += 1;
        Ok(())
    }

    /// Marks the current card incorrect. Symmetric to `score_positive`.
    pub fn score_negative(&mut self) -> Result<(), SessionError> {
        self.record_score()?;
        self.incorrect += 1;
        Ok(())
    }

    fn record_score(&mut self) -> Result<(), SessionError> {
        self.check_in_progress()?;
        if self.policy == ScoringPolicy::SinglePerCard && self.scored_current {
            return Err(SessionError::AlreadyScored);
        }
        self.scored_current = true;
        Ok(())
    }

    /// Moves to the next card, hiding its answer again. Moving past the
    /// last card completes the session.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.check_in_progress()?;
        self.current_index += 1;
        self.revealed = false;
        self.scored_current = false;
        Ok(())
    }

    /// Returns to the exact state produced by `start` with the same deck.
    /// Valid in any state.
    pub fn restart(&mut self) {
        self.current_index = 1;
        self.correct = 0;
        self.incorrect = 0;
        self.revealed = false;
        self.scored_current = false;
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.deck.cards().get(self.current_index - 1)
    }

    /// The current card's answer, gated by reveal.
    pub fn revealed_answer(&self) -> Option<&str> {
        if self.revealed {
            self.current_card().map(|card| card.answer())
        } else {
            None
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// 1-based position of the current card.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.deck.card_count()
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The terminal tallies, available only once the session is complete.
    pub fn summary(&self) -> Option<Summary> {
        match self.state() {
            SessionState::Complete => Some(Summary {
                correct: self.correct,
                incorrect: self.incorrect,
                total: self.deck.card_count(),
            }),
            SessionState::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::deck_id::DeckId;

    fn deck(n: usize) -> Deck {
        let cards = (0..n)
            .map(|i| Card::new(format!("q{i}"), format!("a{i}")))
            .collect();
        Deck::new(DeckId::derive(0, 1, "test"), "test", cards)
    }

    #[test]
    fn test_start_state() {
        let session = QuizSession::start(deck(3), ScoringPolicy::default());
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.incorrect(), 0);
        assert!(!session.is_revealed());
        assert!(session.summary().is_none());
    }

    #[test]
    fn test_empty_deck_completes_immediately() {
        let session = QuizSession::start(deck(0), ScoringPolicy::default());
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(
            session.summary(),
            Some(Summary {
                correct: 0,
                incorrect: 0,
                total: 0
            })
        );
    }

    #[test]
    fn test_completes_on_nth_advance_and_not_before() {
        let n = 4;
        let mut session = QuizSession::start(deck(n), ScoringPolicy::default());
        for _ in 0..n - 1 {
            session.advance().unwrap();
            assert_eq!(session.state(), SessionState::InProgress);
        }
        session.advance().unwrap();
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn test_reveal_gates_the_answer() {
        let mut session = QuizSession::start(deck(2), ScoringPolicy::default());
        assert_eq!(session.revealed_answer(), None);
        session.reveal().unwrap();
        assert_eq!(session.revealed_answer(), Some("a0"));
        // Revealing again is a no-op.
        session.reveal().unwrap();
        assert_eq!(session.revealed_answer(), Some("a0"));
        // Advancing hides the next card's answer.
        session.advance().unwrap();
        assert!(!session.is_revealed());
        assert_eq!(session.revealed_answer(), None);
    }

    #[test]
    fn test_scoring_before_reveal_is_allowed() {
        let mut session = QuizSession::start(deck(2), ScoringPolicy::default());
        session.score_positive().unwrap();
        assert_eq!(session.correct(), 1);
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_double_scoring_counts_both_by_default() {
        let mut session = QuizSession::start(deck(2), ScoringPolicy::AllowRescore);
        session.score_positive().unwrap();
        session.score_positive().unwrap();
        session.advance().unwrap();
        assert_eq!(session.correct(), 2);
    }

    #[test]
    fn test_single_per_card_rejects_second_score() {
        let mut session = QuizSession::start(deck(2), ScoringPolicy::SinglePerCard);
        session.score_positive().unwrap();
        assert_eq!(
            session.score_negative().unwrap_err(),
            SessionError::AlreadyScored
        );
        // Advancing re-arms scoring for the next card.
        session.advance().unwrap();
        session.score_negative().unwrap();
        assert_eq!(session.correct(), 1);
        assert_eq!(session.incorrect(), 1);
    }

    #[test]
    fn test_mutations_after_complete_are_rejected() {
        let mut session = QuizSession::start(deck(1), ScoringPolicy::default());
        session.advance().unwrap();
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.reveal().unwrap_err(), SessionError::SessionComplete);
        assert_eq!(
            session.score_positive().unwrap_err(),
            SessionError::SessionComplete
        );
        assert_eq!(
            session.score_negative().unwrap_err(),
            SessionError::SessionComplete
        );
        assert_eq!(
            session.advance().unwrap_err(),
            SessionError::SessionComplete
        );
    }

    #[test]
    fn test_restart_after_complete_equals_start() {
        let mut session = QuizSession::start(deck(2), ScoringPolicy::default());
        session.reveal().unwrap();
        session.score_positive().unwrap();
        session.advance().unwrap();
        session.score_negative().unwrap();
        session.advance().unwrap();
        assert_eq!(session.state(), SessionState::Complete);

        session.restart();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.incorrect(), 0);
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_worked_example() {
        let card = Card::new("What is React?", "A library for managing user interfaces");
        let deck = Deck::new(DeckId::derive(0, 1, "React"), "React", vec![card]);
        let mut session = QuizSession::start(deck, ScoringPolicy::default());
        assert_eq!(session.current_index(), 1);
        session.score_positive().unwrap();
        assert_eq!(session.correct(), 1);
        session.advance().unwrap();
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(
            session.summary(),
            Some(Summary {
                correct: 1,
                incorrect: 0,
                total: 1
            })
        );
    }
}
