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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::deck_id::DeckId;

/// Errors from deck store operations.
#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The store has no deck with the given id. Raised for stale
    /// references, double deletes, and caller bugs alike.
    NotFound(DeckId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "no deck with id {id}"),
        }
    }
}

impl Error for StoreError {}

/// Errors from quiz session commands.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// A command other than restart was issued after the session completed.
    SessionComplete,
    /// A second score was recorded for the current card under the
    /// single-score-per-card policy.
    AlreadyScored,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::SessionComplete => {
                write!(f, "the quiz session is already complete")
            }
            SessionError::AlreadyScored => {
                write!(f, "the current card has already been scored")
            }
        }
    }
}

impl Error for SessionError {}

/// Error parsing a deck id from its hex form.
#[derive(Debug, PartialEq, Eq)]
pub struct IdParseError {
    value: String,
}

impl IdParseError {
    pub fn new(value: impl Into<String>) -> Self {
        IdParseError {
            value: value.into(),
        }
    }
}

impl Display for IdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid deck id: '{}'", self.value)
    }
}

impl Error for IdParseError {}
