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
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::IdParseError;

/// The unique identifier of a deck. Assigned when the deck is created and
/// stable for the deck's whole lifetime; displays as hex, which makes it
/// safe to use in URLs and as a database key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeckId {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl DeckId {
    /// Derives an id from the store's seed, its allocation counter, and the
    /// deck title. The counter makes ids distinct within one store run even
    /// for identical titles; the seed makes them distinct across runs.
    pub fn derive(seed: u64, counter: u64, title: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&seed.to_le_bytes());
        hasher.update(&counter.to_le_bytes());
        hasher.update(title.as_bytes());
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Result<Self, IdParseError> {
        let inner = blake3::Hash::from_hex(s).map_err(|_| IdParseError::new(s))?;
        Ok(Self { inner })
    }
}

impl Display for DeckId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for DeckId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DeckId::from_hex(&value)
    }
}

impl From<DeckId> for String {
    fn from(id: DeckId) -> String {
        id.to_hex()
    }
}
