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

/// Persistence status of a deck store entry.
///
/// Mutations against the external backend are optimistic: the entry is
/// marked `Pending` while the write is in flight and reconciled to
/// `Succeeded` or `Failed` once it resolves. A `Failed` entry keeps its
/// pre-mutation contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    /// No mutation has been attempted since the entry was loaded.
    Idle,
    /// A mutation has been issued but has not resolved yet.
    Pending,
    /// The most recent mutation resolved successfully.
    Succeeded,
    /// The most recent mutation failed, with the backend's reason.
    Failed(String),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            MutationStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
