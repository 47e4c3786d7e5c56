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

use chrono::NaiveDateTime;
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A timestamp without a timezone, at millisecond precision. Used for deck
/// creation metadata and session start times; the string form sorts
/// lexicographically in chronological order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, TimestampParseError> {
        let ndt =
            NaiveDateTime::parse_from_str(s, FORMAT).map_err(|_| TimestampParseError::new(s))?;
        Ok(Timestamp(ndt))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

/// Error parsing a timestamp from its string form.
#[derive(Debug, PartialEq, Eq)]
pub struct TimestampParseError {
    value: String,
}

impl TimestampParseError {
    fn new(value: impl Into<String>) -> Self {
        TimestampParseError {
            value: value.into(),
        }
    }
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid timestamp: '{}'", self.value)
    }
}

impl std::error::Error for TimestampParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let ts = Timestamp::parse("2026-03-14 09:26:53.589").unwrap();
        assert_eq!(ts.to_string(), "2026-03-14 09:26:53.589");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_new_truncates_to_milliseconds() {
        let precise = NaiveDateTime::parse_from_str(
            "2026-03-14 09:26:53.589793",
            "%Y-%m-%d %H:%M:%S%.6f",
        )
        .unwrap();
        let ts = Timestamp::new(precise);
        assert_eq!(ts.to_string(), "2026-03-14 09:26:53.589");
    }

    #[test]
    fn test_serde_as_string() {
        let ts = Timestamp::parse("2026-03-14 09:26:53.589").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-03-14 09:26:53.589\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_ordering_matches_time() {
        let early = Timestamp::parse("2026-03-14 09:00:00.000").unwrap();
        let late = Timestamp::parse("2026-03-14 10:00:00.000").unwrap();
        assert!(early < late);
    }
}
