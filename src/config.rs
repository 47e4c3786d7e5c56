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

use std::fs::read_to_string;
use std::path::Path;

use flashdecks_core::ScoringPolicy;
use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "flashdecks.toml";

/// Optional `flashdecks.toml` in the data directory. A missing file means
/// all defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub quiz: QuizConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizConfig {
    /// Whether a card may be scored more than once before advancing.
    /// Default is true.
    #[serde(default = "default_allow_rescore")]
    pub allow_rescore: bool,
}

fn default_allow_rescore() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            allow_rescore: true,
        }
    }
}

impl Config {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = read_to_string(&path)?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        if self.quiz.allow_rescore {
            ScoringPolicy::AllowRescore
        } else {
            ScoringPolicy::SinglePerCard
        }
    }
}
