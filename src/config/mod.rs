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

//! Scheduling and presentation policy. Plain data: swapping the whole
//! [`Config`] changes behavior without touching engine code.

pub mod difficulty;
pub mod intervals;
pub mod modes;

use std::fs::read_to_string;
use std::path::Path;

use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

use crate::config::difficulty::Difficulty;
use crate::config::difficulty::ModeOverride;
use crate::config::intervals::IntervalTable;
use crate::config::modes::DisplayModeDefinition;
use crate::config::modes::ModeTable;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::mode_name::ModeName;

/// The file name of a deck directory's configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Added to progress on a correct answer.
    pub progress_increase: u8,
    /// Subtracted from progress on an incorrect answer.
    pub progress_decrease: u8,
    /// An incorrect answer that leaves progress below this also takes back
    /// one successful review.
    pub reset_successful_reviews_threshold: u8,
    /// How long a card waits after an incorrect answer.
    pub incorrect_answer_delay_ms: u32,
    pub intervals: IntervalTable,
    pub modes: ModeTable,
    /// Presentation preset applied on top of `modes`.
    pub difficulty: Option<Difficulty>,
    /// Applied after the preset.
    pub overrides: Vec<ModeOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_increase: 10,
            progress_decrease: 20,
            reset_successful_reviews_threshold: 20,
            incorrect_answer_delay_ms: 60_000,
            intervals: IntervalTable::default(),
            modes: ModeTable::default(),
            difficulty: None,
            overrides: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Fallible<String> {
        Ok(toml::to_string(self)?)
    }

    /// Loads the configuration in `directory`, or the defaults if there is
    /// none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE_NAME}, using the default configuration.");
            return Ok(Self::default());
        }
        log::debug!("Loading configuration from {}", path.display());
        let content = read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Checks what the table types cannot: every override must name a mode
    /// in the table.
    pub fn validate(&self) -> Fallible<()> {
        for o in &self.overrides {
            self.mode(o.mode)?;
        }
        Ok(())
    }

    /// Looks up a mode definition. A miss means the configuration and the
    /// engine disagree about which modes exist.
    pub fn mode(&self, name: ModeName) -> Fallible<&DisplayModeDefinition> {
        self.modes
            .get(name)
            .ok_or_else(|| ErrorReport::new(format!("unknown display mode: {name}")))
    }

    /// The mode definition as the learner sees it: the base definition with
    /// the difficulty preset and then the explicit overrides applied.
    pub fn presented_mode(&self, name: ModeName) -> Fallible<DisplayModeDefinition> {
        let mut mode = self.mode(name)?.clone();
        let preset = self.difficulty.map(Difficulty::overrides).unwrap_or_default();
        for o in preset.iter().chain(self.overrides.iter()) {
            if o.mode == name {
                mode = mode.with_override(o);
            }
        }
        Ok(mode)
    }

    pub fn incorrect_answer_delay(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.incorrect_answer_delay_ms.into())
    }
}
