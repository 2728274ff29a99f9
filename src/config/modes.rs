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

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::config::difficulty::ModeOverride;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::MAX_PROGRESS;
use crate::types::mode_name::ModeName;

/// Which review counts trigger an alternation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn holds(self, review_count: u32) -> bool {
        match self {
            Parity::Even => review_count % 2 == 0,
            Parity::Odd => review_count % 2 == 1,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Alternation {
    /// Only the first entry is ever presented.
    pub alternates_with: Vec<ModeName>,
    pub condition: Parity,
}

/// How a card in a given progress band is presented, and how the learner
/// interacts with it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DisplayModeDefinition {
    pub name: ModeName,
    /// Inclusive.
    pub min_progress: u8,
    /// Inclusive.
    pub max_progress: u8,
    pub auto_reveal: bool,
    pub auto_reveal_delay_ms: u64,
    /// How long the answer stays on screen before the next card.
    pub return_delay_ms: u64,
    pub show_input: bool,
    pub show_buttons: bool,
    /// Buttons stay disabled until something has been typed.
    pub require_input: bool,
    pub tap_reveal_translation: bool,
    pub tap_reveal_word: bool,
    pub enter_advances: bool,
    pub tap_advances: bool,
    pub confirmations_to_advance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternation: Option<Alternation>,
}

impl DisplayModeDefinition {
    pub fn contains(&self, progress: u8) -> bool {
        (self.min_progress..=self.max_progress).contains(&progress)
    }

    /// The alternate mode to present instead of this one, if any.
    pub fn alternate_for(&self, review_count: u32) -> Option<ModeName> {
        let alternation = self.alternation.as_ref()?;
        if alternation.condition.holds(review_count) {
            alternation.alternates_with.first().copied()
        } else {
            None
        }
    }

    /// This definition with the fields named by `o` replaced.
    pub fn with_override(&self, o: &ModeOverride) -> Self {
        let mut mode = self.clone();
        if let Some(delay) = o.auto_reveal_delay_ms {
            mode.auto_reveal_delay_ms = delay;
        }
        if let Some(delay) = o.return_delay_ms {
            mode.return_delay_ms = delay;
        }
        if let Some(required) = o.require_input {
            mode.require_input = required;
        }
        if let Some(n) = o.confirmations_to_advance {
            mode.confirmations_to_advance = n;
        }
        mode
    }
}

/// The ordered list of display modes. Every progress value maps to exactly
/// one band, and every alternation target is itself in the table.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<DisplayModeDefinition>",
    into = "Vec<DisplayModeDefinition>"
)]
pub struct ModeTable {
    modes: Vec<DisplayModeDefinition>,
    /// Index of the band with the highest `max_progress`.
    terminal: usize,
}

impl ModeTable {
    pub fn new(modes: Vec<DisplayModeDefinition>) -> Fallible<Self> {
        validate_modes(&modes)?;
        let terminal = modes
            .iter()
            .enumerate()
            .max_by_key(|(_, m)| m.max_progress)
            .map(|(i, _)| i)
            .ok_or_else(|| ErrorReport::new("invalid configuration: the mode table is empty"))?;
        Ok(Self { modes, terminal })
    }

    pub fn modes(&self) -> &[DisplayModeDefinition] {
        &self.modes
    }

    pub fn get(&self, name: ModeName) -> Option<&DisplayModeDefinition> {
        self.modes.iter().find(|m| m.name == name)
    }

    /// The first band containing `progress`.
    pub fn band_for(&self, progress: u8) -> Option<&DisplayModeDefinition> {
        self.modes.iter().find(|m| m.contains(progress))
    }

    /// The band presented when no other matches.
    pub fn terminal(&self) -> &DisplayModeDefinition {
        &self.modes[self.terminal]
    }
}

fn validate_modes(modes: &[DisplayModeDefinition]) -> Fallible<()> {
    if modes.is_empty() {
        return fail("invalid configuration: the mode table is empty");
    }
    let mut names = HashSet::new();
    for mode in modes {
        if !names.insert(mode.name) {
            return fail(format!(
                "invalid configuration: mode {} is defined twice",
                mode.name
            ));
        }
        if mode.min_progress > mode.max_progress || mode.max_progress > MAX_PROGRESS {
            return fail(format!(
                "invalid configuration: mode {} has an invalid progress range [{}, {}]",
                mode.name, mode.min_progress, mode.max_progress
            ));
        }
    }
    for progress in 0..=MAX_PROGRESS {
        let matching: Vec<ModeName> = modes
            .iter()
            .filter(|m| m.contains(progress))
            .map(|m| m.name)
            .collect();
        match matching.len() {
            0 => {
                return fail(format!(
                    "invalid configuration: no mode covers progress {progress}"
                ));
            }
            1 => {}
            _ => {
                return fail(format!(
                    "invalid configuration: modes {matching:?} overlap at progress {progress}"
                ));
            }
        }
    }
    for mode in modes {
        if let Some(alternation) = &mode.alternation {
            let Some(target) = alternation.alternates_with.first() else {
                return fail(format!(
                    "invalid configuration: mode {} alternates with nothing",
                    mode.name
                ));
            };
            if !names.contains(target) {
                return fail(format!(
                    "invalid configuration: mode {} alternates with undefined mode {target}",
                    mode.name
                ));
            }
        }
    }
    Ok(())
}

impl TryFrom<Vec<DisplayModeDefinition>> for ModeTable {
    type Error = ErrorReport;

    fn try_from(value: Vec<DisplayModeDefinition>) -> Result<Self, Self::Error> {
        ModeTable::new(value)
    }
}

impl From<ModeTable> for Vec<DisplayModeDefinition> {
    fn from(value: ModeTable) -> Self {
        value.modes
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        let modes = default_modes();
        let terminal = modes.len() - 1;
        Self { modes, terminal }
    }
}

/// A band with every interaction switched off, to be filled in below.
fn band(name: ModeName, min_progress: u8, max_progress: u8) -> DisplayModeDefinition {
    DisplayModeDefinition {
        name,
        min_progress,
        max_progress,
        auto_reveal: false,
        auto_reveal_delay_ms: 0,
        return_delay_ms: 0,
        show_input: false,
        show_buttons: false,
        require_input: false,
        tap_reveal_translation: false,
        tap_reveal_word: false,
        enter_advances: false,
        tap_advances: false,
        confirmations_to_advance: 1,
        alternation: None,
    }
}

fn alternate(with: ModeName, condition: Parity) -> Option<Alternation> {
    Some(Alternation {
        alternates_with: vec![with],
        condition,
    })
}

fn default_modes() -> Vec<DisplayModeDefinition> {
    vec![
        DisplayModeDefinition {
            auto_reveal: true,
            auto_reveal_delay_ms: 1500,
            enter_advances: true,
            tap_advances: true,
            ..band(ModeName::Demonstration, 0, 19)
        },
        DisplayModeDefinition {
            return_delay_ms: 1000,
            show_buttons: true,
            tap_reveal_translation: true,
            ..band(ModeName::Word, 20, 29)
        },
        DisplayModeDefinition {
            return_delay_ms: 1000,
            show_buttons: true,
            tap_reveal_word: true,
            alternation: alternate(ModeName::Word, Parity::Even),
            ..band(ModeName::Translation, 30, 49)
        },
        DisplayModeDefinition {
            return_delay_ms: 2000,
            show_input: true,
            show_buttons: true,
            require_input: true,
            enter_advances: true,
            alternation: alternate(ModeName::Translation, Parity::Even),
            ..band(ModeName::TranslationToWord, 50, 69)
        },
        DisplayModeDefinition {
            return_delay_ms: 1500,
            show_buttons: true,
            tap_reveal_word: true,
            tap_reveal_translation: true,
            alternation: alternate(ModeName::Listening2, Parity::Even),
            ..band(ModeName::Listening1, 70, 84)
        },
        DisplayModeDefinition {
            return_delay_ms: 2000,
            show_input: true,
            show_buttons: true,
            require_input: true,
            enter_advances: true,
            alternation: alternate(ModeName::Listening1, Parity::Odd),
            ..band(ModeName::Listening2, 85, 100)
        },
    ]
}
