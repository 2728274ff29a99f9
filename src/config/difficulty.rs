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

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::types::mode_name::ModeName;

/// Partial replacement for one display mode's presentation settings.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ModeOverride {
    pub mode: ModeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reveal_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_input: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations_to_advance: Option<u8>,
}

impl ModeOverride {
    fn new(mode: ModeName) -> Self {
        Self {
            mode,
            auto_reveal_delay_ms: None,
            return_delay_ms: None,
            require_input: None,
            confirmations_to_advance: None,
        }
    }
}

/// Presentation presets. They only change how modes are presented, never
/// how cards are scheduled.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn overrides(self) -> Vec<ModeOverride> {
        match self {
            // Slower pacing, and typing is optional.
            Difficulty::Beginner => vec![
                ModeOverride {
                    auto_reveal_delay_ms: Some(3000),
                    confirmations_to_advance: Some(2),
                    ..ModeOverride::new(ModeName::Demonstration)
                },
                ModeOverride {
                    return_delay_ms: Some(3000),
                    require_input: Some(false),
                    ..ModeOverride::new(ModeName::TranslationToWord)
                },
                ModeOverride {
                    return_delay_ms: Some(3000),
                    require_input: Some(false),
                    ..ModeOverride::new(ModeName::Listening2)
                },
            ],
            Difficulty::Intermediate => Vec::new(),
            // Faster pacing, and answers must be typed wherever there is a
            // field to type them in.
            Difficulty::Advanced => vec![
                ModeOverride {
                    auto_reveal_delay_ms: Some(750),
                    ..ModeOverride::new(ModeName::Demonstration)
                },
                ModeOverride {
                    return_delay_ms: Some(500),
                    ..ModeOverride::new(ModeName::Word)
                },
                ModeOverride {
                    return_delay_ms: Some(500),
                    ..ModeOverride::new(ModeName::Translation)
                },
                ModeOverride {
                    return_delay_ms: Some(1000),
                    require_input: Some(true),
                    ..ModeOverride::new(ModeName::TranslationToWord)
                },
                ModeOverride {
                    return_delay_ms: Some(1000),
                    require_input: Some(true),
                    ..ModeOverride::new(ModeName::Listening2)
                },
            ],
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediate_is_the_base() {
        assert!(Difficulty::Intermediate.overrides().is_empty());
    }

    #[test]
    fn test_presets_touch_each_mode_once() {
        for difficulty in [Difficulty::Beginner, Difficulty::Advanced] {
            let overrides = difficulty.overrides();
            let mut modes: Vec<ModeName> = overrides.iter().map(|o| o.mode).collect();
            modes.sort();
            modes.dedup();
            assert_eq!(modes.len(), overrides.len());
        }
    }
}
