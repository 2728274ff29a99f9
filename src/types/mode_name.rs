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

/// The presentation a card is shown in. The UI decides what to render and
/// which interactions to offer from this name alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeName {
    /// Both sides shown; the learner just looks.
    Demonstration,
    /// The word is shown, the translation is revealed on tap.
    Word,
    /// The translation is shown, the word is revealed on tap.
    Translation,
    /// The translation is shown and the word has to be typed.
    TranslationToWord,
    /// Audio only, answer by revealing.
    #[serde(rename = "LISTENING_1")]
    Listening1,
    /// Audio only, answer by typing.
    #[serde(rename = "LISTENING_2")]
    Listening2,
}

impl ModeName {
    pub const ALL: [ModeName; 6] = [
        ModeName::Demonstration,
        ModeName::Word,
        ModeName::Translation,
        ModeName::TranslationToWord,
        ModeName::Listening1,
        ModeName::Listening2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeName::Demonstration => "DEMONSTRATION",
            ModeName::Word => "WORD",
            ModeName::Translation => "TRANSLATION",
            ModeName::TranslationToWord => "TRANSLATION_TO_WORD",
            ModeName::Listening1 => "LISTENING_1",
            ModeName::Listening2 => "LISTENING_2",
        }
    }
}

impl Display for ModeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
