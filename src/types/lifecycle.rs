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

use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// Cards below this progress that are not yet due count as mastered-or-new.
const KNOW_MIN_PROGRESS: u8 = 10;

/// Cards at or above this progress count as mastered.
const MASTERED_MIN_PROGRESS: u8 = 70;

/// The category a card is displayed under. Never stored: it depends on the
/// current time, so it is recomputed on every read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Due now.
    Learn,
    /// Scheduled, mid progress.
    Know,
    /// Scheduled, and either mastered or barely started.
    Mastered,
}

impl Display for LifecycleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecycleState::Learn => "LEARN",
            LifecycleState::Know => "KNOW",
            LifecycleState::Mastered => "MASTERED",
        };
        write!(f, "{s}")
    }
}

/// Classifies a card. Being due wins over any progress-based category.
pub fn derive_state(progress: u8, due_at: Timestamp, now: Timestamp) -> LifecycleState {
    if due_at <= now {
        LifecycleState::Learn
    } else if (KNOW_MIN_PROGRESS..MASTERED_MIN_PROGRESS).contains(&progress) {
        LifecycleState::Know
    } else {
        LifecycleState::Mastered
    }
}
