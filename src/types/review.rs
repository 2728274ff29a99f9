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

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::direction::Direction;
use crate::types::timestamp::Timestamp;

/// What happened when the learner was shown a card.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewOutcome {
    pub correct: bool,
    pub time_spent: Duration,
    /// The direction the card was shown in, if known.
    pub direction: Option<Direction>,
}

impl ReviewOutcome {
    pub fn correct() -> Self {
        Self {
            correct: true,
            time_spent: Duration::ZERO,
            direction: None,
        }
    }

    pub fn incorrect() -> Self {
        Self {
            correct: false,
            ..Self::correct()
        }
    }

    pub fn with_time_spent(self, time_spent: Duration) -> Self {
        Self { time_spent, ..self }
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..self
        }
    }
}

/// A processed review, as kept in the review log.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub card_id: CardId,
    pub reviewed_at: Timestamp,
    pub correct: bool,
    pub time_spent_ms: u64,
    pub progress_before: u8,
    pub progress_after: u8,
    pub successful_reviews: u32,
    pub due_at: Timestamp,
}

impl ReviewRecord {
    pub fn new(
        before: &Card,
        after: &Card,
        outcome: &ReviewOutcome,
        reviewed_at: Timestamp,
    ) -> Self {
        Self {
            card_id: after.id(),
            reviewed_at,
            correct: outcome.correct,
            time_spent_ms: u64::try_from(outcome.time_spent.as_millis()).unwrap_or(u64::MAX),
            progress_before: before.progress,
            progress_after: after.progress,
            successful_reviews: after.successful_reviews,
            due_at: after.due_at,
        }
    }
}
