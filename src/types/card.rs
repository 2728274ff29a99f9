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

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;
use crate::types::direction::Direction;
use crate::types::lifecycle::LifecycleState;
use crate::types::lifecycle::derive_state;
use crate::types::timestamp::Timestamp;

/// The upper bound of a card's progress score.
pub const MAX_PROGRESS: u8 = 100;

/// Ease factor given to new cards. Carried for compatibility only.
const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// A vocabulary flashcard and its scheduling state.
///
/// The identity and text of a card never change after creation. The
/// scheduling fields are public so the repository layer can rebuild cards
/// from storage; [`Card::validate`] checks them at the engine boundary.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    term: String,
    translation: String,
    language_pair_id: String,
    /// Progress score in `[0, 100]`.
    pub progress: u8,
    /// The card can be reviewed once this instant has passed.
    pub due_at: Timestamp,
    /// Every review attempt, correct or not.
    pub review_count: u32,
    pub successful_reviews: u32,
    /// The direction the card was last shown in.
    pub direction: Direction,
    /// Legacy field, not read by the scheduler.
    pub ease_factor: f64,
    /// Legacy field, not read by the scheduler.
    pub interval_days: u32,
    pub last_reviewed_at: Option<Timestamp>,
    created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lesson_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lesson_order: Option<u32>,
}

impl Card {
    /// Creates a card that is due immediately.
    pub fn new(
        term: impl Into<String>,
        translation: impl Into<String>,
        language_pair_id: impl Into<String>,
        now: Timestamp,
    ) -> Fallible<Self> {
        let term = term.into().trim().to_string();
        let translation = translation.into().trim().to_string();
        let language_pair_id = language_pair_id.into();
        if term.is_empty() {
            return fail("card term must not be empty");
        }
        if translation.is_empty() {
            return fail("card translation must not be empty");
        }
        Ok(Self {
            id: CardId::for_content(&language_pair_id, &term, &translation),
            term,
            translation,
            language_pair_id,
            progress: 0,
            due_at: now,
            review_count: 0,
            successful_reviews: 0,
            direction: Direction::KnownToLearning,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            last_reviewed_at: None,
            created_at: now,
            updated_at: now,
            lesson_id: None,
            lesson_order: None,
        })
    }

    /// Attaches the lesson this card was introduced by, and its position in
    /// that lesson's word list.
    pub fn with_lesson(mut self, lesson_id: impl Into<String>, lesson_order: u32) -> Self {
        self.lesson_id = Some(lesson_id.into());
        self.lesson_order = Some(lesson_order);
        self
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn language_pair_id(&self) -> &str {
        &self.language_pair_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn lesson_id(&self) -> Option<&str> {
        self.lesson_id.as_deref()
    }

    pub fn lesson_order(&self) -> Option<u32> {
        self.lesson_order
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.due_at <= now
    }

    pub fn state(&self, now: Timestamp) -> LifecycleState {
        derive_state(self.progress, self.due_at, now)
    }

    /// Rejects cards whose state could not have been produced by the
    /// scheduler.
    pub fn validate(&self) -> Fallible<()> {
        if self.progress > MAX_PROGRESS {
            return fail(format!(
                "invalid card {}: progress {} is out of range [0, {MAX_PROGRESS}]",
                self.id, self.progress
            ));
        }
        if !self.ease_factor.is_finite() {
            return fail(format!(
                "invalid card {}: ease factor must be a finite number",
                self.id
            ));
        }
        if self.updated_at < self.created_at {
            return fail(format!(
                "invalid card {}: updatedAt precedes createdAt",
                self.id
            ));
        }
        Ok(())
    }
}
