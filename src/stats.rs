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

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Config;
use crate::mode::select_display_mode;
use crate::query::get_due_cards;
use crate::query::get_next_due_card;
use crate::query::get_time_until_next;
use crate::types::card::Card;
use crate::types::lifecycle::LifecycleState;
use crate::types::mode_name::ModeName;
use crate::types::review::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// A summary of a deck at a point in time.
#[derive(Serialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub card_count: usize,
    pub due_count: usize,
    pub by_state: BTreeMap<LifecycleState, usize>,
    pub by_mode: BTreeMap<ModeName, usize>,
    /// Reviews made on the current UTC day.
    pub today_review_count: usize,
    /// `None` if no card is scheduled for later.
    pub next_due_in: Option<String>,
}

impl DeckStats {
    pub fn compute(
        config: &Config,
        cards: &[Card],
        reviews: &[ReviewRecord],
        now: Timestamp,
    ) -> Self {
        let mut by_state = BTreeMap::new();
        let mut by_mode = BTreeMap::new();
        for card in cards {
            *by_state.entry(card.state(now)).or_insert(0) += 1;
            let mode = select_display_mode(&config.modes, card.progress, card.review_count);
            *by_mode.entry(mode).or_insert(0) += 1;
        }
        let today = now.utc_date();
        Self {
            card_count: cards.len(),
            due_count: get_due_cards(cards, now).len(),
            by_state,
            by_mode,
            today_review_count: reviews
                .iter()
                .filter(|r| r.reviewed_at.utc_date() == today)
                .count(),
            next_due_in: get_next_due_card(cards, now)
                .map(|card| get_time_until_next(card, now).to_string()),
        }
    }

    pub fn count(&self, state: LifecycleState) -> usize {
        self.by_state.get(&state).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::error::Fallible;
    use crate::scheduler::process_review;
    use crate::types::review::ReviewOutcome;

    #[test]
    fn test_stats() -> Fallible<()> {
        let config = Config::default();
        let t0 = Timestamp::parse("2025-01-01T08:00:00Z")?;
        let fresh = Card::new("dog", "perro", "en-es", t0)?;
        let reviewed = Card::new("cat", "gato", "en-es", t0)?;
        let mut known = Card::new("bird", "pájaro", "en-es", t0)?;
        known.progress = 40;
        let after = process_review(&config, &reviewed, &ReviewOutcome::correct(), t0)?;
        let known = process_review(&config, &known, &ReviewOutcome::correct(), t0)?;
        let record = ReviewRecord::new(&reviewed, &after, &ReviewOutcome::correct(), t0);
        let yesterday = ReviewRecord {
            reviewed_at: t0.checked_add(TimeDelta::days(-1))?,
            ..record.clone()
        };
        let cards = vec![fresh, after, known];
        let stats = DeckStats::compute(&config, &cards, &[record, yesterday], t0);
        assert_eq!(stats.card_count, 3);
        assert_eq!(stats.due_count, 1);
        assert_eq!(stats.count(LifecycleState::Learn), 1);
        assert_eq!(stats.count(LifecycleState::Know), 2);
        assert_eq!(stats.count(LifecycleState::Mastered), 0);
        assert_eq!(stats.by_mode.get(&ModeName::Demonstration), Some(&2));
        assert_eq!(stats.today_review_count, 1);
        assert_eq!(stats.next_due_in.as_deref(), Some("1 minute"));
        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["byState"]["LEARN"], 1);
        Ok(())
    }
}
