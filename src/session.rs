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

//! A review session: picks the next card, decides how to present it, applies
//! the learner's answer and hands the result back to the repository.

use serde::Serialize;

use crate::clock::Clock;
use crate::config::Config;
use crate::config::modes::DisplayModeDefinition;
use crate::direction::select_direction;
use crate::error::Fallible;
use crate::error::fail;
use crate::mode::select_display_mode;
use crate::query::TimeUntil;
use crate::query::check_for_duplicates;
use crate::query::get_next_card_to_show;
use crate::query::get_next_due_card;
use crate::query::get_time_until_next;
use crate::repository::CardRepository;
use crate::rng::RandomSource;
use crate::scheduler::process_review;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::direction::Direction;
use crate::types::mode_name::ModeName;
use crate::types::review::ReviewOutcome;
use crate::types::review::ReviewRecord;

/// A card together with how to show it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub card: Card,
    pub mode: ModeName,
    pub definition: DisplayModeDefinition,
    pub direction: Direction,
}

pub struct Session<R, C, G> {
    config: Config,
    repo: R,
    clock: C,
    rng: G,
    /// Reviews made during this session.
    reviews: Vec<ReviewRecord>,
}

impl<R, C, G> Session<R, C, G>
where
    R: CardRepository,
    C: Clock,
    G: RandomSource,
{
    pub fn new(config: Config, repo: R, clock: C, rng: G) -> Self {
        Self {
            config,
            repo,
            clock,
            rng,
            reviews: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    /// Adds a card unless the language pair already has one with the same
    /// term or translation.
    pub fn add_card(&mut self, card: Card) -> Fallible<()> {
        let cards = self.repo.cards()?;
        if let Some(existing) = check_for_duplicates(
            &cards,
            card.term(),
            card.translation(),
            card.language_pair_id(),
        ) {
            return fail(format!(
                "duplicate of card {} ({} / {})",
                existing.id().short(),
                existing.term(),
                existing.translation()
            ));
        }
        log::debug!("Adding card {} ({}).", card.id().short(), card.term());
        self.repo.insert(card)
    }

    /// The next card to show, or `None` if nothing is due.
    pub fn next_prompt(&mut self, lesson_id: Option<&str>) -> Fallible<Option<Prompt>> {
        let now = self.clock.now();
        let cards = self.repo.cards()?;
        match get_next_card_to_show(&cards, lesson_id, now) {
            Some(card) => Ok(Some(self.prompt_for(card.clone())?)),
            None => Ok(None),
        }
    }

    /// Decides how to present `card`.
    pub fn prompt_for(&mut self, card: Card) -> Fallible<Prompt> {
        card.validate()?;
        let mode = select_display_mode(&self.config.modes, card.progress, card.review_count);
        let definition = self.config.presented_mode(mode)?;
        let direction = select_direction(card.progress, &mut self.rng);
        Ok(Prompt {
            card,
            mode,
            definition,
            direction,
        })
    }

    /// Applies an answer to the card with the given id and persists the
    /// result.
    pub fn answer(&mut self, id: CardId, outcome: &ReviewOutcome) -> Fallible<Card> {
        let now = self.clock.now();
        let before = self.repo.get(id)?;
        let after = process_review(&self.config, &before, outcome, now)?;
        let record = ReviewRecord::new(&before, &after, outcome, now);
        self.repo.save(after.clone())?;
        self.repo.record(record.clone())?;
        self.reviews.push(record);
        Ok(after)
    }

    /// How long until the next card that is not yet due becomes due.
    pub fn time_until_next(&self) -> Fallible<Option<TimeUntil>> {
        let now = self.clock.now();
        let cards = self.repo.cards()?;
        Ok(get_next_due_card(&cards, now).map(|card| get_time_until_next(card, now)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::clock::FixedClock;
    use crate::repository::MemoryRepository;
    use crate::rng::FixedRandom;
    use crate::types::timestamp::Timestamp;

    fn t0() -> Fallible<Timestamp> {
        Timestamp::parse("2025-01-01T08:00:00Z")
    }

    fn session() -> Fallible<Session<MemoryRepository, FixedClock, FixedRandom>> {
        Ok(Session::new(
            Config::default(),
            MemoryRepository::new(),
            FixedClock::new(t0()?),
            FixedRandom(0.1),
        ))
    }

    #[test]
    fn test_add_rejects_duplicates() -> Fallible<()> {
        let mut session = session()?;
        session.add_card(Card::new("dog", "perro", "en-es", t0()?)?)?;
        let err = session
            .add_card(Card::new("DOG", "can", "en-es", t0()?)?)
            .unwrap_err();
        assert!(err.message().starts_with("duplicate of card"));
        session.add_card(Card::new("dog", "cane", "en-it", t0()?)?)?;
        assert_eq!(session.repository().cards()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_prompt_for_new_card() -> Fallible<()> {
        let mut session = session()?;
        session.add_card(Card::new("dog", "perro", "en-es", t0()?)?)?;
        let Some(prompt) = session.next_prompt(None)? else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.mode, ModeName::Demonstration);
        assert_eq!(prompt.definition.name, ModeName::Demonstration);
        assert_eq!(prompt.direction, Direction::KnownToLearning);
        Ok(())
    }

    #[test]
    fn test_prompt_uses_alternate_definition() -> Fallible<()> {
        let mut session = session()?;
        let mut card = Card::new("dog", "perro", "en-es", t0()?)?;
        card.progress = 35;
        card.review_count = 4;
        let prompt = session.prompt_for(card)?;
        assert_eq!(prompt.mode, ModeName::Word);
        assert_eq!(prompt.definition.name, ModeName::Word);
        Ok(())
    }

    #[test]
    fn test_prompt_direction_uses_rng() -> Fallible<()> {
        let mut session = session()?;
        let mut card = Card::new("dog", "perro", "en-es", t0()?)?;
        card.progress = 90;
        let prompt = session.prompt_for(card)?;
        assert_eq!(prompt.direction, Direction::LearningToKnown);
        Ok(())
    }

    #[test]
    fn test_answer_persists_and_logs() -> Fallible<()> {
        let mut session = session()?;
        let card = Card::new("dog", "perro", "en-es", t0()?)?;
        let id = card.id();
        session.add_card(card)?;
        let updated = session.answer(id, &ReviewOutcome::correct())?;
        assert_eq!(updated.progress, 10);
        assert_eq!(session.repository().get(id)?, updated);
        assert_eq!(session.reviews().len(), 1);
        assert_eq!(session.repository().reviews()?.len(), 1);
        let record = &session.reviews()[0];
        assert_eq!(record.progress_before, 0);
        assert_eq!(record.progress_after, 10);
        assert!(record.correct);
        Ok(())
    }

    #[test]
    fn test_nothing_due() -> Fallible<()> {
        let mut session = session()?;
        let card = Card::new("dog", "perro", "en-es", t0()?)?;
        let id = card.id();
        session.add_card(card)?;
        assert!(session.time_until_next()?.is_none());
        session.answer(id, &ReviewOutcome::correct())?;
        assert!(session.next_prompt(None)?.is_none());
        assert_eq!(session.time_until_next()?, Some(TimeUntil::Minutes(1)));
        Ok(())
    }

    #[test]
    fn test_answer_unknown_card() -> Fallible<()> {
        let mut session = session()?;
        let id = CardId::for_content("en-es", "ghost", "fantasma");
        assert!(session.answer(id, &ReviewOutcome::correct()).is_err());
        Ok(())
    }

    #[test]
    fn test_time_moves_cards_back_into_the_queue() -> Fallible<()> {
        let mut session = session()?;
        let card = Card::new("dog", "perro", "en-es", t0()?)?;
        let id = card.id();
        session.add_card(card)?;
        session.answer(id, &ReviewOutcome::incorrect())?;
        assert!(session.next_prompt(None)?.is_none());
        session.clock().advance(TimeDelta::minutes(1))?;
        assert!(session.next_prompt(None)?.is_some());
        Ok(())
    }
}
