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

//! The review state machine. Given a card, an outcome and the current time,
//! computes the card's next state.

use crate::config::Config;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::MAX_PROGRESS;
use crate::types::review::ReviewOutcome;
use crate::types::timestamp::Timestamp;

/// Applies a review to `card` and returns the updated card. The input card
/// is validated first; a card the scheduler could not have produced is an
/// error, not something to repair.
pub fn process_review(
    config: &Config,
    card: &Card,
    outcome: &ReviewOutcome,
    now: Timestamp,
) -> Fallible<Card> {
    card.validate()?;
    let mut next = card.clone();
    next.review_count = card.review_count.saturating_add(1);
    next.last_reviewed_at = Some(now);
    next.updated_at = now;
    if let Some(direction) = outcome.direction {
        next.direction = direction;
    }
    if outcome.correct {
        next.progress = card
            .progress
            .saturating_add(config.progress_increase)
            .min(MAX_PROGRESS);
        next.successful_reviews = card.successful_reviews.saturating_add(1);
        let interval = config.intervals.for_successful_reviews(next.successful_reviews);
        next.due_at = now.checked_add(interval.to_delta())?;
    } else {
        next.progress = card.progress.saturating_sub(config.progress_decrease);
        if next.progress < config.reset_successful_reviews_threshold {
            next.successful_reviews = card.successful_reviews.saturating_sub(1);
        }
        next.due_at = now.checked_add(config.incorrect_answer_delay())?;
    }
    log::debug!(
        "Reviewed card {} ({}): progress {} -> {}, successful reviews {} -> {}, due {}.",
        card.id().short(),
        if outcome.correct { "correct" } else { "incorrect" },
        card.progress,
        next.progress,
        card.successful_reviews,
        next.successful_reviews,
        next.due_at
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::types::direction::Direction;
    use crate::types::lifecycle::LifecycleState;

    fn t0() -> Fallible<Timestamp> {
        Timestamp::parse("2025-01-01T00:00:00Z")
    }

    fn card_with(progress: u8, successful_reviews: u32) -> Fallible<Card> {
        let mut card = Card::new("dog", "perro", "en-es", t0()?)?;
        card.progress = progress;
        card.successful_reviews = successful_reviews;
        Ok(card)
    }

    #[test]
    fn test_new_card_first_correct() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        let card = Card::new("dog", "perro", "en-es", now)?;
        let next = process_review(&config, &card, &ReviewOutcome::correct(), now)?;
        assert_eq!(next.progress, 10);
        assert_eq!(next.successful_reviews, 1);
        assert_eq!(next.review_count, 1);
        assert_eq!(next.due_at, now.checked_add(TimeDelta::minutes(1))?);
        assert_eq!(next.last_reviewed_at, Some(now));
        assert_eq!(next.updated_at, now);
        Ok(())
    }

    #[test]
    fn test_second_correct() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        let card = Card::new("dog", "perro", "en-es", now)?;
        let card = process_review(&config, &card, &ReviewOutcome::correct(), now)?;
        let later = now.checked_add(TimeDelta::minutes(1))?;
        let card = process_review(&config, &card, &ReviewOutcome::correct(), later)?;
        assert_eq!(card.progress, 20);
        assert_eq!(card.successful_reviews, 2);
        assert_eq!(card.review_count, 2);
        assert_eq!(card.due_at, later.checked_add(TimeDelta::minutes(10))?);
        Ok(())
    }

    #[test]
    fn test_incorrect_above_threshold_keeps_successes() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        let card = card_with(50, 3)?;
        let next = process_review(&config, &card, &ReviewOutcome::incorrect(), now)?;
        assert_eq!(next.progress, 30);
        assert_eq!(next.successful_reviews, 3);
        assert_eq!(next.due_at, now.checked_add(TimeDelta::milliseconds(60_000))?);
        Ok(())
    }

    #[test]
    fn test_incorrect_below_threshold_takes_back_a_success() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        let next = process_review(&config, &card_with(15, 2)?, &ReviewOutcome::incorrect(), now)?;
        assert_eq!(next.progress, 0);
        assert_eq!(next.successful_reviews, 1);
        let next = process_review(&config, &card_with(15, 0)?, &ReviewOutcome::incorrect(), now)?;
        assert_eq!(next.successful_reviews, 0);
        Ok(())
    }

    #[test]
    fn test_threshold_boundary() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        // 40 - 20 = 20, which is not below 20.
        let next = process_review(&config, &card_with(40, 4)?, &ReviewOutcome::incorrect(), now)?;
        assert_eq!(next.progress, 20);
        assert_eq!(next.successful_reviews, 4);
        // 39 - 20 = 19, which is.
        let next = process_review(&config, &card_with(39, 4)?, &ReviewOutcome::incorrect(), now)?;
        assert_eq!(next.progress, 19);
        assert_eq!(next.successful_reviews, 3);
        Ok(())
    }

    #[test]
    fn test_progress_clamped_at_top() -> Fallible<()> {
        let config = Config::default();
        let next = process_review(&config, &card_with(95, 9)?, &ReviewOutcome::correct(), t0()?)?;
        assert_eq!(next.progress, 100);
        let next = process_review(&config, &next, &ReviewOutcome::correct(), t0()?)?;
        assert_eq!(next.progress, 100);
        Ok(())
    }

    #[test]
    fn test_interval_progression() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        let expected = [
            TimeDelta::minutes(1),
            TimeDelta::minutes(10),
            TimeDelta::minutes(30),
            TimeDelta::hours(24),
            TimeDelta::days(7),
            TimeDelta::days(24),
            TimeDelta::days(24),
            TimeDelta::days(24),
        ];
        let mut card = card_with(0, 0)?;
        let mut previous = TimeDelta::zero();
        for gap in expected {
            card = process_review(&config, &card, &ReviewOutcome::correct(), now)?;
            let actual = card.due_at.since(now);
            assert_eq!(actual, gap);
            assert!(actual >= previous);
            previous = actual;
        }
        assert_eq!(card.successful_reviews, 8);
        Ok(())
    }

    #[test]
    fn test_incorrect_delay_is_flat() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        for (progress, successes) in [(0, 0), (25, 1), (60, 5), (100, 30)] {
            let next = process_review(
                &config,
                &card_with(progress, successes)?,
                &ReviewOutcome::incorrect(),
                now,
            )?;
            assert_eq!(next.due_at.since(now), TimeDelta::minutes(1));
        }
        Ok(())
    }

    #[test]
    fn test_invariants_over_mixed_sequence() -> Fallible<()> {
        let config = Config::default();
        let mut now = t0()?;
        let mut card = Card::new("dog", "perro", "en-es", now)?;
        let pattern = [true, true, false, false, false, true, false, true, true, true, true];
        for (i, correct) in pattern.iter().cycle().take(200).enumerate() {
            let outcome = if *correct {
                ReviewOutcome::correct()
            } else {
                ReviewOutcome::incorrect()
            };
            let next = process_review(&config, &card, &outcome, now)?;
            assert!(next.progress <= 100);
            assert_eq!(next.review_count, card.review_count + 1);
            assert_eq!(next.review_count as usize, i + 1);
            card = next;
            now = now.checked_add(TimeDelta::minutes(5))?;
        }
        Ok(())
    }

    #[test]
    fn test_state_after_review() -> Fallible<()> {
        let config = Config::default();
        let now = t0()?;
        let next = process_review(&config, &card_with(30, 2)?, &ReviewOutcome::correct(), now)?;
        assert_eq!(next.state(now), LifecycleState::Know);
        let later = next.due_at;
        assert_eq!(next.state(later), LifecycleState::Learn);
        Ok(())
    }

    #[test]
    fn test_direction_recorded() -> Fallible<()> {
        let config = Config::default();
        let outcome = ReviewOutcome::correct().with_direction(Direction::LearningToKnown);
        let next = process_review(&config, &card_with(90, 6)?, &outcome, t0()?)?;
        assert_eq!(next.direction, Direction::LearningToKnown);
        let next = process_review(&config, &next, &ReviewOutcome::incorrect(), t0()?)?;
        assert_eq!(next.direction, Direction::LearningToKnown);
        Ok(())
    }

    #[test]
    fn test_legacy_fields_untouched() -> Fallible<()> {
        let config = Config::default();
        let mut card = card_with(40, 2)?;
        card.ease_factor = 1.7;
        card.interval_days = 12;
        let next = process_review(&config, &card, &ReviewOutcome::correct(), t0()?)?;
        assert_eq!(next.ease_factor, 1.7);
        assert_eq!(next.interval_days, 12);
        Ok(())
    }

    #[test]
    fn test_invalid_card_rejected() -> Fallible<()> {
        let config = Config::default();
        let card = card_with(120, 0)?;
        let err = process_review(&config, &card, &ReviewOutcome::correct(), t0()?).unwrap_err();
        assert!(err.message().starts_with("invalid card"));
        Ok(())
    }
}
