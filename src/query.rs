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

//! Queries over an in-memory card collection. Nothing here has side effects
//! or hidden state; every function can be called again with the same result.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// The cards due at `now`, earliest first.
pub fn get_due_cards(cards: &[Card], now: Timestamp) -> Vec<&Card> {
    let mut due: Vec<&Card> = cards.iter().filter(|c| c.is_due(now)).collect();
    due.sort_by_key(|c| c.due_at);
    due
}

/// The card that becomes due soonest, among those not yet due.
pub fn get_next_due_card(cards: &[Card], now: Timestamp) -> Option<&Card> {
    cards
        .iter()
        .filter(|c| !c.is_due(now))
        .min_by_key(|c| c.due_at)
}

/// The cards of a lesson that have a position in it, in lesson order.
pub fn get_lesson_cards_in_order<'a>(cards: &'a [Card], lesson_id: &str) -> Vec<&'a Card> {
    let mut lesson: Vec<&Card> = cards
        .iter()
        .filter(|c| c.lesson_id() == Some(lesson_id) && c.lesson_order().is_some())
        .collect();
    lesson.sort_by_key(|c| c.lesson_order());
    lesson
}

/// The card to present next.
///
/// While working through a lesson, its never-reviewed cards come first, in
/// lesson order. After that, the earliest due card.
pub fn get_next_card_to_show<'a>(
    cards: &'a [Card],
    lesson_id: Option<&str>,
    now: Timestamp,
) -> Option<&'a Card> {
    if let Some(lesson_id) = lesson_id {
        let fresh = get_lesson_cards_in_order(cards, lesson_id)
            .into_iter()
            .find(|c| c.progress == 0);
        if fresh.is_some() {
            return fresh;
        }
    }
    get_due_cards(cards, now).into_iter().next()
}

/// Coarse time remaining until a card is due.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimeUntil {
    Now,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

impl Display for TimeUntil {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn plural(n: i64, unit: &str) -> String {
            if n == 1 {
                format!("{n} {unit}")
            } else {
                format!("{n} {unit}s")
            }
        }
        match self {
            TimeUntil::Now => write!(f, "now"),
            TimeUntil::Minutes(n) => write!(f, "{}", plural(*n, "minute")),
            TimeUntil::Hours(n) => write!(f, "{}", plural(*n, "hour")),
            TimeUntil::Days(n) => write!(f, "{}", plural(*n, "day")),
        }
    }
}

/// Buckets the time until `card` is due into the largest whole unit.
pub fn get_time_until_next(card: &Card, now: Timestamp) -> TimeUntil {
    let remaining = card.due_at.since(now);
    if remaining.num_days() >= 1 {
        TimeUntil::Days(remaining.num_days())
    } else if remaining.num_hours() >= 1 {
        TimeUntil::Hours(remaining.num_hours())
    } else if remaining.num_minutes() >= 1 {
        TimeUntil::Minutes(remaining.num_minutes())
    } else {
        TimeUntil::Now
    }
}

/// Finds a card in the same language pair whose term or translation equals
/// the given one, ignoring case.
pub fn check_for_duplicates<'a>(
    cards: &'a [Card],
    term: &str,
    translation: &str,
    language_pair_id: &str,
) -> Option<&'a Card> {
    let term = term.to_lowercase();
    let translation = translation.to_lowercase();
    cards.iter().find(|c| {
        c.language_pair_id() == language_pair_id
            && (c.term().to_lowercase() == term || c.translation().to_lowercase() == translation)
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::error::Fallible;

    fn now() -> Fallible<Timestamp> {
        Timestamp::parse("2025-06-01T12:00:00Z")
    }

    fn card_due_in(term: &str, minutes: i64) -> Fallible<Card> {
        let mut card = Card::new(term, format!("{term}-t"), "en-es", now()?)?;
        card.due_at = now()?.checked_add(TimeDelta::minutes(minutes))?;
        Ok(card)
    }

    fn terms(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.term().to_string()).collect()
    }

    #[test]
    fn test_due_cards() -> Fallible<()> {
        let cards = vec![
            card_due_in("a", -1)?,
            card_due_in("b", 1)?,
            card_due_in("c", -10)?,
        ];
        let due = get_due_cards(&cards, now()?);
        assert_eq!(terms(&due), vec!["c", "a"]);
        Ok(())
    }

    #[test]
    fn test_due_includes_exactly_now() -> Fallible<()> {
        let cards = vec![card_due_in("a", 0)?];
        assert_eq!(get_due_cards(&cards, now()?).len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_collections() -> Fallible<()> {
        let cards: Vec<Card> = Vec::new();
        assert!(get_due_cards(&cards, now()?).is_empty());
        assert!(get_next_due_card(&cards, now()?).is_none());
        assert!(get_next_card_to_show(&cards, Some("l1"), now()?).is_none());
        assert!(get_lesson_cards_in_order(&cards, "l1").is_empty());
        assert!(check_for_duplicates(&cards, "a", "b", "en-es").is_none());
        Ok(())
    }

    #[test]
    fn test_next_due_card() -> Fallible<()> {
        let cards = vec![
            card_due_in("a", -5)?,
            card_due_in("b", 30)?,
            card_due_in("c", 10)?,
        ];
        let next = get_next_due_card(&cards, now()?).map(|c| c.term());
        assert_eq!(next, Some("c"));
        let only_due = vec![card_due_in("a", -5)?];
        assert!(get_next_due_card(&only_due, now()?).is_none());
        Ok(())
    }

    #[test]
    fn test_lesson_order() -> Fallible<()> {
        let cards = vec![
            card_due_in("third", 5)?.with_lesson("l1", 3),
            card_due_in("first", 5)?.with_lesson("l1", 1),
            card_due_in("other", 5)?.with_lesson("l2", 0),
            card_due_in("loose", 5)?,
            card_due_in("second", 5)?.with_lesson("l1", 2),
        ];
        let lesson = get_lesson_cards_in_order(&cards, "l1");
        assert_eq!(terms(&lesson), vec!["first", "second", "third"]);
        Ok(())
    }

    #[test]
    fn test_next_card_prefers_fresh_lesson_cards() -> Fallible<()> {
        let mut started = card_due_in("started", 5)?.with_lesson("l1", 1);
        started.progress = 10;
        let cards = vec![
            card_due_in("overdue", -60)?,
            started,
            card_due_in("fresh", 5)?.with_lesson("l1", 2),
        ];
        let next = get_next_card_to_show(&cards, Some("l1"), now()?).map(|c| c.term());
        assert_eq!(next, Some("fresh"));
        let next = get_next_card_to_show(&cards, None, now()?).map(|c| c.term());
        assert_eq!(next, Some("overdue"));
        Ok(())
    }

    #[test]
    fn test_next_card_falls_back_when_lesson_done() -> Fallible<()> {
        let mut done = card_due_in("done", 5)?.with_lesson("l1", 1);
        done.progress = 20;
        let cards = vec![done, card_due_in("due", -1)?];
        let next = get_next_card_to_show(&cards, Some("l1"), now()?).map(|c| c.term());
        assert_eq!(next, Some("due"));
        let not_due = vec![card_due_in("later", 5)?];
        assert!(get_next_card_to_show(&not_due, Some("l1"), now()?).is_none());
        Ok(())
    }

    #[test]
    fn test_time_until_next() -> Fallible<()> {
        let t = now()?;
        let cases = [
            (-30, TimeUntil::Now),
            (0, TimeUntil::Now),
            (1, TimeUntil::Minutes(1)),
            (59, TimeUntil::Minutes(59)),
            (60, TimeUntil::Hours(1)),
            (60 * 23 + 59, TimeUntil::Hours(23)),
            (60 * 24, TimeUntil::Days(1)),
            (60 * 24 * 7 + 5, TimeUntil::Days(7)),
        ];
        for (minutes, expected) in cases {
            let card = card_due_in("a", minutes)?;
            assert_eq!(get_time_until_next(&card, t), expected, "{minutes} minutes");
        }
        Ok(())
    }

    #[test]
    fn test_time_until_display() {
        assert_eq!(TimeUntil::Now.to_string(), "now");
        assert_eq!(TimeUntil::Minutes(1).to_string(), "1 minute");
        assert_eq!(TimeUntil::Hours(5).to_string(), "5 hours");
        assert_eq!(TimeUntil::Days(24).to_string(), "24 days");
    }

    #[test]
    fn test_duplicates() -> Fallible<()> {
        let t = now()?;
        let cards = vec![
            Card::new("Dog", "Perro", "en-es", t)?,
            Card::new("cat", "gatto", "en-it", t)?,
        ];
        let hit = check_for_duplicates(&cards, "DOG", "can", "en-es").map(|c| c.term());
        assert_eq!(hit, Some("Dog"));
        let hit = check_for_duplicates(&cards, "hound", "perro", "en-es").map(|c| c.term());
        assert_eq!(hit, Some("Dog"));
        assert!(check_for_duplicates(&cards, "cat", "gato", "en-es").is_none());
        assert!(check_for_duplicates(&cards, "cat", "gatto", "en-it").is_some());
        Ok(())
    }
}
