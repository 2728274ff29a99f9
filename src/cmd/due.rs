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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::mode::select_display_mode;
use crate::query::get_due_cards;
use crate::repository::CardRepository;
use crate::types::timestamp::Timestamp;

pub fn list_due(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let now = Timestamp::now();
    let cards = coll.deck.cards()?;
    let due = get_due_cards(&cards, now);
    if due.is_empty() {
        println!("No cards due.");
        return Ok(());
    }
    for card in due {
        let mode = select_display_mode(&coll.config.modes, card.progress, card.review_count);
        println!(
            "{}  {:<20} {:<20} {:>3}%  {}",
            card.id().short(),
            card.term(),
            card.translation(),
            card.progress,
            mode
        );
    }
    Ok(())
}
