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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::repository::CardRepository;
use crate::types::card_id::CardId;
use crate::types::review::ReviewOutcome;

pub fn review_card(
    directory: Option<String>,
    id: &str,
    correct: bool,
    time_spent: Duration,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let id = resolve_id(&coll, id)?;
    let outcome = if correct {
        ReviewOutcome::correct()
    } else {
        ReviewOutcome::incorrect()
    }
    .with_time_spent(time_spent);
    let mut session = coll.into_session();
    let card = session.answer(id, &outcome)?;
    session.into_repository().flush()?;
    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}

/// Accepts a full id or an unambiguous prefix of one.
fn resolve_id(coll: &Collection, id: &str) -> Fallible<CardId> {
    let prefix = id.to_lowercase();
    let matches: Vec<CardId> = coll
        .deck
        .cards()?
        .iter()
        .map(|c| c.id())
        .filter(|c| c.to_hex().starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => fail(format!("no card with id {id}")),
        _ => fail(format!("id prefix {id} is ambiguous")),
    }
}
