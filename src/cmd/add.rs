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
use crate::error::fail;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

pub struct AddArgs {
    pub term: String,
    pub translation: String,
    pub language_pair_id: String,
    pub lesson: Option<(String, u32)>,
}

pub fn add_card(directory: Option<String>, args: AddArgs) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let mut card = Card::new(
        args.term,
        args.translation,
        args.language_pair_id,
        Timestamp::now(),
    )?;
    if let Some((lesson_id, order)) = args.lesson {
        card = card.with_lesson(lesson_id, order);
    }
    let id = card.id();
    let mut session = coll.into_session();
    session.add_card(card)?;
    session.into_repository().flush()?;
    println!("Added card {id}.");
    Ok(())
}

/// Pairs `--lesson` with `--order`: both or neither.
pub fn lesson_arg(lesson: Option<String>, order: Option<u32>) -> Fallible<Option<(String, u32)>> {
    match (lesson, order) {
        (Some(lesson), Some(order)) => Ok(Some((lesson, order))),
        (None, None) => Ok(None),
        _ => fail("--lesson and --order must be given together."),
    }
}
